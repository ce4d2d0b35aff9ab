// Compiled-in IMDb Top 250 seed (first 100 positions)

/// IMDb id and rank pairs used on first run and on reset
pub const DEFAULT_TOP_LIST: &[(&str, i32)] = &[
    ("tt0111161", 1),
    ("tt0068646", 2),
    ("tt0468569", 3),
    ("tt0071562", 4),
    ("tt0050083", 5),
    ("tt0108052", 6),
    ("tt0167260", 7),
    ("tt0110912", 8),
    ("tt0120737", 9),
    ("tt0060196", 10),
    ("tt0109830", 11),
    ("tt0167261", 12),
    ("tt0137523", 13),
    ("tt1375666", 14),
    ("tt0080684", 15),
    ("tt0133093", 16),
    ("tt0099685", 17),
    ("tt0073486", 18),
    ("tt0047478", 19),
    ("tt0114369", 20),
    ("tt0317248", 21),
    ("tt0102926", 22),
    ("tt0038650", 23),
    ("tt0118799", 24),
    ("tt0120815", 25),
    ("tt0816692", 26),
    ("tt0245429", 27),
    ("tt0120689", 28),
    ("tt6751668", 29),
    ("tt0076759", 30),
    ("tt0103064", 31),
    ("tt0088763", 32),
    ("tt0253474", 33),
    ("tt0054215", 34),
    ("tt0110413", 35),
    ("tt0110357", 36),
    ("tt0172495", 37),
    ("tt0120586", 38),
    ("tt0407887", 39),
    ("tt0114814", 40),
    ("tt0482571", 41),
    ("tt2582802", 42),
    ("tt0095327", 43),
    ("tt0034583", 44),
    ("tt1675434", 45),
    ("tt0095765", 46),
    ("tt0064116", 47),
    ("tt0047396", 48),
    ("tt0021749", 49),
    ("tt0078748", 50),
    ("tt0078788", 51),
    ("tt0209144", 52),
    ("tt0082971", 53),
    ("tt1853728", 54),
    ("tt0910970", 55),
    ("tt0405094", 56),
    ("tt0043014", 57),
    ("tt0050825", 58),
    ("tt0081505", 59),
    ("tt0032553", 60),
    ("tt4154756", 61),
    ("tt0051201", 62),
    ("tt0090605", 63),
    ("tt0057012", 64),
    ("tt0169547", 65),
    ("tt1345836", 66),
    ("tt0364569", 67),
    ("tt0112573", 68),
    ("tt0086190", 69),
    ("tt0114709", 70),
    ("tt0087843", 71),
    ("tt0082096", 72),
    ("tt0119698", 73),
    ("tt4633694", 74),
    ("tt0105236", 75),
    ("tt0086879", 76),
    ("tt5311514", 77),
    ("tt4154796", 78),
    ("tt0361748", 79),
    ("tt0062622", 80),
    ("tt0052357", 81),
    ("tt0180093", 82),
    ("tt0338013", 83),
    ("tt0033467", 84),
    ("tt0066921", 85),
    ("tt0093058", 86),
    ("tt0045152", 87),
    ("tt0053125", 88),
    ("tt0211915", 89),
    ("tt0022100", 90),
    ("tt0056172", 91),
    ("tt0086250", 92),
    ("tt0070735", 93),
    ("tt0075314", 94),
    ("tt0056592", 95),
    ("tt0036775", 96),
    ("tt1187043", 97),
    ("tt0040522", 98),
    ("tt0119217", 99),
    ("tt0435761", 100),
];
