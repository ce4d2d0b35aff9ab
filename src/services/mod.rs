// Services module - business logic layer

pub mod imdb_defaults;
pub mod imdb_top;
pub mod ranking;
pub mod sorting;
