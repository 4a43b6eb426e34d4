pub mod categories;
pub mod news;
pub mod songs;
pub mod tags;
