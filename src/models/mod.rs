pub mod error;
pub mod news;
pub mod song;
