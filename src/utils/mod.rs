pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod media;
pub mod seed;
pub mod state;
pub mod storage;
pub mod time;
