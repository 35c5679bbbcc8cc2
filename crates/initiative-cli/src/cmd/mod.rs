pub mod catalog;
pub mod config;
pub mod play;
pub mod roll;
pub mod tokens;
