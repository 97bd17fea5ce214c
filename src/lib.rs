pub mod app;
pub mod assets;
pub mod config;
pub mod upload;
pub mod utils;
pub mod watcher;
