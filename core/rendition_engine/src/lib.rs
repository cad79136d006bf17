pub mod config;
pub mod constants;
pub mod device_manager;
pub mod engine;
pub mod error;
pub mod rendition;
pub mod selection;
