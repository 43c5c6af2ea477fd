pub mod canvas;
pub mod geometry;
pub mod overlay;
pub mod pointer;
pub mod settings;
pub mod tool;

mod app;
mod config;

pub use app::run_native;
pub use config::{Config, ConfigError};
