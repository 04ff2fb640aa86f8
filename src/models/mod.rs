pub mod config;
pub mod options;

pub use config::AppConfig;
pub use options::{ConversionOptions, OptionOverrides, ResizeOptions};
