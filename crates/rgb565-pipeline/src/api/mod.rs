//! Public API for the rgb565-pipeline crate.
//!
//! This module provides the high-level API: the immutable [`PipelineConfig`],
//! the pure [`process`] entry point, the [`Rgb565Converter`] builder, and the
//! [`PipelineError`] error type.

mod builder;
mod config;
mod error;
mod pipeline;

pub use builder::Rgb565Converter;
pub use config::PipelineConfig;
pub use error::{ParseNameError, PipelineError};
pub use pipeline::{process, process_buffer, Processed};
