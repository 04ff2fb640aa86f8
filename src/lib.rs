//! RGB565 image converter
//!
//! PNG front end, CLI and HTTP service around the `rgb565-pipeline` crate.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
