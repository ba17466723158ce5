//! # ChromaMix Common Library
//!
//! Shared code for the ChromaMix service and its tooling:
//! - Color model and hex/RGB conversions
//! - The fixed color wheel palette and nearest-entry search
//! - Pigment definitions and recipe step types
//! - Key-value storage port (memory and SQLite backed)
//! - Configuration loading

pub mod color;
pub mod config;
pub mod error;
pub mod palette;
pub mod pigment;
pub mod storage;

pub use color::{Color, RgbColor};
pub use error::{Error, Result};
pub use pigment::{MixingStep, Pigment};
pub use storage::KeyValueStore;
