//! Shared types and models for CropCast
//!
//! This crate contains types shared between the backend, the browser forms
//! (via WASM), and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
