//! Core types and utilities

pub mod boundary;
pub mod error;
pub mod vec2;

pub use boundary::BoundaryType;
pub use error::{Result, WaveTankError};
pub use vec2::Vec2;
