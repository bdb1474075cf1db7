//! Intermediate Representation for export
//!
//! See [`types`] for the element descriptors produced by the encoder.

pub mod types;

pub use types::*;
