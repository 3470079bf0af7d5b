//! # Rendering Module
//!
//! Plain-text views of a session for terminal front ends and logs.

pub mod ascii;

pub use ascii::*;
