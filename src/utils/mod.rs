//! # Utilities Module
//!
//! Graph queries over maze grids.

pub mod navigation;

pub use navigation::*;
