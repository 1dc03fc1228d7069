//! Company directory tools.
//!
//! # Module Structure
//!
//! - `directory`: fixed person records and About-page snippet extraction
//! - `tools`: `Tool` implementations for the directory surface

pub mod directory;
pub mod tools;
