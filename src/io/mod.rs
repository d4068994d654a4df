//! Input/output helpers.
//!
//! - model artifact loading (`artifact`)
//! - CSV ingest for batch runs (`ingest`)
//! - batch result export (`export`)

pub mod artifact;
pub mod export;
pub mod ingest;

pub use artifact::*;
pub use export::*;
pub use ingest::*;
