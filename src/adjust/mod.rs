//! Rule-based price adjustments.
//!
//! - threshold bands and the rule type (`bands`)
//! - the fixed per-feature rule table (`rules`)

pub mod bands;
pub mod rules;

pub use bands::*;
pub use rules::*;
