//! Typed input records for maturity assessments.
//!
//! The three input tables (factors, responses, actions) are modelled as
//! explicit record types. Optional survey columns become `Option` fields and
//! are resolved once, at the validation boundary, instead of being probed for
//! on every access.
//!
//! ```ignore
//! let factors = FactorCatalog::new(raw_factors)?;
//! let actions = ActionCatalog::new(raw_actions, &factors);
//! ```

mod action;
mod factor;
mod level;
mod response;

pub use action::{Action, ActionCatalog, Timeframe};
pub use factor::{Area, Factor, FactorCatalog};
pub use level::{round_level, MaturityLevel};
pub use response::Response;
