//! rc-core: numeric foundation for the rotorcut workspace.
//!
//! Contains:
//! - numeric (Real + float helpers + sampled-signal statistics)
//! - units (uom conversions used at the configuration boundary)
//! - timing (wall-clock run timer)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use timing::Timer;
