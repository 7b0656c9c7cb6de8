//! Time integration of the rotary cutter model.
//!
//! Provides:
//! - `TransientModel` trait over fixed-size state arrays
//! - Butcher tableaus for embedded Runge–Kutta pairs (Dormand–Prince 5(4),
//!   Bogacki–Shampine 3(2))
//! - Adaptive-step solver with error control and dense output onto an even
//!   sample grid
//! - `simulate` / `simulate_with` producing a [`Trajectory`]
//! - Parallel batch runs

pub mod batch;
pub mod error;
pub mod model;
pub mod options;
pub mod run;
pub mod solver;
pub mod tableau;
pub mod trajectory;

pub use batch::{BatchCase, BatchOutcome, simulate_batch};
pub use error::{SimError, SimResult, SolveFailure};
pub use model::TransientModel;
pub use options::{Method, SimOptions};
pub use run::{simulate, simulate_with};
pub use solver::{OdeSolution, SolveStats, solve};
pub use tableau::{BOGACKI_SHAMPINE_32, DORMAND_PRINCE_54, Tableau};
pub use trajectory::{RunStatistics, Trajectory};
