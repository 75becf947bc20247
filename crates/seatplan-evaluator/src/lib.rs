//! Scoring of candidate seatings.
//!
//! This crate turns a permutation of seats into a single fitness value and, for
//! the winning permutation, into a per-student satisfaction report.
//!
//! # Architecture
//!
//! ```text
//! placement      (per student, per seat: row position, preference, medical fit)
//!     ↓ precomputed once into
//! static_table   (students × seats matrix of weighted placement scores)
//!     ↓ combined with
//! social_score   (friends / enemies actually seated nearby)
//!     ↓ summed over all seats by
//! fitness        (FitnessEvaluator: the objective the optimizer maximizes)
//!     ↓ explained by
//! satisfaction   (per-seat breakdown, level, and complaints)
//! ```
//!
//! # Score Scale
//!
//! Placement terms are in `0.0..=1.0` (medical fit may be negative). The
//! fitness function multiplies every weighted term by [`SCORE_SCALE`] so that
//! small weight differences still move the integer part of the fitness. The
//! satisfaction report uses the unscaled weighted terms.
//!
//! Medical violations are handled as a hard penalty: the weighted medical term
//! is replaced by `-medical_weight × 20` (before scaling), which outweighs every
//! positive term a single seat can earn.

pub use self::{fitness::FitnessEvaluator, static_table::StaticScoreTable};

pub mod fitness;
pub mod placement;
pub mod satisfaction;
pub mod social_score;
pub mod static_table;

/// Multiplier applied to every weighted term in the fitness function.
pub const SCORE_SCALE: f64 = 100.0;
