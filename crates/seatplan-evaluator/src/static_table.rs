//! Precomputed placement scores for every (student, seat) pair.
//!
//! Row position, preference match, and medical fit do not depend on where the
//! other students sit, so they are evaluated once per run and stored in a flat
//! `students × seats` matrix. The fitness function then reads one value per
//! occupied seat instead of re-checking hash sets in its inner loop.

use seatplan_engine::{Grid, Roster, StudentProfile, Weights};

use crate::{
    SCORE_SCALE,
    placement::{self, MedicalFit},
};

/// Multiplier of the medical weight subtracted when a medical requirement is violated.
pub const MEDICAL_VIOLATION_PENALTY: f64 = 20.0;

/// Read-only `students × seats` matrix of scaled placement scores.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticScoreTable {
    student_count: usize,
    seat_count: usize,
    scores: Vec<f64>,
}

impl StaticScoreTable {
    #[must_use]
    pub fn build(roster: &Roster, grid: &Grid, weights: &Weights) -> Self {
        let seat_count = grid.seat_count();
        let mut scores = Vec::with_capacity(roster.len() * seat_count);
        for student in roster.profiles() {
            scores.extend((0..seat_count).map(|seat| {
                let (row, column) = grid.position(seat);
                placement_value(student, row, column, grid, weights) * SCORE_SCALE
            }));
        }
        Self {
            student_count: roster.len(),
            seat_count,
            scores,
        }
    }

    #[must_use]
    pub fn student_count(&self) -> usize {
        self.student_count
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    /// Scaled placement score of `student` sitting on `seat`.
    #[must_use]
    #[inline]
    pub fn get(&self, student: usize, seat: usize) -> f64 {
        self.scores[student * self.seat_count + seat]
    }
}

/// Weighted, unscaled placement score of one student on one seat.
#[must_use]
pub fn placement_value(
    student: &StudentProfile,
    row: usize,
    column: usize,
    grid: &Grid,
    weights: &Weights,
) -> f64 {
    let preference = placement::preference_score(student, row, column);
    let position = placement::position_score(row, grid.rows());
    let medical = MedicalFit::evaluate(student, row, column).score();

    let mut value = preference * weights.pref_bonus + position * weights.row_bonus;
    if medical > 0.0 {
        value += medical * weights.med_penalty;
    } else if medical < 0.0 {
        value -= weights.med_penalty * MEDICAL_VIOLATION_PENALTY;
    }
    value
}
