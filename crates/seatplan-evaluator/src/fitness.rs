//! The objective the optimizer maximizes.
//!
//! ```text
//! fitness = Σ over seats:
//!     empty seat     →  -(rows from here to the back) × fill × 10
//!     occupied seat  →  static[student][seat]
//!                       + friends × friend_weight × 100
//!                       - enemies × enemy_weight × 5 × 100
//! ```
//!
//! The empty-seat term makes unfilled front seats cost more than unfilled
//! back seats, which packs students toward the front of the room.

use seatplan_engine::{Grid, SeatOccupant, SocialGraph, Weights};

use crate::{SCORE_SCALE, social_score, static_table::StaticScoreTable};

/// Multiplier of the fill weight charged per row behind an empty seat.
pub const EMPTY_SEAT_PENALTY: f64 = 10.0;
/// Multiplier of the enemy weight; enemies are penalized harder than friends are rewarded.
pub const ENEMY_PENALTY_MULTIPLIER: f64 = 5.0;

/// Scores complete seatings for one run.
///
/// Holds everything that stays fixed during a run and is shared read-only by
/// all worker threads.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    grid: Grid,
    weights: Weights,
    social: SocialGraph,
    table: StaticScoreTable,
}

impl FitnessEvaluator {
    /// # Panics
    ///
    /// Panics if the table and the social graph disagree on the number of
    /// students, or the table does not cover every seat of `grid`.
    #[must_use]
    pub fn new(grid: Grid, weights: Weights, social: SocialGraph, table: StaticScoreTable) -> Self {
        assert_eq!(table.seat_count(), grid.seat_count());
        assert_eq!(table.student_count(), social.friends.size());
        assert_eq!(table.student_count(), social.enemies.size());
        Self {
            grid,
            weights,
            social,
            table,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    #[must_use]
    pub fn social(&self) -> &SocialGraph {
        &self.social
    }

    #[must_use]
    pub fn student_count(&self) -> usize {
        self.table.student_count()
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.table.seat_count()
    }

    /// Total fitness of a seating (higher is better).
    #[must_use]
    pub fn fitness(&self, seating: &[usize]) -> f64 {
        debug_assert_eq!(seating.len(), self.seat_count());
        (0..seating.len())
            .map(|seat| self.seat_score(seating, seat))
            .sum()
    }

    /// Contribution of a single seat to [`FitnessEvaluator::fitness`].
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn seat_score(&self, seating: &[usize], seat: usize) -> f64 {
        let (row, column) = self.grid.position(seat);
        let student = match SeatOccupant::decode(seating[seat], self.student_count()) {
            SeatOccupant::Student(student) => student,
            SeatOccupant::Empty => {
                return -(self.grid.rows_from(row) as f64)
                    * self.weights.row_bonus
                    * EMPTY_SEAT_PENALTY;
            }
        };

        let friends = social_score::friend_score(
            student,
            seating,
            row,
            column,
            &self.grid,
            &self.social.friends,
        );
        let enemies = social_score::enemy_penalty(
            student,
            seating,
            row,
            column,
            &self.grid,
            &self.social.enemies,
        );

        self.table.get(student, seat) + friends * self.weights.friend_bonus * SCORE_SCALE
            - enemies * self.weights.enemy_penalty * ENEMY_PENALTY_MULTIPLIER * SCORE_SCALE
    }
}
