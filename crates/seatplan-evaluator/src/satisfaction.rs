//! Human-readable report for the winning seating.
//!
//! The optimizer only needs a single number, but teachers reviewing a seating
//! plan want to know why a student sits where they sit. For every occupied
//! seat this module recomputes each scoring term (weighted, but not scaled by
//! [`SCORE_SCALE`](crate::SCORE_SCALE)) and derives:
//!
//! - **level**: achieved positive terms divided by the best achievable score
//!   ([`Weights::max_positive`]), in `0.0..=1.0`
//! - **complaints**: one message per violated rule
//!
//! A violated medical requirement forces the level to `0.0`. An enemy within
//! two seats halves it.

use seatplan_engine::{
    Roster, SeatOccupant, StudentProfile,
    schema::{SatisfactionDetails, SeatAssignment},
};

use crate::{
    fitness::{ENEMY_PENALTY_MULTIPLIER, FitnessEvaluator},
    placement::{self, MedicalFit},
    social_score,
};

/// Multiplier of the medical weight reported when a medical requirement is violated.
pub const REPORTED_MEDICAL_VIOLATION_PENALTY: f64 = 10.0;
/// Factor applied to the level when an enemy sits nearby.
pub const ENEMY_NEARBY_LEVEL_FACTOR: f64 = 0.5;

pub const MEDICAL_COMPLAINT: &str = "medical seating requirement violated";
pub const ENEMY_COMPLAINT: &str = "seated near an unwanted classmate";

/// Breaks down the satisfaction of `student` sitting on `seat` of `seating`.
#[must_use]
pub fn satisfaction_details(
    evaluator: &FitnessEvaluator,
    student: &StudentProfile,
    seating: &[usize],
    seat: usize,
) -> SatisfactionDetails {
    let grid = evaluator.grid();
    let w = evaluator.weights();
    let social = evaluator.social();
    let (row, column) = grid.position(seat);
    let index = student.index();

    let medical_fit = MedicalFit::evaluate(student, row, column);
    let preference = placement::preference_score(student, row, column);
    let position = placement::position_score(row, grid.rows());
    let friends = social_score::friend_score(index, seating, row, column, grid, &social.friends);
    let enemies = social_score::enemy_penalty(index, seating, row, column, grid, &social.enemies);

    let medical = match medical_fit {
        MedicalFit::Violated => -w.med_penalty * REPORTED_MEDICAL_VIOLATION_PENALTY,
        fit => fit.score() * w.med_penalty,
    };
    let mut details = SatisfactionDetails {
        medical,
        pref: preference * w.pref_bonus,
        friends: friends * w.friend_bonus,
        enemies: -enemies * w.enemy_penalty * ENEMY_PENALTY_MULTIPLIER,
        row_bonus: position * w.row_bonus,
        ..SatisfactionDetails::default()
    };
    details.total =
        details.medical + details.pref + details.friends + details.row_bonus + details.enemies;

    let max_possible = w.max_positive();
    details.level = if max_possible <= 0.0 {
        1.0
    } else {
        let achieved =
            details.medical.max(0.0) + details.pref + details.friends + details.row_bonus;
        achieved / max_possible
    };

    if medical_fit.is_violated() {
        details.level = 0.0;
        details.complaints.push(MEDICAL_COMPLAINT.to_owned());
    }
    if enemies > 0.0 {
        details.level *= ENEMY_NEARBY_LEVEL_FACTOR;
        details.complaints.push(ENEMY_COMPLAINT.to_owned());
    }
    details
}

/// Converts a seating into one record per seat.
///
/// # Panics
///
/// Panics if `roster` has fewer students than `evaluator` was built for.
#[must_use]
pub fn project(
    evaluator: &FitnessEvaluator,
    roster: &Roster,
    seating: &[usize],
) -> Vec<SeatAssignment> {
    let grid = evaluator.grid();
    seating
        .iter()
        .enumerate()
        .map(|(seat, &value)| {
            let (row, column) = grid.position(seat);
            match SeatOccupant::decode(value, evaluator.student_count()) {
                SeatOccupant::Empty => SeatAssignment::empty(seat, row, column),
                SeatOccupant::Student(index) => {
                    let student = &roster.profiles()[index];
                    SeatAssignment {
                        seat_id: seat,
                        row,
                        column,
                        student: student.name().to_owned(),
                        student_id: student.id(),
                        satisfaction: satisfaction_details(evaluator, student, seating, seat),
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use seatplan_engine::{DeskType, Grid, SocialGraph, Weights, schema::StudentRecord};

    use super::*;
    use crate::StaticScoreTable;

    const EPS: f64 = 1e-9;

    fn setup(
        records: &[StudentRecord],
        grid: Grid,
        weights: Weights,
        friends: &[(i64, i64)],
        enemies: &[(i64, i64)],
    ) -> (Roster, FitnessEvaluator) {
        let roster = Roster::new(records);
        let social = SocialGraph::build(&roster, friends, enemies);
        let table = StaticScoreTable::build(&roster, &grid, &weights);
        let evaluator = FitnessEvaluator::new(grid, weights, social, table);
        (roster, evaluator)
    }

    fn student(id: i64, name: &str) -> StudentRecord {
        StudentRecord {
            id,
            name: name.to_owned(),
            ..StudentRecord::default()
        }
    }

    fn even_weights() -> Weights {
        Weights {
            row_bonus: 1.0,
            pref_bonus: 1.0,
            friend_bonus: 1.0,
            enemy_penalty: 1.0,
            med_penalty: 1.0,
        }
    }

    #[test]
    fn test_medical_violation_forces_zero_level() {
        let records = [StudentRecord {
            medical_preferred_rows: vec![5],
            ..student(1, "Ann")
        }];
        let grid = Grid::new(1, 1, DeskType::Single);
        let (roster, eval) = setup(&records, grid, even_weights(), &[], &[]);
        let seats = project(&eval, &roster, &[0]);
        let details = &seats[0].satisfaction;
        assert!(details.medical < 0.0);
        assert!((details.medical + 10.0).abs() < EPS);
        assert!(details.level.abs() < EPS);
        assert_eq!(details.complaints, vec![MEDICAL_COMPLAINT.to_owned()]);
    }

    #[test]
    fn test_level_of_happy_student() {
        let records = [student(1, "Ann")];
        let weights = Weights {
            med_penalty: 0.0,
            friend_bonus: 0.0,
            ..even_weights()
        };
        let (roster, eval) = setup(&records, Grid::new(2, 1, DeskType::Single), weights, &[], &[]);
        let seats = project(&eval, &roster, &[0, 1]);
        let details = &seats[0].satisfaction;
        assert!((details.pref - 1.0).abs() < EPS);
        assert!((details.row_bonus - 1.0).abs() < EPS);
        assert!((details.total - 2.0).abs() < EPS);
        assert!((details.level - 1.0).abs() < EPS);
        assert!(details.complaints.is_empty());
        assert!(seats[1].is_empty());
        assert_eq!(seats[1].student, "-");
    }

    #[test]
    fn test_enemy_nearby_halves_level() {
        let records = [student(1, "Ann"), student(2, "Bob")];
        let grid = Grid::new(1, 2, DeskType::Pair);
        let (roster, eval) = setup(&records, grid, even_weights(), &[], &[(1, 2)]);
        let seats = project(&eval, &roster, &[0, 1]);
        let details = &seats[0].satisfaction;
        // medical unconstrained (0), pref 1, friends 0, row 1 → 2 / 4, halved
        assert!((details.level - 0.25).abs() < EPS);
        assert!((details.enemies + 5.0).abs() < EPS);
        assert_eq!(details.complaints, vec![ENEMY_COMPLAINT.to_owned()]);
        assert_eq!(seats[1].student_id, 2);
        assert_eq!(seats[1].student, "Bob");
    }

    #[test]
    fn test_friends_at_same_desk() {
        let records = [student(1, "Ann"), student(2, "Bob")];
        let grid = Grid::new(1, 2, DeskType::Pair);
        let (roster, eval) = setup(&records, grid, even_weights(), &[(2, 1)], &[]);
        let seats = project(&eval, &roster, &[1, 0]);
        assert_eq!(seats[0].student_id, 2);
        assert!((seats[0].satisfaction.friends - 1.0 / 1.5).abs() < EPS);
        assert!((seats[1].satisfaction.friends - 1.0 / 1.5).abs() < EPS);
    }

    #[test]
    fn test_zero_weights_report_full_level() {
        let records = [student(1, "Ann")];
        let grid = Grid::new(1, 1, DeskType::Single);
        let (roster, eval) = setup(&records, grid, Weights::default(), &[], &[]);
        let seats = project(&eval, &roster, &[0]);
        assert!((seats[0].satisfaction.level - 1.0).abs() < EPS);
        assert!(seats[0].satisfaction.total.abs() < EPS);
    }
}
