//! Placement terms that depend only on the student and the seat.

use seatplan_engine::StudentProfile;

/// How far forward a row is: `1.0` for the front row, `0.0` for the back row.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn position_score(row: usize, total_rows: usize) -> f64 {
    if total_rows <= 1 {
        return 1.0;
    }
    1.0 - (row as f64 / (total_rows - 1) as f64)
}

/// Fraction of the student's row/column preferences met by the seat.
///
/// Students without any preference are satisfied anywhere.
#[must_use]
pub fn preference_score(student: &StudentProfile, row: usize, column: usize) -> f64 {
    if !student.has_preferences() {
        return 1.0;
    }
    let mut score = 0.0;
    if student.preferred_rows().contains(&row) {
        score += 1.0;
    }
    if student.preferred_columns().contains(&column) {
        score += 1.0;
    }
    score / 2.0
}

/// How well a seat matches a student's medical seating requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MedicalFit {
    /// The student has no medical requirements.
    Unconstrained,
    /// Every required axis matches.
    Satisfied,
    /// Requirements on both axes, only one matches.
    Partial,
    /// No required axis matches.
    Violated,
}

impl MedicalFit {
    #[must_use]
    pub fn evaluate(student: &StudentProfile, row: usize, column: usize) -> Self {
        if !student.has_medical_constraints() {
            return Self::Unconstrained;
        }
        let rows = student.medical_rows();
        let columns = student.medical_columns();
        let row_match = rows.contains(&row);
        let column_match = columns.contains(&column);
        if !rows.is_empty() && !columns.is_empty() {
            return match (row_match, column_match) {
                (true, true) => Self::Satisfied,
                (true, false) | (false, true) => Self::Partial,
                (false, false) => Self::Violated,
            };
        }
        if row_match || column_match {
            Self::Satisfied
        } else {
            Self::Violated
        }
    }

    /// Numeric tier: `0.0`, `1.0`, `0.1` or `-1.0`.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Unconstrained => 0.0,
            Self::Satisfied => 1.0,
            Self::Partial => 0.1,
            Self::Violated => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use seatplan_engine::schema::StudentRecord;

    use super::*;

    fn profile(record: StudentRecord) -> StudentProfile {
        StudentProfile::new(0, record)
    }

    #[test]
    fn test_position_score() {
        assert!((position_score(0, 1) - 1.0).abs() < f64::EPSILON);
        assert!((position_score(0, 0) - 1.0).abs() < f64::EPSILON);
        assert!((position_score(0, 5) - 1.0).abs() < f64::EPSILON);
        assert!((position_score(4, 5) - 0.0).abs() < f64::EPSILON);
        assert!((position_score(2, 5) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_preferences_score_maximum() {
        let student = profile(StudentRecord::default());
        for row in 0..4 {
            for column in 0..4 {
                assert!((preference_score(&student, row, column) - 1.0).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_partial_preferences() {
        let student = profile(StudentRecord {
            preferred_rows: vec![0],
            preferred_columns: vec![2],
            ..StudentRecord::default()
        });
        assert!((preference_score(&student, 0, 2) - 1.0).abs() < f64::EPSILON);
        assert!((preference_score(&student, 0, 1) - 0.5).abs() < f64::EPSILON);
        assert!((preference_score(&student, 3, 2) - 0.5).abs() < f64::EPSILON);
        assert!(preference_score(&student, 3, 3).abs() < f64::EPSILON);

        let rows_only = profile(StudentRecord {
            preferred_rows: vec![1],
            ..StudentRecord::default()
        });
        assert!((preference_score(&rows_only, 1, 9) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_medical_tiers_both_axes() {
        let student = profile(StudentRecord {
            medical_preferred_rows: vec![0],
            medical_preferred_columns: vec![1],
            ..StudentRecord::default()
        });
        assert_eq!(MedicalFit::evaluate(&student, 0, 1), MedicalFit::Satisfied);
        assert_eq!(MedicalFit::evaluate(&student, 0, 0), MedicalFit::Partial);
        assert_eq!(MedicalFit::evaluate(&student, 2, 1), MedicalFit::Partial);
        assert_eq!(MedicalFit::evaluate(&student, 2, 2), MedicalFit::Violated);
    }

    #[test]
    fn test_medical_tiers_single_axis() {
        let student = profile(StudentRecord {
            medical_preferred_rows: vec![5],
            ..StudentRecord::default()
        });
        assert_eq!(MedicalFit::evaluate(&student, 5, 3), MedicalFit::Satisfied);
        assert_eq!(MedicalFit::evaluate(&student, 0, 0), MedicalFit::Violated);
        assert!(MedicalFit::evaluate(&profile(StudentRecord::default()), 0, 0).is_unconstrained());
    }

    #[test]
    fn test_medical_scores() {
        assert!(MedicalFit::Unconstrained.score().abs() < f64::EPSILON);
        assert!((MedicalFit::Satisfied.score() - 1.0).abs() < f64::EPSILON);
        assert!((MedicalFit::Partial.score() - 0.1).abs() < f64::EPSILON);
        assert!((MedicalFit::Violated.score() + 1.0).abs() < f64::EPSILON);
    }
}
