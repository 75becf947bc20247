use serde::{Deserialize, Serialize};

/// Student id reported for an empty seat.
pub const EMPTY_STUDENT_ID: i64 = -1;

/// Student name reported for an empty seat.
pub const EMPTY_STUDENT_NAME: &str = "-";

/// Per-student breakdown of how well a seat fits.
///
/// Every term is already multiplied by its priority weight. `level` is the
/// fraction of the achievable positive score that this seat reaches, in
/// `0.0..=1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SatisfactionDetails {
    pub total: f64,
    pub medical: f64,
    pub friends: f64,
    pub enemies: f64,
    pub pref: f64,
    pub row_bonus: f64,
    pub level: f64,
    pub complaints: Vec<String>,
}

/// One seat of the final seating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeatAssignment {
    #[serde(rename = "SeatID")]
    pub seat_id: usize,
    pub row: usize,
    pub column: usize,
    pub student: String,
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    pub satisfaction: SatisfactionDetails,
}

impl SeatAssignment {
    /// Creates the record for a seat nobody sits on.
    #[must_use]
    pub fn empty(seat_id: usize, row: usize, column: usize) -> Self {
        Self {
            seat_id,
            row,
            column,
            student: EMPTY_STUDENT_NAME.to_owned(),
            student_id: EMPTY_STUDENT_ID,
            satisfaction: SatisfactionDetails::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.student_id == EMPTY_STUDENT_ID
    }
}

/// Result of one optimization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeatingResponse {
    /// One record per seat, in seat index order.
    pub seating: Vec<SeatAssignment>,
    /// Fitness of the winning seating.
    pub fitness: f64,
    /// Ids of students that could not be seated because the room is full.
    pub ignored: Vec<i64>,
}
