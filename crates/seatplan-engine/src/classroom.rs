//! Classroom geometry: seat indexing, rows, columns, and desk grouping.
//!
//! Seats are numbered row-major. For a grid with `C` columns, seat `i` sits at
//! row `i / C` and column `i % C`. Row 0 is the front of the classroom.
//!
//! Adjacent columns are grouped into desks of one or two seats
//! (see [`DeskType`]). Two students sharing a desk are the closest pair the
//! social scoring knows about.

use serde::{Deserialize, Serialize};

use crate::schema::ClassConfig;

/// How many seats a desk holds.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum DeskType {
    /// One seat per desk.
    #[display("single")]
    Single,
    /// Two seats per desk. Any desk type other than `"single"` decodes to this.
    #[default]
    #[serde(other)]
    #[display("pair")]
    Pair,
}

impl DeskType {
    #[must_use]
    pub const fn seats_per_desk(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Pair => 2,
        }
    }

    /// Returns the desk number of a column.
    #[must_use]
    pub const fn desk_of(self, column: usize) -> usize {
        column / self.seats_per_desk()
    }
}

/// The seat layout of a classroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    desk_type: DeskType,
}

impl Grid {
    #[must_use]
    pub const fn new(rows: usize, columns: usize, desk_type: DeskType) -> Self {
        Self {
            rows,
            columns,
            desk_type,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn desk_type(&self) -> DeskType {
        self.desk_type
    }

    /// Total number of seats, or `None` if `rows × columns` overflows.
    #[must_use]
    pub const fn checked_seat_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// Total number of seats.
    ///
    /// # Panics
    ///
    /// Panics if `rows × columns` overflows. Use [`Grid::checked_seat_count`] to
    /// validate untrusted dimensions first.
    #[must_use]
    pub const fn seat_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Returns `(row, column)` of a seat index.
    #[must_use]
    pub const fn position(&self, seat: usize) -> (usize, usize) {
        (seat / self.columns, seat % self.columns)
    }

    /// Returns the seat index at `(row, column)`.
    #[must_use]
    pub const fn seat_at(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Returns the seat index at a signed offset from `(row, column)`, or `None`
    /// when the offset leaves the grid.
    #[must_use]
    pub fn offset_seat(
        &self,
        row: usize,
        column: usize,
        d_row: isize,
        d_col: isize,
    ) -> Option<usize> {
        let row = row.checked_add_signed(d_row).filter(|&r| r < self.rows)?;
        let column = column
            .checked_add_signed(d_col)
            .filter(|&c| c < self.columns)?;
        Some(self.seat_at(row, column))
    }

    /// Returns true if two columns of the same row share a desk.
    #[must_use]
    pub const fn is_same_desk(&self, col1: usize, col2: usize) -> bool {
        self.desk_type.desk_of(col1) == self.desk_type.desk_of(col2)
    }

    /// Number of rows from `row` to the back of the room, `row` included.
    #[must_use]
    pub const fn rows_from(&self, row: usize) -> usize {
        self.rows.saturating_sub(row)
    }
}

impl From<ClassConfig> for Grid {
    fn from(config: ClassConfig) -> Self {
        Self::new(config.rows, config.columns, config.desk_type)
    }
}
