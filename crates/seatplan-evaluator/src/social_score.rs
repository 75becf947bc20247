//! Social terms that depend on who actually sits nearby.
//!
//! Friends are looked for among the eight seats around a student; enemies
//! within a 5×5 square (two seats in every direction). Each neighbor found
//! contributes according to how close it is:
//!
//! | neighbor                        | friend bonus | enemy penalty |
//! |---------------------------------|--------------|---------------|
//! | same row, same desk             | 1.0          | 1.0           |
//! | same column, adjacent row       | 0.7          | 0.8           |
//! | same row, adjacent column       | 0.5          | 0.8           |
//! | diagonal                        | 0.2          | 0.8           |
//! | two seats away on either axis   | -            | 0.5           |
//!
//! Neighbors outside the grid and empty seats are skipped.

use seatplan_engine::{Grid, SeatOccupant, SocialRelation};

/// Radius of the friend neighborhood (Chebyshev distance).
pub const FRIEND_RADIUS: isize = 1;
/// Radius of the enemy neighborhood (Chebyshev distance).
pub const ENEMY_RADIUS: isize = 2;
/// Largest friend bonus that still counts; the normalized score divides by it.
pub const FRIEND_SCORE_CAP: f64 = 1.5;

/// A neighboring seat, relative to the seat being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Neighbor {
    d_row: isize,
    d_col: isize,
    column: usize,
    occupant: SeatOccupant,
}

/// Iterates over the seats within `radius` of `(row, column)`, excluding itself.
fn neighbors<'a>(
    seating: &'a [usize],
    grid: &'a Grid,
    student_count: usize,
    row: usize,
    column: usize,
    radius: isize,
) -> impl Iterator<Item = Neighbor> + 'a {
    (-radius..=radius)
        .flat_map(move |d_row| (-radius..=radius).map(move |d_col| (d_row, d_col)))
        .filter(|&offset| offset != (0, 0))
        .filter_map(move |(d_row, d_col)| {
            let seat = grid.offset_seat(row, column, d_row, d_col)?;
            Some(Neighbor {
                d_row,
                d_col,
                column: seat % grid.columns(),
                occupant: SeatOccupant::decode(seating[seat], student_count),
            })
        })
}

fn friend_bonus(neighbor: &Neighbor, grid: &Grid, column: usize) -> f64 {
    match (neighbor.d_row.abs(), neighbor.d_col.abs()) {
        (0, _) if grid.is_same_desk(column, neighbor.column) => 1.0,
        (1, 0) => 0.7,
        (0, 1) => 0.5,
        _ => 0.2,
    }
}

fn enemy_penalty_for(neighbor: &Neighbor, grid: &Grid, column: usize) -> f64 {
    match (neighbor.d_row.abs(), neighbor.d_col.abs()) {
        (0, _) if grid.is_same_desk(column, neighbor.column) => 1.0,
        (0 | 1, 0 | 1) => 0.8,
        _ => 0.5,
    }
}

/// Normalized friend proximity of `student` at `(row, column)`, in `0.0..=1.0`.
#[must_use]
pub fn friend_score(
    student: usize,
    seating: &[usize],
    row: usize,
    column: usize,
    grid: &Grid,
    friends: &SocialRelation,
) -> f64 {
    let score = neighbors(seating, grid, friends.size(), row, column, FRIEND_RADIUS)
        .filter(|n| {
            matches!(n.occupant, SeatOccupant::Student(other) if friends.contains(student, other))
        })
        .map(|n| friend_bonus(&n, grid, column))
        .sum::<f64>();
    score.min(FRIEND_SCORE_CAP) / FRIEND_SCORE_CAP
}

/// Accumulated enemy proximity of `student` at `(row, column)`; `0.0` when no
/// enemy sits within two seats.
#[must_use]
pub fn enemy_penalty(
    student: usize,
    seating: &[usize],
    row: usize,
    column: usize,
    grid: &Grid,
    enemies: &SocialRelation,
) -> f64 {
    neighbors(seating, grid, enemies.size(), row, column, ENEMY_RADIUS)
        .filter(|n| {
            matches!(n.occupant, SeatOccupant::Student(other) if enemies.contains(student, other))
        })
        .map(|n| enemy_penalty_for(&n, grid, column))
        .sum()
}
