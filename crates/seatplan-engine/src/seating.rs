//! Candidate seatings.
//!
//! A seating is a plain `[usize]` slice holding a permutation of
//! `0..seat_count`; see the crate documentation for the encoding. Populations
//! store many seatings back to back in one buffer, so the helpers here work on
//! borrowed slices rather than an owning wrapper type.

use rand::{Rng, seq::SliceRandom};

/// What a permutation value means for a given number of students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SeatOccupant {
    Student(usize),
    Empty,
}

impl SeatOccupant {
    #[must_use]
    #[inline]
    pub const fn decode(value: usize, student_count: usize) -> Self {
        if value < student_count {
            Self::Student(value)
        } else {
            Self::Empty
        }
    }
}

/// Overwrites `seating` with the identity permutation.
pub fn fill_identity(seating: &mut [usize]) {
    for (seat, value) in seating.iter_mut().enumerate() {
        *value = seat;
    }
}

/// Overwrites `seating` with a uniformly random permutation.
pub fn fill_random<R>(seating: &mut [usize], rng: &mut R)
where
    R: Rng + ?Sized,
{
    fill_identity(seating);
    seating.shuffle(rng);
}

/// Returns true if `seating` holds every value of `0..seating.len()` exactly once.
#[must_use]
pub fn is_permutation(seating: &[usize]) -> bool {
    let mut seen = vec![false; seating.len()];
    for &value in seating {
        match seen.get_mut(value) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
