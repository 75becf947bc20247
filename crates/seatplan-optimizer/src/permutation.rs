//! Permutation-preserving genetic operators.
//!
//! Every seating is a permutation of `0..seat_count`, and every operator here
//! maps permutations to permutations. None of them allocate: callers provide
//! the output slice and, for crossover, a scratch buffer, so that the same
//! buffers can be reused generation after generation.

use rand::Rng;

/// Order crossover (OX) with random cut points.
///
/// Picks `start` and `end` uniformly (swapping them if needed), then delegates
/// to [`order_crossover_at`].
///
/// # Panics
///
/// Panics if the parents are empty or the slices differ in length.
pub fn order_crossover<R>(
    parent1: &[usize],
    parent2: &[usize],
    child: &mut [usize],
    used: &mut [bool],
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let len = parent1.len();
    let mut start = rng.random_range(0..len);
    let mut end = rng.random_range(0..len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    order_crossover_at(parent1, parent2, child, used, start, end);
}

/// Order crossover (OX) with fixed cut points.
///
/// Copies `parent1[start..=end]` into the child verbatim, then fills the
/// remaining positions from left to right with the values of `parent2` in
/// their original order, skipping values already placed. Every value is placed
/// at most once and the scan over `parent2` covers every value, so the child is
/// a permutation whenever both parents are.
///
/// # Panics
///
/// Panics if `start > end`, `end` is out of range, or the slices differ in length.
pub fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    child: &mut [usize],
    used: &mut [bool],
    start: usize,
    end: usize,
) {
    let len = parent1.len();
    assert!(start <= end && end < len, "invalid cut points {start}..={end} for length {len}");
    assert_eq!(parent2.len(), len);
    assert_eq!(child.len(), len);
    assert_eq!(used.len(), len);

    used.fill(false);
    for i in start..=end {
        child[i] = parent1[i];
        used[child[i]] = true;
    }

    let mut donor = parent2.iter().copied().filter(|&value| !used[value]);
    for i in (0..start).chain(end + 1..len) {
        if let Some(value) = donor.next() {
            child[i] = value;
        }
    }
}

/// Swaps the occupants of two uniformly random seats.
///
/// Both positions may coincide, in which case the seating is unchanged.
pub fn swap_mutation<R>(seating: &mut [usize], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let i = rng.random_range(0..seating.len());
    let j = rng.random_range(0..seating.len());
    seating.swap(i, j);
}
