//! Friend and enemy relations between students.
//!
//! Both relations are symmetric and stored as dense `N×N` boolean matrices
//! indexed by roster position (`a * N + b`). The fitness function queries them
//! for every neighbor of every seat, so lookups must be a single index
//! operation rather than a hash probe.

use crate::{schema::IdPair, student::Roster};

/// A symmetric boolean relation over roster indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialRelation {
    size: usize,
    cells: Vec<bool>,
}

impl SocialRelation {
    /// Creates an empty relation over `size` students.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds a relation from id pairs.
    ///
    /// Pairs naming an id that is not in the roster are skipped.
    #[must_use]
    pub fn from_id_pairs(roster: &Roster, pairs: &[IdPair]) -> Self {
        let mut relation = Self::new(roster.len());
        for &(id1, id2) in pairs {
            match (roster.index_of(id1), roster.index_of(id2)) {
                (Some(a), Some(b)) => relation.insert(a, b),
                _ => tracing::debug!(id1, id2, "ignoring pair with unknown student id"),
            }
        }
        relation
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Relates `a` and `b` in both directions.
    pub fn insert(&mut self, a: usize, b: usize) {
        assert!(a < self.size && b < self.size, "student index out of range");
        self.cells[a * self.size + b] = true;
        self.cells[b * self.size + a] = true;
    }

    /// Returns true if `a` and `b` are related.
    ///
    /// Indices outside the relation are never related.
    #[must_use]
    #[inline]
    pub fn contains(&self, a: usize, b: usize) -> bool {
        a < self.size && b < self.size && self.cells[a * self.size + b]
    }

    /// Number of related unordered pairs, self-pairs included once.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        (0..self.size)
            .flat_map(|a| (a..self.size).map(move |b| (a, b)))
            .filter(|&(a, b)| self.contains(a, b))
            .count()
    }
}

/// The friend and enemy relations of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialGraph {
    pub friends: SocialRelation,
    pub enemies: SocialRelation,
}

impl SocialGraph {
    #[must_use]
    pub fn build(roster: &Roster, friend_pairs: &[IdPair], enemy_pairs: &[IdPair]) -> Self {
        let graph = Self {
            friends: SocialRelation::from_id_pairs(roster, friend_pairs),
            enemies: SocialRelation::from_id_pairs(roster, enemy_pairs),
        };
        tracing::debug!(
            friends = graph.friends.pair_count(),
            enemies = graph.enemies.pair_count(),
            "social graph built"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StudentRecord;

    fn roster(ids: &[i64]) -> Roster {
        let records = ids
            .iter()
            .map(|&id| StudentRecord {
                id,
                ..StudentRecord::default()
            })
            .collect::<Vec<_>>();
        Roster::new(&records)
    }

    #[test]
    fn test_relations_are_symmetric() {
        let roster = roster(&[10, 20, 30, 40]);
        let graph = SocialGraph::build(&roster, &[(10, 30), (40, 20)], &[(20, 10)]);
        for a in 0..roster.len() {
            for b in 0..roster.len() {
                assert_eq!(graph.friends.contains(a, b), graph.friends.contains(b, a));
                assert_eq!(graph.enemies.contains(a, b), graph.enemies.contains(b, a));
            }
        }
        assert!(graph.friends.contains(0, 2));
        assert!(graph.friends.contains(1, 3));
        assert!(!graph.friends.contains(0, 1));
        assert!(graph.enemies.contains(0, 1));
        assert_eq!(graph.friends.pair_count(), 2);
        assert_eq!(graph.enemies.pair_count(), 1);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let roster = roster(&[1, 2]);
        let graph = SocialGraph::build(&roster, &[(1, 99), (98, 2), (97, 96)], &[(3, 1)]);
        assert_eq!(graph.friends.pair_count(), 0);
        assert_eq!(graph.enemies.pair_count(), 0);
    }

    #[test]
    fn test_out_of_range_lookup() {
        let relation = SocialRelation::new(2);
        assert!(!relation.contains(0, 5));
        assert!(!relation.contains(7, 1));
    }

    #[test]
    fn test_empty_roster() {
        let graph = SocialGraph::build(&Roster::default(), &[(1, 2)], &[]);
        assert_eq!(graph.friends.size(), 0);
    }
}
