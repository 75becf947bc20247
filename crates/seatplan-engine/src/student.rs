//! Students as the scorer sees them.
//!
//! A [`StudentProfile`] wraps the submitted [`StudentRecord`] together with its
//! roster index and hash sets built from the preference lists, so that the
//! scoring loops only ever do O(1) membership checks.

use std::collections::{HashMap, HashSet};

use crate::schema::StudentRecord;

/// A student record plus precomputed lookup sets.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    record: StudentRecord,
    index: usize,
    preferred_rows: HashSet<usize>,
    preferred_columns: HashSet<usize>,
    medical_rows: HashSet<usize>,
    medical_columns: HashSet<usize>,
}

impl StudentProfile {
    #[must_use]
    pub fn new(index: usize, record: StudentRecord) -> Self {
        let set = |values: &[usize]| values.iter().copied().collect::<HashSet<_>>();
        Self {
            preferred_rows: set(&record.preferred_rows),
            preferred_columns: set(&record.preferred_columns),
            medical_rows: set(&record.medical_preferred_rows),
            medical_columns: set(&record.medical_preferred_columns),
            record,
            index,
        }
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.record.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Position of this student in the roster.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn preferred_rows(&self) -> &HashSet<usize> {
        &self.preferred_rows
    }

    #[must_use]
    pub fn preferred_columns(&self) -> &HashSet<usize> {
        &self.preferred_columns
    }

    #[must_use]
    pub fn medical_rows(&self) -> &HashSet<usize> {
        &self.medical_rows
    }

    #[must_use]
    pub fn medical_columns(&self) -> &HashSet<usize> {
        &self.medical_columns
    }

    #[must_use]
    pub fn has_preferences(&self) -> bool {
        !self.preferred_rows.is_empty() || !self.preferred_columns.is_empty()
    }

    #[must_use]
    pub fn has_medical_constraints(&self) -> bool {
        !self.medical_rows.is_empty() || !self.medical_columns.is_empty()
    }
}

/// All students of a run, addressable by roster index or by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    profiles: Vec<StudentProfile>,
    index_by_id: HashMap<i64, usize>,
}

impl Roster {
    /// Builds the roster in submission order.
    ///
    /// If two records share an id, the id resolves to the later one.
    #[must_use]
    pub fn new(records: &[StudentRecord]) -> Self {
        let mut index_by_id = HashMap::with_capacity(records.len());
        let profiles = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if index_by_id.insert(record.id, index).is_some() {
                    tracing::warn!(id = record.id, "duplicate student id; later record wins");
                }
                StudentProfile::new(index, record.clone())
            })
            .collect();
        Self {
            profiles,
            index_by_id,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    #[must_use]
    pub fn profiles(&self) -> &[StudentProfile] {
        &self.profiles
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StudentProfile> {
        self.profiles.get(index)
    }

    #[must_use]
    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }
}
