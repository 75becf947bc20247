use crate::schema::PriorityWeights;

/// Multipliers applied to each scoring term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weights {
    /// Front-row placement and seat filling.
    pub row_bonus: f64,
    /// Seating preference match.
    pub pref_bonus: f64,
    /// Friends seated nearby.
    pub friend_bonus: f64,
    /// Enemies seated nearby.
    pub enemy_penalty: f64,
    /// Medical seating requirements.
    pub med_penalty: f64,
}

impl Weights {
    /// Sum of the weights of every term that can contribute positively.
    ///
    /// This is the best score a single student can reach.
    #[must_use]
    pub fn max_positive(&self) -> f64 {
        self.med_penalty + self.pref_bonus + self.friend_bonus + self.row_bonus
    }

    /// Iterates over `(name, value)` for every weight.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("fill", self.row_bonus),
            ("preferences", self.pref_bonus),
            ("friends", self.friend_bonus),
            ("enemies", self.enemy_penalty),
            ("medical", self.med_penalty),
        ]
        .into_iter()
    }
}

impl From<PriorityWeights> for Weights {
    fn from(pw: PriorityWeights) -> Self {
        Self {
            row_bonus: pw.fill,
            pref_bonus: pw.preferences,
            friend_bonus: pw.friends,
            enemy_penalty: pw.enemies,
            med_penalty: pw.medical,
        }
    }
}
