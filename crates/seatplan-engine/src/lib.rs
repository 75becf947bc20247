//! Domain model for classroom seating optimization.
//!
//! This crate defines everything the optimizer and the evaluator agree on:
//!
//! - [`schema`] - The JSON wire format (request and response records)
//! - [`classroom`] - Grid geometry, seat indexing, and desk grouping
//! - [`student`] - Derived student profiles and the id→index roster
//! - [`social`] - Symmetric friend/enemy relations between students
//! - [`weights`] - Scoring weights derived from request priorities
//! - [`seating`] - Candidate seatings (permutations over seat indices)
//!
//! # Seating Encoding
//!
//! A candidate seating for an R×C classroom is a permutation of `0..R·C`.
//! Position `i` of the permutation is seat `i` (`row = i / C`, `col = i % C`),
//! and the value stored there names its occupant:
//!
//! ```text
//! value <  N  → student with roster index `value`
//! value >= N  → empty seat (padding)
//! ```
//!
//! Keeping empty seats inside the permutation means every genetic operator only
//! has to preserve the bijection; it never has to know how many students exist.

pub use self::{
    classroom::{DeskType, Grid},
    seating::SeatOccupant,
    social::{SocialGraph, SocialRelation},
    student::{Roster, StudentProfile},
    weights::Weights,
};

pub mod classroom;
pub mod schema;
pub mod seating;
pub mod social;
pub mod student;
pub mod weights;
