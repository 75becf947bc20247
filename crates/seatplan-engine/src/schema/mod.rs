//! JSON wire format shared by every entry point.
//!
//! Field names follow the `PascalCase` convention of the seating frontend
//! (`PopSize`, `ClassConfig`, `StudentID`, ...). Missing lists and numbers
//! default to empty / zero so that partially filled forms still decode.

pub use self::{request::*, response::*};

mod request;
mod response;
