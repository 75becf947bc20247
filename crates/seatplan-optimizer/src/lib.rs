//! Genetic search for classroom seatings.
//!
//! This crate turns a [`SeatingRequest`](seatplan_engine::schema::SeatingRequest)
//! into a [`SeatingResponse`](seatplan_engine::schema::SeatingResponse) by
//! evolving a population of seatings against the fitness function of
//! `seatplan-evaluator`.
//!
//! # How Solving Works
//!
//! 1. **Validate** - Reject grids, populations, and weights the engine cannot run
//! 2. **Precompute** - Build the social graph and the static score table concurrently
//! 3. **Evolve** - Run the generation loop for the requested number of generations
//! 4. **Project** - Convert the best seating into per-seat records with satisfaction details
//!
//! # Architecture
//!
//! ```text
//! SeatingRequest
//!     ↓ validated by
//! SeatingSolver (solver)
//!     ↓ builds
//! FitnessEvaluator (seatplan-evaluator)
//!     ↓ drives
//! Evolver / Population (genetic)
//!     ↓ uses
//! Order crossover, swap mutation (permutation)
//!     ↓ produces
//! Best seating → SeatingResponse
//! ```
//!
//! # Genetic Algorithm Parameters
//!
//! - **Population size** - `PopSize` seatings per generation
//! - **Generations** - `Generations` iterations, no early termination
//! - **Mutation chance** - `MutationChance`, probability of one swap per offspring
//! - **Tournament size** - [`genetic::TOURNAMENT_SIZE`]
//! - **Local search rounds** - [`genetic::LOCAL_SEARCH_ROUNDS`] swaps tried on the elite
//!
//! See the [`genetic`] module for the generation loop and its parallelization.
//!
//! # Example
//!
//! ```rust,ignore
//! use seatplan_optimizer::SeatingSolver;
//!
//! let response = SeatingSolver::default().solve(&request)?;
//! println!("fitness = {}", response.fitness);
//! ```

pub use self::solver::{SeatingSolver, SolveError, run};

pub mod genetic;
pub mod permutation;
pub mod solver;
