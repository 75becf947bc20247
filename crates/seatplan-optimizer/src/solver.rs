use std::{num::NonZeroUsize, panic, thread};

use rand::Rng as _;
use seatplan_engine::{
    Grid, Roster, SocialGraph, StudentProfile, Weights,
    schema::{SeatingRequest, SeatingResponse},
    seating,
};
use seatplan_evaluator::{FitnessEvaluator, StaticScoreTable, satisfaction};

use crate::genetic::{Evolver, GeneticParams};

/// A request the solver cannot run.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    #[display("classroom of {rows}x{columns} seats is too large")]
    GridTooLarge { rows: usize, columns: usize },
    #[display("{students} students over {seats} seats exceed the memory limit")]
    ProblemTooLarge { students: usize, seats: usize },
    #[display("population of {population} seatings over {seats} seats exceeds the memory limit")]
    PopulationTooLarge { population: usize, seats: usize },
    #[display("mutation chance must be within [0, 1], got {value}")]
    InvalidMutationChance { value: f64 },
    #[display("weight {name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Largest table, in bytes, a single solve may allocate.
pub const MAX_BUFFER_BYTES: usize = 1 << 30;

/// Bytes taken by `copies` buffers of `elements` values of `T`, or `None` if
/// that exceeds [`MAX_BUFFER_BYTES`].
fn buffer_bytes<T>(elements: usize, copies: usize) -> Option<usize> {
    elements
        .checked_mul(size_of::<T>())?
        .checked_mul(copies)
        .filter(|&bytes| bytes <= MAX_BUFFER_BYTES)
}

/// Checks that `request` can be run and returns its seat count.
fn validate(
    request: &SeatingRequest,
    grid: &Grid,
    weights: &Weights,
) -> Result<usize, SolveError> {
    let seats = grid.checked_seat_count().ok_or(SolveError::GridTooLarge {
        rows: grid.rows(),
        columns: grid.columns(),
    })?;

    // static score table, plus the friend and enemy matrices
    let students = request.students.len();
    let table = students
        .checked_mul(seats)
        .and_then(|cells| buffer_bytes::<f64>(cells, 1));
    let social = students
        .checked_mul(students)
        .and_then(|cells| buffer_bytes::<bool>(cells, 2));
    if table.is_none() || social.is_none() {
        return Err(SolveError::ProblemTooLarge { students, seats });
    }

    // current and next population, plus one score per member
    let population = request.pop_size;
    let members = population
        .checked_mul(seats)
        .and_then(|cells| buffer_bytes::<usize>(cells, 2));
    let scores = buffer_bytes::<f64>(population, 1);
    if members.is_none() || scores.is_none() {
        return Err(SolveError::PopulationTooLarge { population, seats });
    }

    let value = request.mutation_chance;
    if !(0.0..=1.0).contains(&value) {
        return Err(SolveError::InvalidMutationChance { value });
    }

    if let Some((name, value)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(SolveError::InvalidWeight { name, value });
    }

    Ok(seats)
}

/// Runs requests with a fixed number of worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatingSolver {
    workers: NonZeroUsize,
}

impl Default for SeatingSolver {
    fn default() -> Self {
        Self::with_workers(thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }
}

impl SeatingSolver {
    #[must_use]
    pub const fn with_workers(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    #[must_use]
    pub const fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Optimizes the seating described by `request`.
    ///
    /// Degenerate requests are not errors: a classroom without seats yields an
    /// empty seating, and a population of zero yields the identity seating.
    pub fn solve(&self, request: &SeatingRequest) -> Result<SeatingResponse, SolveError> {
        let grid = Grid::from(request.class_config);
        let weights = Weights::from(request.priority_weights);
        let seats = validate(request, &grid, &weights)?;
        let roster = Roster::new(&request.students);

        tracing::info!(
            students = roster.len(),
            rows = grid.rows(),
            columns = grid.columns(),
            desk_type = %grid.desk_type(),
            population = request.pop_size,
            generations = request.generations,
            workers = self.workers.get(),
            "solving seating"
        );

        let ignored = roster
            .profiles()
            .iter()
            .skip(seats)
            .map(StudentProfile::id)
            .collect::<Vec<_>>();
        if !ignored.is_empty() {
            tracing::warn!(count = ignored.len(), seats, "more students than seats");
        }

        if seats == 0 {
            return Ok(SeatingResponse {
                seating: vec![],
                fitness: 0.0,
                ignored,
            });
        }

        let (social, table) = thread::scope(|s| {
            let social = s.spawn(|| {
                SocialGraph::build(&roster, &request.preferences, &request.forbidden)
            });
            let table = StaticScoreTable::build(&roster, &grid, &weights);
            let social = social.join().unwrap_or_else(|e| panic::resume_unwind(e));
            (social, table)
        });
        let evaluator = FitnessEvaluator::new(grid, weights, social, table);

        let (best, fitness) = if request.pop_size == 0 {
            let mut identity = vec![0; seats];
            seating::fill_identity(&mut identity);
            let fitness = evaluator.fitness(&identity);
            (identity, fitness)
        } else {
            let seed = request.seed.unwrap_or_else(|| rand::rng().random());
            tracing::debug!(seed, "seeding random streams");
            let params = GeneticParams::new(
                request.pop_size,
                request.generations,
                request.mutation_chance,
            );
            let mut evolver = Evolver::new(&evaluator, params, self.workers, seed);
            evolver.run();
            evolver.best()
        };

        tracing::info!(fitness, ignored = ignored.len(), "seating found");
        Ok(SeatingResponse {
            seating: satisfaction::project(&evaluator, &roster, &best),
            fitness,
            ignored,
        })
    }
}

/// Optimizes `request` using every available core.
pub fn run(request: &SeatingRequest) -> Result<SeatingResponse, SolveError> {
    SeatingSolver::default().solve(request)
}

#[cfg(test)]
mod tests {
    use seatplan_engine::{
        DeskType,
        schema::{ClassConfig, EMPTY_STUDENT_ID, PriorityWeights, StudentRecord},
    };
    use seatplan_evaluator::satisfaction::MEDICAL_COMPLAINT;

    use super::*;

    const EPS: f64 = 1e-9;

    fn student(id: i64) -> StudentRecord {
        StudentRecord {
            id,
            name: format!("student-{id}"),
            ..StudentRecord::default()
        }
    }

    fn request(students: i64, rows: usize, columns: usize) -> SeatingRequest {
        SeatingRequest {
            students: (1..=students).map(student).collect(),
            class_config: ClassConfig {
                rows,
                columns,
                desk_type: DeskType::Pair,
            },
            pop_size: 20,
            generations: 15,
            priority_weights: PriorityWeights {
                medical: 1.0,
                preferences: 0.5,
                friends: 0.5,
                enemies: 0.5,
                fill: 0.3,
            },
            seed: Some(7),
            ..SeatingRequest::default()
        }
    }

    fn solver(workers: usize) -> SeatingSolver {
        SeatingSolver::with_workers(NonZeroUsize::new(workers).unwrap())
    }

    fn assert_valid(response: &SeatingResponse, request: &SeatingRequest) {
        let seats = request.class_config.rows * request.class_config.columns;
        assert_eq!(response.seating.len(), seats);
        let mut seated = response
            .seating
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.student_id)
            .collect::<Vec<_>>();
        seated.sort_unstable();
        let mut expected = request
            .students
            .iter()
            .take(seats)
            .map(|s| s.id)
            .collect::<Vec<_>>();
        expected.sort_unstable();
        assert_eq!(seated, expected);
        for (i, seat) in response.seating.iter().enumerate() {
            assert_eq!(seat.seat_id, i);
            let columns = request.class_config.columns;
            assert_eq!((seat.row, seat.column), (i / columns, i % columns));
        }
    }

    #[test]
    fn test_every_student_seated_once() {
        let mut req = request(9, 3, 4);
        req.preferences = vec![(1, 2), (3, 4), (5, 99)];
        req.forbidden = vec![(1, 3), (6, 7)];
        let response = solver(3).solve(&req).unwrap();
        assert_valid(&response, &req);
        assert!(response.ignored.is_empty());
    }

    #[test]
    fn test_friends_on_single_desks_sit_side_by_side() {
        let mut req = request(2, 1, 2);
        req.class_config.desk_type = DeskType::Single;
        req.preferences = vec![(1, 2)];
        req.priority_weights.friends = 0.9;
        let response = solver(2).solve(&req).unwrap();
        assert_valid(&response, &req);
        for seat in &response.seating {
            assert!((seat.satisfaction.friends - 0.9 * 0.5 / 1.5).abs() < EPS);
        }
    }

    #[test]
    fn test_impossible_medical_row_is_reported() {
        let mut req = request(1, 1, 2);
        req.students[0].medical_preferred_rows = vec![5];
        let response = solver(1).solve(&req).unwrap();
        let seat = response.seating.iter().find(|s| !s.is_empty()).unwrap();
        assert!(seat.satisfaction.medical < 0.0);
        assert!(seat.satisfaction.level.abs() < EPS);
        assert!(seat.satisfaction.complaints.iter().any(|c| c == MEDICAL_COMPLAINT));
    }

    #[test]
    fn test_empty_population_projects_identity() {
        let mut req = request(3, 2, 2);
        req.pop_size = 0;
        let response = solver(2).solve(&req).unwrap();
        assert_valid(&response, &req);
        let ids = response.seating.iter().map(|s| s.student_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, EMPTY_STUDENT_ID]);
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let mut req = request(5, 2, 3);
        req.generations = 0;
        let response = solver(2).solve(&req).unwrap();
        assert_valid(&response, &req);
    }

    #[test]
    fn test_single_member_population() {
        let mut req = request(4, 2, 3);
        req.pop_size = 1;
        let response = solver(4).solve(&req).unwrap();
        assert_valid(&response, &req);
    }

    #[test]
    fn test_no_seats() {
        let req = request(2, 0, 5);
        let response = solver(2).solve(&req).unwrap();
        assert!(response.seating.is_empty());
        assert!(response.fitness.abs() < EPS);
        assert_eq!(response.ignored, vec![1, 2]);
    }

    #[test]
    fn test_no_students() {
        let req = request(0, 2, 2);
        let response = solver(2).solve(&req).unwrap();
        assert_valid(&response, &req);
        assert!(response.seating.iter().all(|s| s.is_empty()));
        // rows_from: 2, 2, 1, 1 → -(6) * 0.3 * 10
        assert!((response.fitness + 18.0).abs() < EPS);
    }

    #[test]
    fn test_extra_students_are_ignored() {
        let req = request(6, 2, 2);
        let response = solver(2).solve(&req).unwrap();
        assert_valid(&response, &req);
        assert_eq!(response.ignored, vec![5, 6]);
    }

    #[test]
    fn test_same_seed_same_seating() {
        let mut req = request(8, 3, 3);
        req.preferences = vec![(1, 2), (4, 8)];
        req.forbidden = vec![(2, 3)];
        let a = solver(3).solve(&req).unwrap();
        let b = solver(3).solve(&req).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_mutation_chance() {
        let mut req = request(2, 1, 2);
        req.mutation_chance = 1.5;
        assert_eq!(
            solver(1).solve(&req),
            Err(SolveError::InvalidMutationChance { value: 1.5 })
        );
        req.mutation_chance = f64::NAN;
        assert!(matches!(
            solver(1).solve(&req),
            Err(SolveError::InvalidMutationChance { .. })
        ));
    }

    #[test]
    fn test_invalid_weight() {
        let mut req = request(2, 1, 2);
        req.priority_weights.enemies = -1.0;
        assert_eq!(
            solver(1).solve(&req),
            Err(SolveError::InvalidWeight {
                name: "enemies",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_oversized_grid() {
        let req = request(1, usize::MAX, 2);
        assert_eq!(
            solver(1).solve(&req),
            Err(SolveError::GridTooLarge {
                rows: usize::MAX,
                columns: 2
            })
        );
    }

    #[test]
    fn test_oversized_population() {
        let mut req = request(1, 1, 2);
        for pop_size in [usize::MAX, usize::MAX / 4, 10_000_000_000] {
            req.pop_size = pop_size;
            assert_eq!(
                solver(1).solve(&req),
                Err(SolveError::PopulationTooLarge {
                    population: pop_size,
                    seats: 2
                })
            );
        }
    }

    #[test]
    fn test_population_at_memory_limit_is_accepted() {
        let seats = 2;
        let cells = MAX_BUFFER_BYTES / size_of::<usize>() / 2;
        assert!(buffer_bytes::<usize>(cells, 2).is_some());
        assert!(buffer_bytes::<usize>(cells + 1, 2).is_none());

        let mut req = request(1, 1, seats);
        req.pop_size = cells / seats;
        assert!(validate(&req, &Grid::from(req.class_config), &Weights::default()).is_ok());
    }

    #[test]
    fn test_oversized_roster() {
        // two 25000² boolean matrices exceed the limit
        let req = request(25_000, 1, 1);
        assert_eq!(
            solver(1).solve(&req),
            Err(SolveError::ProblemTooLarge {
                students: 25_000,
                seats: 1
            })
        );
    }
}
