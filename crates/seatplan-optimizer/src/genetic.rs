//! Genetic algorithm over seating permutations.
//!
//! # Algorithm Overview
//!
//! Each generation runs four steps:
//!
//! 1. **Evaluate** - Score every seating of the current population in parallel
//! 2. **Elite + local search** - Copy the best seating into slot 0 of the next
//!    population and improve the copy with swap hill-climbing
//! 3. **Offspring** - Fill the remaining slots in parallel with tournament
//!    selection, order crossover, and swap mutation
//! 4. **Swap buffers** - The next population becomes the current one
//!
//! The initial population is made of uniformly random permutations. The loop
//! always runs the configured number of generations; there is no convergence
//! detection.
//!
//! # Elitism
//!
//! Only one elite is kept, but it never gets worse: local search accepts a swap
//! only if it strictly improves fitness, and the improved copy (not the
//! original) enters the next generation. The best fitness in the population is
//! therefore non-decreasing from one generation to the next.
//!
//! # Parallelization
//!
//! Work is split with [`std::thread::scope`] into one contiguous, disjoint chunk
//! per worker, twice per generation:
//!
//! - the fitness array is split with `chunks_mut`, so workers never write to the
//!   same score
//! - the offspring slots `1..` of the next buffer are split the same way; each
//!   worker owns a crossover scratch buffer and a random stream
//!
//! Workers only read the current population, the fitness array (after the first
//! barrier), and the [`FitnessEvaluator`]. Nothing is locked.
//!
//! # Random Streams
//!
//! Every worker owns a [`Pcg64Mcg`] seeded from the run seed plus the worker
//! index. Stream 0 also builds the initial population and drives the local
//! search. Given the same seed and worker count, a run is reproducible.

use std::{num::NonZeroUsize, thread};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use seatplan_engine::seating;
use seatplan_evaluator::FitnessEvaluator;

use crate::permutation;

/// Number of seatings sampled per tournament.
pub const TOURNAMENT_SIZE: usize = 3;
/// Number of swap attempts applied to the elite copy each generation.
pub const LOCAL_SEARCH_ROUNDS: usize = 20;

/// Controls how populations evolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticParams {
    /// Number of seatings per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Probability of a swap mutation per offspring, in `0.0..=1.0`.
    pub mutation_chance: f64,
    /// Seatings sampled per tournament (larger = stronger selection pressure).
    pub tournament_size: usize,
    /// Swap attempts for the elite's local search.
    pub local_search_rounds: usize,
}

impl GeneticParams {
    #[must_use]
    pub const fn new(population_size: usize, generations: usize, mutation_chance: f64) -> Self {
        Self {
            population_size,
            generations,
            mutation_chance,
            tournament_size: TOURNAMENT_SIZE,
            local_search_rounds: LOCAL_SEARCH_ROUNDS,
        }
    }
}

/// Summary of the fitness values of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}

impl FitnessStats {
    /// Returns `None` for an empty set of scores.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(scores: &[f64]) -> Option<Self> {
        let first = *scores.first()?;
        let (best, worst, sum) = scores
            .iter()
            .fold((first, first, 0.0), |(best, worst, sum), &s| {
                (best.max(s), worst.min(s), sum + s)
            });
        Some(Self {
            best,
            worst,
            mean: sum / scores.len() as f64,
        })
    }
}

/// A fixed-size population of seatings stored in two flat, swappable buffers.
///
/// Member `i` occupies `current[i * seat_count..(i + 1) * seat_count]`.
#[derive(Debug, Clone)]
pub struct Population {
    seat_count: usize,
    current: Vec<usize>,
    next: Vec<usize>,
    scores: Vec<f64>,
}

impl Population {
    /// Creates `size` uniformly random seatings of `seat_count` seats.
    ///
    /// # Panics
    ///
    /// Panics if `size` or `seat_count` is zero.
    #[must_use]
    pub fn random<R>(size: usize, seat_count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(size > 0, "population must not be empty");
        assert!(seat_count > 0, "seatings must have at least one seat");
        let mut current = vec![0; size * seat_count];
        for member in current.chunks_exact_mut(seat_count) {
            seating::fill_random(member, rng);
        }
        Self {
            seat_count,
            next: vec![0; current.len()],
            current,
            scores: vec![f64::MIN; size],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    #[must_use]
    pub fn member(&self, index: usize) -> &[usize] {
        &self.current[index * self.seat_count..(index + 1) * self.seat_count]
    }

    pub fn members(&self) -> impl Iterator<Item = &[usize]> {
        self.current.chunks_exact(self.seat_count)
    }

    /// Fitness of every member, as of the last [`Population::evaluate_fitness`].
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Scores every member in parallel, one contiguous chunk per worker.
    pub fn evaluate_fitness(&mut self, evaluator: &FitnessEvaluator, workers: NonZeroUsize) {
        let chunk = self.len().div_ceil(workers.get());
        let seat_count = self.seat_count;
        thread::scope(|s| {
            for (scores, members) in self
                .scores
                .chunks_mut(chunk)
                .zip(self.current.chunks(chunk * seat_count))
            {
                s.spawn(move || {
                    for (score, member) in scores.iter_mut().zip(members.chunks_exact(seat_count)) {
                        *score = evaluator.fitness(member);
                    }
                });
            }
        });
    }

    /// Index and fitness of the best member; ties keep the lowest index.
    #[must_use]
    pub fn best(&self) -> (usize, f64) {
        let mut best = 0;
        for (i, &score) in self.scores.iter().enumerate().skip(1) {
            if score > self.scores[best] {
                best = i;
            }
        }
        (best, self.scores[best])
    }

    /// Builds the next generation from the scored current one and swaps buffers.
    ///
    /// `streams[0]` drives the elite's local search; the offspring slots are
    /// split among all streams.
    fn breed(
        &mut self,
        evaluator: &FitnessEvaluator,
        params: &GeneticParams,
        streams: &mut [Pcg64Mcg],
        scratch: &mut [Vec<bool>],
    ) -> f64 {
        let seat_count = self.seat_count;
        let offspring_count = self.len() - 1;
        let (elite_index, _) = self.best();

        let (elite, offspring) = self.next.split_at_mut(seat_count);
        elite.copy_from_slice(
            &self.current[elite_index * seat_count..(elite_index + 1) * seat_count],
        );
        let elite_fitness =
            local_search(elite, evaluator, params.local_search_rounds, &mut streams[0]);

        if offspring_count > 0 {
            let chunk = offspring_count.div_ceil(streams.len());
            let current = &self.current;
            let scores = &self.scores;
            thread::scope(|s| {
                for ((children, rng), used) in offspring
                    .chunks_mut(chunk * seat_count)
                    .zip(streams.iter_mut())
                    .zip(scratch.iter_mut())
                {
                    s.spawn(move || {
                        for child in children.chunks_exact_mut(seat_count) {
                            let p1 = tournament_select(scores, params.tournament_size, rng);
                            let p2 = tournament_select(scores, params.tournament_size, rng);
                            permutation::order_crossover(
                                &current[p1 * seat_count..(p1 + 1) * seat_count],
                                &current[p2 * seat_count..(p2 + 1) * seat_count],
                                child,
                                used,
                                rng,
                            );
                            if rng.random_bool(params.mutation_chance) {
                                permutation::swap_mutation(child, rng);
                            }
                        }
                    });
                }
            });
        }

        std::mem::swap(&mut self.current, &mut self.next);
        elite_fitness
    }
}

/// Runs the generation loop for one problem.
#[derive(Debug)]
pub struct Evolver<'a> {
    evaluator: &'a FitnessEvaluator,
    params: GeneticParams,
    workers: NonZeroUsize,
    streams: Vec<Pcg64Mcg>,
    scratch: Vec<Vec<bool>>,
    population: Population,
    generation: usize,
}

impl<'a> Evolver<'a> {
    /// Creates an evolver with a random initial population.
    ///
    /// # Panics
    ///
    /// Panics if the population size or the evaluator's seat count is zero.
    #[must_use]
    pub fn new(
        evaluator: &'a FitnessEvaluator,
        params: GeneticParams,
        workers: NonZeroUsize,
        seed: u64,
    ) -> Self {
        let mut streams = (0..workers.get())
            .map(|worker| Pcg64Mcg::seed_from_u64(seed.wrapping_add(worker as u64)))
            .collect::<Vec<_>>();
        let seat_count = evaluator.seat_count();
        let population = Population::random(params.population_size, seat_count, &mut streams[0]);
        Self {
            evaluator,
            params,
            workers,
            scratch: vec![vec![false; seat_count]; workers.get()],
            streams,
            population,
            generation: 0,
        }
    }

    /// Number of generations run so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Runs one generation.
    pub fn step(&mut self) {
        self.population.evaluate_fitness(self.evaluator, self.workers);
        if let Some(stats) = FitnessStats::new(self.population.scores()) {
            tracing::debug!(
                generation = self.generation,
                best = stats.best,
                mean = stats.mean,
                worst = stats.worst,
                "generation evaluated"
            );
        }
        let elite_fitness = self.population.breed(
            self.evaluator,
            &self.params,
            &mut self.streams,
            &mut self.scratch,
        );
        tracing::trace!(generation = self.generation, elite_fitness, "elite refined");
        self.generation += 1;
    }

    /// Runs the remaining generations up to the configured count.
    pub fn run(&mut self) {
        while self.generation < self.params.generations {
            self.step();
        }
    }

    /// Scores the current population and returns its best member.
    #[must_use]
    pub fn best(&mut self) -> (Vec<usize>, f64) {
        self.population.evaluate_fitness(self.evaluator, self.workers);
        let (index, fitness) = self.population.best();
        (self.population.member(index).to_vec(), fitness)
    }
}

/// Selects a member by tournament.
///
/// Samples `tournament_size` indices uniformly with replacement and returns the
/// one with the highest score; ties keep the first sampled.
///
/// # Panics
///
/// Panics if `scores` is empty or `tournament_size` is zero.
pub fn tournament_select<R>(scores: &[f64], tournament_size: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    let mut best = rng.random_range(0..scores.len());
    for _ in 1..tournament_size {
        let candidate = rng.random_range(0..scores.len());
        if scores[candidate] > scores[best] {
            best = candidate;
        }
    }
    best
}

/// Greedy swap hill-climbing.
///
/// Tries `rounds` random swaps and keeps each one only if it strictly improves
/// fitness. Returns the final fitness, which is never below the initial one.
pub fn local_search<R>(
    seating: &mut [usize],
    evaluator: &FitnessEvaluator,
    rounds: usize,
    rng: &mut R,
) -> f64
where
    R: Rng + ?Sized,
{
    let mut current = evaluator.fitness(seating);
    for _ in 0..rounds {
        let i = rng.random_range(0..seating.len());
        let j = rng.random_range(0..seating.len());
        seating.swap(i, j);
        let candidate = evaluator.fitness(seating);
        if candidate > current {
            current = candidate;
        } else {
            seating.swap(i, j);
        }
    }
    current
}
