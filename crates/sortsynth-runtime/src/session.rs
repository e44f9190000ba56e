#![forbid(unsafe_code)]

//! The controller between user requests and the scheduler.
//!
//! A [`Session`] owns what is "on screen": the idle array, or the live
//! snapshot of the playback in progress. A sort request always sorts whatever
//! is on screen at that moment:
//!
//! 1. any in-flight playback is cancelled and its partial snapshot adopted,
//! 2. the engine runs to completion on a private copy of that snapshot,
//! 3. a new playback starts from a second, independent copy.
//!
//! None of the cancelled playback's remaining moves are ever applied.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use sortsynth_core::{Algorithm, SortError, generate_array_with, sort};
use web_time::Instant;

use crate::capability::{Renderer, ToneSink};
use crate::scheduler::{PlayHandle, Scheduler, TickOutcome};

pub struct Session<R, S> {
    scheduler: Scheduler<R, S>,
    values: Vec<f64>,
    rng: SmallRng,
}

impl<R: Renderer, S: ToneSink> Session<R, S> {
    /// Start with `initial` on screen and publish it.
    pub fn new(mut scheduler: Scheduler<R, S>, initial: Vec<f64>) -> Self {
        scheduler.show(&initial);
        Self {
            scheduler,
            values: initial,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Start with `len` random values drawn from a seeded RNG.
    pub fn seeded(scheduler: Scheduler<R, S>, len: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let initial = generate_array_with(&mut rng, len);
        let mut session = Self::new(scheduler, initial);
        session.rng = rng;
        session
    }

    /// Replace the on screen array with `len` fresh random values.
    ///
    /// Any playback in progress is cancelled and discarded.
    pub fn generate(&mut self, len: usize) -> &[f64] {
        let _ = self.scheduler.cancel();
        self.values = generate_array_with(&mut self.rng, len);
        self.scheduler.show(&self.values);
        &self.values
    }

    /// Sort whatever is on screen with `algorithm` and start replaying it.
    pub fn request_sort(&mut self, algorithm: Algorithm) -> PlayHandle {
        self.request_sort_at(algorithm, Instant::now())
    }

    /// Like [`request_sort`](Self::request_sort) with an explicit start time.
    pub fn request_sort_at(&mut self, algorithm: Algorithm, now: Instant) -> PlayHandle {
        if let Some(snapshot) = self.scheduler.cancel() {
            self.values = snapshot;
        }
        let log = sort(algorithm, &self.values);
        tracing::debug!(
            target: "sortsynth.session",
            algorithm = %algorithm,
            len = self.values.len(),
            moves = log.len(),
            "sort requested"
        );
        self.scheduler.play_at(self.values.clone(), log, now)
    }

    /// Parse `name` and request a sort.
    ///
    /// An unknown name fails with [`SortError::InvalidAlgorithm`] and leaves
    /// the session untouched, including any playback in progress.
    pub fn request_sort_by_name(&mut self, name: &str) -> Result<PlayHandle, SortError> {
        let algorithm: Algorithm = name.parse()?;
        Ok(self.request_sort(algorithm))
    }

    /// Advance playback; adopt the final or cancelled snapshot as on screen.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.scheduler.tick(now);
        if let TickOutcome::Finished { snapshot, .. } | TickOutcome::Cancelled { snapshot, .. } =
            &outcome
        {
            self.values.clone_from(snapshot);
        }
        outcome
    }

    /// Block until the current playback ends.
    pub fn run_until_idle(&mut self) -> TickOutcome {
        loop {
            match self.tick(Instant::now()) {
                TickOutcome::Waiting { .. } | TickOutcome::Stepped { .. } => {
                    self.scheduler.wait_for_deadline();
                }
                done => return done,
            }
        }
    }

    /// What is on screen right now.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.scheduler.current_snapshot().unwrap_or(&self.values)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_active()
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler<R, S> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<R, S> {
        &mut self.scheduler
    }

    /// Cancel playback and return the scheduler.
    pub fn into_scheduler(mut self) -> Scheduler<R, S> {
        let _ = self.scheduler.cancel();
        self.scheduler
    }
}
