#![forbid(unsafe_code)]

//! Cooperative, tick-driven playback scheduler.
//!
//! The scheduler replays one [`MoveLog`] at a time against its own copy of the
//! array. It never sleeps inside [`tick`](Scheduler::tick): the host calls
//! `tick(now)` whenever it likes and the scheduler either reports that the
//! next step is not due yet, applies exactly one move, or finishes.
//!
//! # How a step runs
//!
//! 1. The pending playback's cancellation flag is checked; a cancelled
//!    playback is discarded without applying anything.
//! 2. If the step deadline has not passed, [`TickOutcome::Waiting`] is
//!    returned.
//! 3. One move is applied, the snapshot is published to the [`Renderer`], and
//!    then one tone (overwrite) or two tones (swap: `i` then `j`) go to the
//!    [`ToneSink`]. The next deadline is `now + step_interval`.
//! 4. Once the cursor is exhausted the snapshot is published a final time and
//!    the playback is handed back as [`TickOutcome::Finished`].
//!
//! Starting a new playback while one is active cancels the old one; at most
//! one tick is ever pending.

use sortsynth_core::{MoveLog, ToneMapper};
use web_time::{Duration, Instant};

use crate::cancellation::CancellationSource;
use crate::capability::{Renderer, ToneSink};
use crate::playback::{PlaybackState, PlaybackStep};

/// Default minimum delay between two steps.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(4);

/// Timing and tone parameters for playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub step_interval: Duration,
    pub tone: ToneMapper,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
            tone: ToneMapper::default(),
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    #[must_use]
    pub fn with_tone(mut self, tone: ToneMapper) -> Self {
        self.tone = tone;
        self
    }
}

/// Identifier of one playback, unique per scheduler.
pub type PlaybackId = u64;

/// Caller-side handle to a playback.
///
/// Cloneable and `Send`; cancelling from any clone or thread makes the
/// playback's next tick a no-op.
#[derive(Debug, Clone)]
pub struct PlayHandle {
    id: PlaybackId,
    source: CancellationSource,
}

impl PlayHandle {
    #[must_use]
    pub fn id(&self) -> PlaybackId {
        self.id
    }

    pub fn cancel(&self) {
        self.source.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.source.is_cancelled()
    }
}

/// What a call to [`Scheduler::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No playback is active.
    Idle,
    /// The next step is not due before `until`.
    Waiting { until: Instant },
    /// One move was applied.
    Stepped { id: PlaybackId, step: PlaybackStep },
    /// The log was exhausted; the final snapshot was published.
    Finished { id: PlaybackId, snapshot: Vec<f64> },
    /// The playback was cancelled before this tick; nothing was applied.
    Cancelled { id: PlaybackId, snapshot: Vec<f64> },
}

impl TickOutcome {
    /// Whether the playback this outcome refers to has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Finished { .. } | Self::Cancelled { .. }
        )
    }
}

/// Monotonic counters for one scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub started: u64,
    pub finished: u64,
    pub cancelled: u64,
    pub steps_applied: u64,
    pub tones_emitted: u64,
    pub tones_dropped: u64,
}

struct ActivePlayback {
    id: PlaybackId,
    state: PlaybackState,
    source: CancellationSource,
    deadline: Instant,
}

/// Drives one playback at a time against injected render and tone capabilities.
pub struct Scheduler<R, S> {
    renderer: R,
    tones: S,
    config: PlaybackConfig,
    active: Option<ActivePlayback>,
    next_id: PlaybackId,
    stats: PlaybackStats,
    audio_degraded: bool,
}

impl<R: Renderer, S: ToneSink> Scheduler<R, S> {
    pub fn new(renderer: R, tones: S, config: PlaybackConfig) -> Self {
        Self {
            renderer,
            tones,
            config,
            active: None,
            next_id: 1,
            stats: PlaybackStats::default(),
            audio_degraded: false,
        }
    }

    /// Start replaying `log` against `initial`, first step due one interval
    /// from now.
    pub fn play(&mut self, initial: Vec<f64>, log: MoveLog) -> PlayHandle {
        self.play_at(initial, log, Instant::now())
    }

    /// Like [`play`](Self::play) with an explicit start time.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not the length `log` was generated against.
    pub fn play_at(&mut self, initial: Vec<f64>, log: MoveLog, now: Instant) -> PlayHandle {
        if let Some(previous) = self.cancel() {
            tracing::debug!(
                target: "sortsynth.playback",
                len = previous.len(),
                "superseded playback discarded"
            );
        }

        let id = self.next_id;
        self.next_id += 1;
        let moves = log.len();
        let state = PlaybackState::new(initial, log, self.config.tone);
        let source = CancellationSource::new();
        self.active = Some(ActivePlayback {
            id,
            state,
            source: source.clone(),
            deadline: now + self.config.step_interval,
        });
        self.stats.started += 1;
        tracing::info!(
            target: "sortsynth.playback",
            playback = id,
            moves,
            step_interval_us = self.config.step_interval.as_micros() as u64,
            "playback started"
        );
        PlayHandle { id, source }
    }

    /// Cancel the active playback, returning its partially replayed snapshot.
    pub fn cancel(&mut self) -> Option<Vec<f64>> {
        let active = self.active.take()?;
        active.source.cancel();
        Some(self.retire_cancelled(active))
    }

    /// Advance the active playback by at most one step.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(mut active) = self.active.take() else {
            return TickOutcome::Idle;
        };

        if active.source.is_cancelled() {
            let id = active.id;
            let snapshot = self.retire_cancelled(active);
            return TickOutcome::Cancelled { id, snapshot };
        }

        if now < active.deadline {
            let until = active.deadline;
            self.active = Some(active);
            return TickOutcome::Waiting { until };
        }

        let id = active.id;
        match active.state.advance() {
            Some(step) => {
                #[cfg(feature = "step-tracing")]
                let _span = tracing::debug_span!(
                    "playback.step",
                    playback = id,
                    step = step.step,
                    total = active.state.total(),
                )
                .entered();

                self.stats.steps_applied += 1;
                self.renderer.render(active.state.snapshot());
                for frequency in step.tones.iter() {
                    self.emit(frequency);
                }
                active.deadline = now + self.config.step_interval;
                self.active = Some(active);
                TickOutcome::Stepped { id, step }
            }
            None => {
                self.renderer.render(active.state.snapshot());
                self.stats.finished += 1;
                tracing::info!(
                    target: "sortsynth.playback",
                    playback = id,
                    steps = active.state.applied(),
                    "playback finished"
                );
                TickOutcome::Finished {
                    id,
                    snapshot: active.state.into_snapshot(),
                }
            }
        }
    }

    /// Block until the active playback ends, sleeping between steps.
    ///
    /// Returns the terminal outcome. Cancelling the playback's handle from
    /// another thread wakes the sleep immediately.
    pub fn run_until_idle(&mut self) -> TickOutcome {
        loop {
            match self.tick(Instant::now()) {
                TickOutcome::Waiting { .. } | TickOutcome::Stepped { .. } => {
                    self.wait_for_deadline();
                }
                done => return done,
            }
        }
    }

    /// Sleep until the next step is due or the playback is cancelled.
    ///
    /// Returns immediately when nothing is pending.
    pub fn wait_for_deadline(&self) {
        if let Some(active) = &self.active {
            let wait = active.deadline.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                active.source.token().wait_timeout(wait);
            }
        }
    }

    /// Publish a snapshot without touching playback state.
    pub fn show(&mut self, snapshot: &[f64]) {
        self.renderer.render(snapshot);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Snapshot of the playback in progress, if any.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<&[f64]> {
        self.active.as_ref().map(|a| a.state.snapshot())
    }

    /// `(applied, total)` for the playback in progress.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.active
            .as_ref()
            .map(|a| (a.state.applied(), a.state.total()))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.deadline)
    }

    #[must_use]
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn tones_mut(&mut self) -> &mut S {
        &mut self.tones
    }

    /// Tear down, returning the injected capabilities.
    pub fn into_parts(mut self) -> (R, S) {
        let _ = self.cancel();
        (self.renderer, self.tones)
    }

    fn retire_cancelled(&mut self, active: ActivePlayback) -> Vec<f64> {
        self.stats.cancelled += 1;
        tracing::info!(
            target: "sortsynth.playback",
            playback = active.id,
            applied = active.state.applied(),
            remaining = active.state.remaining(),
            "playback cancelled"
        );
        active.state.into_snapshot()
    }

    fn emit(&mut self, frequency: f64) {
        match self.tones.emit_tone(frequency) {
            Ok(()) => self.stats.tones_emitted += 1,
            Err(err) => {
                self.stats.tones_dropped += 1;
                if self.audio_degraded {
                    tracing::debug!(
                        target: "sortsynth.audio",
                        frequency,
                        error = %err,
                        "tone dropped"
                    );
                } else {
                    self.audio_degraded = true;
                    tracing::warn!(
                        target: "sortsynth.audio",
                        frequency,
                        error = %err,
                        "tone emission failed; continuing without audio"
                    );
                }
            }
        }
    }
}
