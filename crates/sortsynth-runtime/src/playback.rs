#![forbid(unsafe_code)]

//! Untimed replay of a move log.
//!
//! [`PlaybackState`] owns the only mutable copy of the array used during
//! replay plus a lazily consumed cursor into the log. Each call to
//! [`advance`](PlaybackState::advance) applies exactly one move and reports
//! which tones it produced. The state is also an [`Iterator`] over
//! [`PlaybackStep`]s, which is handy for tests and for driving a replay
//! without a clock.

use sortsynth_core::{Move, MoveLog, ToneMapper};

/// Frequencies produced by one step, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneBurst {
    pub first: f64,
    /// Present for swaps: the tone for the second index.
    pub second: Option<f64>,
}

impl ToneBurst {
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        std::iter::once(self.first).chain(self.second)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        1 + usize::from(self.second.is_some())
    }
}

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStep {
    /// 1-based position of the move in its log.
    pub step: usize,
    pub mv: Move,
    pub tones: ToneBurst,
}

/// Cursor into a move log plus the array it is being replayed against.
#[derive(Debug)]
pub struct PlaybackState {
    values: Vec<f64>,
    cursor: std::vec::IntoIter<Move>,
    applied: usize,
    total: usize,
    tone: ToneMapper,
}

impl PlaybackState {
    /// Take ownership of `initial` and `log`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not the length the log was generated against.
    #[must_use]
    pub fn new(initial: Vec<f64>, log: MoveLog, tone: ToneMapper) -> Self {
        assert_eq!(
            initial.len(),
            log.array_len(),
            "move log generated for {} elements replayed against {}",
            log.array_len(),
            initial.len()
        );
        let total = log.len();
        Self {
            values: initial,
            cursor: log.into_iter(),
            applied: 0,
            total,
            tone,
        }
    }

    /// Apply the next move, or return `None` once the log is exhausted.
    pub fn advance(&mut self) -> Option<PlaybackStep> {
        let mv = self.cursor.next()?;
        mv.apply(&mut self.values);
        self.applied += 1;

        let (i, j) = mv.touched();
        let tones = ToneBurst {
            first: self.tone.frequency(self.values[i]),
            second: j.map(|j| self.tone.frequency(self.values[j])),
        };
        Some(PlaybackStep {
            step: self.applied,
            mv,
            tones,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_snapshot(self) -> Vec<f64> {
        self.values
    }

    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total - self.applied
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.applied == self.total
    }
}

impl Iterator for PlaybackState {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<PlaybackStep> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortsynth_core::{Algorithm, sort};

    fn state_for(algo: Algorithm, input: &[f64]) -> PlaybackState {
        PlaybackState::new(input.to_vec(), sort(algo, input), ToneMapper::default())
    }

    #[test]
    fn swap_tones_follow_new_values_at_i_then_j() {
        let mut state = state_for(Algorithm::Quick, &[0.3, 0.1, 0.2]);
        let step = state.advance().unwrap();
        assert_eq!(step.step, 1);
        assert_eq!(step.mv, Move::Swap { i: 0, j: 1 });
        assert_eq!(state.snapshot(), &[0.1, 0.3, 0.2]);
        // 200 + 0.1 * 500, then 200 + 0.3 * 500
        assert_eq!(step.tones.iter().collect::<Vec<_>>(), vec![250.0, 350.0]);
    }

    #[test]
    fn overwrite_emits_one_tone() {
        let mut state = state_for(Algorithm::Merge, &[0.3, 0.1, 0.2]);
        let step = state.advance().unwrap();
        assert_eq!(step.mv, Move::Overwrite { i: 1, value: 0.1 });
        assert_eq!(step.tones.count(), 1);
        assert_eq!(step.tones.first, 250.0);
    }

    #[test]
    fn exhausting_the_cursor_leaves_sorted_array() {
        let input = [0.9, 0.4, 0.6, 0.1, 0.3];
        let mut state = state_for(Algorithm::Heap, &input);
        let total = state.total();
        assert_eq!(state.by_ref().count(), total);
        assert!(state.is_finished());
        assert_eq!(state.advance(), None);
        assert_eq!(state.into_snapshot(), vec![0.1, 0.3, 0.4, 0.6, 0.9]);
    }

    #[test]
    fn remaining_counts_down() {
        let mut state = state_for(Algorithm::Bubble, &[0.3, 0.1, 0.2]);
        assert_eq!(state.remaining(), 2);
        state.advance();
        assert_eq!(state.remaining(), 1);
        assert_eq!(state.size_hint(), (1, Some(1)));
    }

    #[test]
    #[should_panic(expected = "replayed against")]
    fn mismatched_length_is_fatal() {
        let log = sort(Algorithm::Bubble, &[0.2, 0.1]);
        let _ = PlaybackState::new(vec![0.2, 0.1, 0.0], log, ToneMapper::default());
    }
}
