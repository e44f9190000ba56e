#![forbid(unsafe_code)]

//! Elementary array mutations and the logs that record them.
//!
//! A sort engine never mutates a caller-visible array. It works on a private
//! copy through a [`Recorder`], which appends one [`Move`] for every mutation
//! it performs. The frozen result is a [`MoveLog`]: replaying it in order
//! against the engine's input reproduces the sorted array exactly.
//!
//! # Example
//!
//! ```
//! use sortsynth_core::{Algorithm, Move, sort};
//!
//! let input = [0.3, 0.1, 0.2];
//! let log = sort(Algorithm::Quick, &input);
//! assert_eq!(log.moves(), &[Move::Swap { i: 0, j: 1 }, Move::Swap { i: 1, j: 2 }]);
//! assert_eq!(log.replay(&input), vec![0.1, 0.2, 0.3]);
//! ```

use crate::error::{Result, SortError};

/// One elementary array mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Move<T = f64> {
    /// Exchange the values at positions `i` and `j`.
    Swap { i: usize, j: usize },
    /// Set position `i` to `value`, discarding what was there.
    Overwrite { i: usize, value: T },
}

impl<T> Move<T> {
    /// Positions whose value changes, in the order tones are emitted for them.
    #[must_use]
    pub fn touched(&self) -> (usize, Option<usize>) {
        match *self {
            Self::Swap { i, j } => (i, Some(j)),
            Self::Overwrite { i, .. } => (i, None),
        }
    }

    /// Largest index this move reads or writes.
    #[must_use]
    pub fn max_index(&self) -> usize {
        match *self {
            Self::Swap { i, j } => i.max(j),
            Self::Overwrite { i, .. } => i,
        }
    }

    #[must_use]
    pub fn is_swap(&self) -> bool {
        matches!(self, Self::Swap { .. })
    }
}

impl<T: Clone> Move<T> {
    /// Apply this move to `values`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range. Logs are only ever replayed against
    /// arrays of the length they were generated for, so this indicates a
    /// generator bug rather than a recoverable condition.
    pub fn apply(&self, values: &mut [T]) {
        let len = values.len();
        assert!(
            self.max_index() < len,
            "move {:?} out of range for array of length {len}",
            self.touched()
        );
        match self {
            Self::Swap { i, j } => values.swap(*i, *j),
            Self::Overwrite { i, value } => values[*i] = value.clone(),
        }
    }
}

/// Immutable, ordered record of every mutation a sort engine performed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveLog<T = f64> {
    array_len: usize,
    moves: Vec<Move<T>>,
}

impl<T> MoveLog<T> {
    /// An empty log for an array of `array_len` elements.
    #[must_use]
    pub fn empty(array_len: usize) -> Self {
        Self {
            array_len,
            moves: Vec::new(),
        }
    }

    /// Build a log from externally supplied moves, checking every index.
    pub fn from_moves(array_len: usize, moves: Vec<Move<T>>) -> Result<Self> {
        if let Some(bad) = moves.iter().find(|m| m.max_index() >= array_len) {
            return Err(SortError::MoveOutOfRange {
                index: bad.max_index(),
                len: array_len,
            });
        }
        Ok(Self { array_len, moves })
    }

    /// Length of the array this log was generated against.
    #[must_use]
    pub fn array_len(&self) -> usize {
        self.array_len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn moves(&self) -> &[Move<T>] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move<T>> {
        self.moves.iter()
    }

    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.moves.iter().filter(|m| m.is_swap()).count()
    }

    #[must_use]
    pub fn overwrite_count(&self) -> usize {
        self.len() - self.swap_count()
    }
}

impl<T: Clone> MoveLog<T> {
    /// Replay every move against a copy of `initial`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not the length the log was generated for.
    #[must_use]
    pub fn replay(&self, initial: &[T]) -> Vec<T> {
        assert_eq!(
            initial.len(),
            self.array_len,
            "move log replayed against an array of the wrong length"
        );
        let mut values = initial.to_vec();
        for mv in &self.moves {
            mv.apply(&mut values);
        }
        values
    }
}

impl<T> IntoIterator for MoveLog<T> {
    type Item = Move<T>;
    type IntoIter = std::vec::IntoIter<Move<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MoveLog<T> {
    type Item = &'a Move<T>;
    type IntoIter = std::slice::Iter<'a, Move<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// Private working copy plus the log of every mutation applied to it.
///
/// Engines only mutate through [`swap`](Self::swap) and
/// [`overwrite`](Self::overwrite), so no change can escape the log.
pub(crate) struct Recorder<T> {
    values: Vec<T>,
    moves: Vec<Move<T>>,
}

impl<T: Clone> Recorder<T> {
    pub(crate) fn new(values: &[T]) -> Self {
        Self {
            values: values.to_vec(),
            moves: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn get(&self, i: usize) -> &T {
        &self.values[i]
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.moves.push(Move::Swap { i, j });
    }

    pub(crate) fn overwrite(&mut self, i: usize, value: T) {
        self.values[i] = value.clone();
        self.moves.push(Move::Overwrite { i, value });
    }

    pub(crate) fn finish(self) -> MoveLog<T> {
        MoveLog {
            array_len: self.values.len(),
            moves: self.moves,
        }
    }
}
