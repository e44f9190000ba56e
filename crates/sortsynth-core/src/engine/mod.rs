#![forbid(unsafe_code)]

//! Move-recording sort engines.
//!
//! Every engine takes the input by shared reference, sorts a private copy and
//! returns the [`MoveLog`] of what it did. The caller's slice is never
//! touched, so an engine can run against whatever is currently on screen
//! while a previous playback still owns its own copy.
//!
//! | Algorithm   | Moves emitted                                   |
//! |-------------|-------------------------------------------------|
//! | `bubble`    | Swap per inverted adjacent pair                 |
//! | `insertion` | Swap per shift, Overwrite per key placement     |
//! | `selection` | at most one Swap per position                   |
//! | `heap`      | Swaps from sift-down and root extraction        |
//! | `quick`     | Lomuto Swaps, including self-swaps              |
//! | `merge`     | Overwrite per merged position                   |

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble;
pub use heap::heap;
pub use insertion::insertion;
pub use merge::merge;
pub use quick::quick;
pub use selection::selection;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SortError};
use crate::moves::MoveLog;

/// The six supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Heap,
    Quick,
    Merge,
}

impl Algorithm {
    /// All algorithms in menu order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Heap,
        Algorithm::Quick,
        Algorithm::Merge,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Insertion => "insertion",
            Self::Selection => "selection",
            Self::Heap => "heap",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }

    /// Run this algorithm's engine against a private copy of `values`.
    #[must_use]
    pub fn run<T: PartialOrd + Clone>(self, values: &[T]) -> MoveLog<T> {
        match self {
            Self::Bubble => bubble(values),
            Self::Insertion => insertion(values),
            Self::Selection => selection(values),
            Self::Heap => heap(values),
            Self::Quick => quick(values),
            Self::Merge => merge(values),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SortError::invalid_algorithm(s))
    }
}

/// Sort `values` with `algorithm`, returning the recorded move log.
#[must_use]
pub fn sort<T: PartialOrd + Clone>(algorithm: Algorithm, values: &[T]) -> MoveLog<T> {
    let _span = tracing::debug_span!(
        "engine.sort",
        algorithm = %algorithm,
        len = values.len(),
    )
    .entered();

    let log = algorithm.run(values);
    tracing::debug!(
        target: "sortsynth.engine",
        algorithm = %algorithm,
        moves = log.len(),
        swaps = log.swap_count(),
        "sort engine finished"
    );
    log
}

/// Sort by algorithm name.
///
/// An unknown name fails with [`SortError::InvalidAlgorithm`] before any work
/// is done.
pub fn sort_by_name(name: &str, values: &[f64]) -> Result<MoveLog> {
    let algorithm: Algorithm = name.parse()?;
    Ok(sort(algorithm, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_name() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>(), Ok(algo));
            assert_eq!(algo.to_string(), algo.name());
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(" Quick ".parse::<Algorithm>(), Ok(Algorithm::Quick));
        assert_eq!("HEAP".parse::<Algorithm>(), Ok(Algorithm::Heap));
    }

    #[test]
    fn unknown_name_is_invalid_algorithm() {
        let err = sort_by_name("bogo", &[0.2, 0.1]).unwrap_err();
        assert_eq!(err, SortError::invalid_algorithm("bogo"));
    }

    #[test]
    fn sort_does_not_touch_input() {
        let input = vec![0.4, 0.3, 0.2, 0.1];
        for algo in Algorithm::ALL {
            let log = sort(algo, &input);
            assert_eq!(input, vec![0.4, 0.3, 0.2, 0.1]);
            assert_eq!(log.replay(&input), vec![0.1, 0.2, 0.3, 0.4], "{algo}");
        }
    }

    #[test]
    fn empty_and_singleton_produce_empty_logs() {
        for algo in Algorithm::ALL {
            assert!(sort::<f64>(algo, &[]).is_empty(), "{algo}");
            assert!(sort(algo, &[0.5]).is_empty(), "{algo}");
        }
    }
}
