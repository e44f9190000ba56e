#![forbid(unsafe_code)]

//! SortSynth core
//!
//! Sort engines that record every elementary mutation instead of applying it
//! out of sight, plus the pure helpers the playback layer needs.
//!
//! # Key Components
//!
//! - [`Move`] / [`MoveLog`] - Elementary mutations and the frozen log of them
//! - [`Algorithm`] - The six engines: bubble, insertion, selection, heap, quick, merge
//! - [`sort`] / [`sort_by_name`] - Engine entry points
//! - [`ToneMapper`] - Value to frequency mapping
//! - [`generate_array`] - Uniform random inputs in `[0, 1)`
//!
//! # Role in SortSynth
//! `sortsynth-core` has no notion of time. It produces move logs; the
//! `sortsynth-runtime` crate replays them step by step with rendering and
//! audio side effects.

pub mod array;
pub mod engine;
pub mod error;
pub mod moves;
pub mod tone;

pub use array::{DEFAULT_ARRAY_LEN, generate_array, generate_array_with, is_sorted, seeded_rng};
pub use engine::{Algorithm, sort, sort_by_name};
pub use error::{Result, SortError};
pub use moves::{Move, MoveLog};
pub use tone::{DEFAULT_BASE_HZ, DEFAULT_SPAN_HZ, ToneMapper, tone_frequency};
