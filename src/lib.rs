//! Times two implementations of the same workload and reports how much faster the second one is.
//!
//! A [`Comparison`] calls a baseline [`Collaborator`] once, then a contender once, both with the
//! same workload size, and prints:
//!
//! ```text
//! Python time = 0.0201
//! Cython time = 0.0012
//! Speedup = 16.75
//! ```
//!
//! There is no warm-up, repetition or statistical analysis; each collaborator is measured
//! exactly once.

#[macro_use]
extern crate log;

mod collaborator;
mod comparison;
mod error;
mod format;
pub mod measurement;

pub use crate::collaborator::{Collaborator, PythonModule};
pub use crate::comparison::{speedup, Comparison, Measured, Report};
pub use crate::error::{Error, Result};
