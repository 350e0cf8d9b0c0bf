//! Merge and analyze force time series written by CFD solvers.
//!
//! A case directory holds one sub-directory per restart, named after its start
//! time, each with one or more `force*.dat` files. [`Forces::load`] locates and
//! merges them into one time-ordered [`ForceSeries`] and derives averages,
//! standard deviations and smoothed series over selected time windows.

pub mod config;
pub mod error;
pub mod filter;
pub mod forces;
pub mod index;
pub mod loader;
pub mod model;
pub mod parser;
pub mod stats;
pub mod table;

pub use config::{Analysis, Config};
pub use error::{ForcesError, Result};
pub use filter::{FilteredForces, Kernel};
pub use forces::{Forces, Reference};
pub use index::TimeRange;
pub use loader::DuplicatePolicy;
pub use model::{Axes, Component, ForceMap, ForceRecord, ForceSeries, ForceType};
pub use stats::MeanStd;
pub use table::ForceTable;
