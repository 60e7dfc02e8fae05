//! Command-line front end for `astar-paths`.
//!
//! A run gathers a scenario (flags, a JSON file, the interactive dialogue or
//! the random generator), solves it and prints a text or JSON report. See
//! [`run`] for the whole pipeline.

pub mod app;
pub mod args;
pub mod output;
pub mod prompt;
pub mod random;
pub mod scenario;

pub use app::{CliError, Outcome, run};
pub use args::{Args, Format};
pub use scenario::{CoordBase, PartialSpec, ScenarioError, ScenarioFile};
