//! Wiring: arguments → scenario → search → report.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use astar_core::Grid;
use astar_paths::{PathError, SolveError, solve_grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::args::{Args, Format};
use crate::output::{write_json, write_text};
use crate::prompt::prompt_scenario;
use crate::random::random_scenario;
use crate::scenario::{PartialSpec, ScenarioError, ScenarioFile};

/// Top-level failure of a run, grouped by exit code.
#[derive(Debug)]
pub enum CliError {
    /// Bad or incomplete scenario.
    Scenario(ScenarioError),
    /// The search produced an inconsistent result.
    Internal(PathError),
    /// Writing the report failed.
    Output(io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Scenario(_) => ExitCode::from(2),
            CliError::Internal(_) | CliError::Output(_) => ExitCode::from(3),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario(e) => e.fmt(f),
            Self::Internal(e) => write!(f, "internal error: {e}"),
            Self::Output(e) => write!(f, "cannot write output: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scenario(e) => Some(e),
            Self::Internal(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        Self::Scenario(e)
    }
}

impl From<SolveError> for CliError {
    fn from(e: SolveError) -> Self {
        match e {
            SolveError::Spec(e) => Self::Scenario(ScenarioError::Invalid(e)),
            SolveError::Path(e) => Self::Internal(e),
        }
    }
}

/// Whether a run found a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Found => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(1),
        }
    }
}

/// Execute one run. `input` feeds the interactive dialogue and the report
/// goes to `out`. Prompts share `out` for text reports and go to stderr for
/// JSON, so `out` stays a single JSON document.
pub fn run<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome, CliError> {
    let base = args.coord_base();

    let (mut partial, file_options) = match &args.scenario {
        Some(path) => {
            let file = ScenarioFile::load(path)?;
            let search = file.search;
            (file.into_partial(), search)
        }
        None => (PartialSpec::default(), None),
    };
    if args.interactive {
        partial = match args.format {
            Format::Text => prompt_scenario(input, out, base)?,
            Format::Json => prompt_scenario(input, &mut io::stderr().lock(), base)?,
        };
    }
    partial = partial.merge(args.partial_spec()?);
    if args.random {
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("random scenario seed {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        partial = random_scenario(&mut rng, partial, args.density)?;
    }

    let spec = partial.finish()?;
    let options = args.search_options(file_options);
    log::debug!(
        "searching {}x{} grid from {} to {} ({} walls, diagonal: {}, {:?})",
        spec.width,
        spec.height,
        spec.start,
        spec.end,
        spec.walls.len(),
        spec.diagonal,
        options
    );

    let render = !args.no_render;
    let mut grid = Grid::new(&spec).map_err(ScenarioError::Invalid)?;
    let result = solve_grid(&mut grid, options, render)?;

    let written = match args.format {
        Format::Text => write_text(out, &grid, &result, &options, base, render),
        Format::Json => write_json(out, &result),
    };
    written.map_err(CliError::Output)?;

    Ok(if result.is_success() {
        Outcome::Found
    } else {
        Outcome::NotFound
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Cursor;

    fn exec(argv: &[&str], stdin: &str) -> (Result<Outcome, CliError>, String) {
        let args = Args::try_parse_from(std::iter::once("astar").chain(argv.iter().copied()))
            .unwrap();
        let mut input = Cursor::new(stdin.to_string());
        let mut out = Vec::new();
        let r = run(&args, &mut input, &mut out);
        (r, String::from_utf8(out).unwrap())
    }

    #[test]
    fn flags_scenario_finds_path() {
        let (r, text) = exec(
            &["--width", "3", "--height", "3", "--start", "1,1", "--end", "3,3"],
            "",
        );
        assert_eq!(r.unwrap(), Outcome::Found);
        assert!(text.contains("Path found: 4 moves"));
        assert!(text.starts_with("S X X\n"));
    }

    #[test]
    fn blocked_scenario_reports_no_path() {
        let (r, text) = exec(
            &[
                "--zero-based", "--width", "3", "--height", "1", "--start", "0,0", "--end",
                "2,0", "--wall", "1,0", "--no-render",
            ],
            "",
        );
        assert_eq!(r.unwrap(), Outcome::NotFound);
        assert_eq!(text, "No solution possible\n");
    }

    #[test]
    fn interactive_scenario() {
        let (r, text) = exec(&["-i", "--format", "json"], "3\n3\n1,1\n3,3\n\nyes\n");
        assert_eq!(r.unwrap(), Outcome::Found);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["path"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn interactive_text_report_follows_the_prompts() {
        let (r, text) = exec(&["-i", "--no-render"], "1\n2\n1,1\n2,1\n\nno\n");
        assert_eq!(r.unwrap(), Outcome::Found);
        assert!(text.starts_with("Enter height of grid: "));
        assert!(text.ends_with("Moves: East\n"));
    }

    #[test]
    fn budget_flag_limits_search() {
        let (r, text) = exec(
            &[
                "--width", "20", "--height", "20", "--start", "1,1", "--end", "20,20",
                "--max-iterations", "5", "--no-render",
            ],
            "",
        );
        assert_eq!(r.unwrap(), Outcome::NotFound);
        assert_eq!(text, "Gave up after 5 iterations\n");
    }

    #[test]
    fn seeded_random_runs_repeat() {
        let argv = ["--random", "--seed", "9", "--width", "8", "--height", "6", "--format", "json"];
        let (a, first) = exec(&argv, "");
        let (b, second) = exec(&argv, "");
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_dimensions_are_scenario_errors() {
        let (r, _) = exec(&["--start", "1,1", "--end", "2,2"], "");
        let err = r.unwrap_err();
        assert!(matches!(err, CliError::Scenario(ScenarioError::MissingField("width"))));
        assert_eq!(err.exit_code(), ExitCode::from(2));
    }

    #[test]
    fn wall_on_start_is_rejected() {
        let (r, _) = exec(
            &["--width", "2", "--height", "2", "--start", "1,1", "--end", "2,2", "--wall", "1,1"],
            "",
        );
        assert!(matches!(
            r,
            Err(CliError::Scenario(ScenarioError::Invalid(_)))
        ));
    }

    #[test]
    fn missing_scenario_file_is_an_io_error() {
        let (r, _) = exec(&["--scenario", "/nonexistent/scenario.json"], "");
        assert!(matches!(r, Err(CliError::Scenario(ScenarioError::Io(_)))));
    }
}
