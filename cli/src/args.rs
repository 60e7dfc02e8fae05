use std::path::PathBuf;

use astar_core::Coord;
use astar_paths::{Metric, SearchOptions};
use clap::{ArgAction, Parser, ValueEnum};

use crate::scenario::{CoordBase, PartialSpec, ScenarioError, parse_coord, parse_coord_list};

/// Output format for results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Find a shortest path between two cells of a grid with walls, using A*.
///
/// The scenario comes from flags, a JSON file (--scenario), an interactive
/// dialogue (--interactive) or the random generator (--random). Flags
/// override values from the file or generator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON scenario file (zero-based coordinates)
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Ask for the scenario on the console
    #[arg(short, long, conflicts_with_all = ["scenario", "random"])]
    pub interactive: bool,

    /// Generate random walls
    #[arg(long, conflicts_with = "scenario")]
    pub random: bool,

    /// Probability of a cell becoming a wall with --random
    #[arg(long, default_value_t = 0.3)]
    pub density: f64,

    /// Seed for --random
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub width: Option<i32>,

    #[arg(long)]
    pub height: Option<i32>,

    #[arg(long, value_name = "X,Y")]
    pub start: Option<String>,

    #[arg(long, value_name = "X,Y")]
    pub end: Option<String>,

    /// A wall cell; repeat for more
    #[arg(long = "wall", value_name = "X,Y")]
    pub wall: Vec<String>,

    /// Space-separated wall cells, e.g. "2,1 2,2"
    #[arg(long, value_name = "LIST")]
    pub walls: Option<String>,

    /// Allow diagonal moves
    #[arg(short, long)]
    pub diagonal: bool,

    /// Forbid diagonal moves, overriding a scenario file
    #[arg(long, conflicts_with = "diagonal")]
    pub no_diagonal: bool,

    /// Typed coordinates start at 0,0 instead of 1,1
    #[arg(long)]
    pub zero_based: bool,

    /// Distance for step costs and the heuristic: euclidean or manhattan
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Give up after this many expansions
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Only lower open costs instead of overwriting them
    #[arg(long)]
    pub relax: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Skip the map and solution diagrams
    #[arg(long)]
    pub no_render: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn coord_base(&self) -> CoordBase {
        if self.zero_based {
            CoordBase::ZeroBased
        } else {
            CoordBase::OneBased
        }
    }

    /// Scenario fields given on the command line.
    pub fn partial_spec(&self) -> Result<PartialSpec, ScenarioError> {
        let base = self.coord_base();
        let coord = |s: &Option<String>| s.as_deref().map(|s| parse_coord(s, base)).transpose();

        let mut walls: Option<Vec<Coord>> = None;
        if let Some(list) = &self.walls {
            walls = Some(parse_coord_list(list, base)?);
        }
        if !self.wall.is_empty() {
            let extra = self
                .wall
                .iter()
                .map(|s| parse_coord(s, base))
                .collect::<Result<Vec<_>, _>>()?;
            walls.get_or_insert_with(Vec::new).extend(extra);
        }

        Ok(PartialSpec {
            width: self.width,
            height: self.height,
            start: coord(&self.start)?,
            end: coord(&self.end)?,
            walls,
            diagonal: match (self.diagonal, self.no_diagonal) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
        })
    }

    /// `file` options overridden by any search flags.
    pub fn search_options(&self, file: Option<SearchOptions>) -> SearchOptions {
        let mut options = file.unwrap_or_default();
        if let Some(metric) = self.metric {
            options.metric = metric;
        }
        if self.max_iterations.is_some() {
            options.max_iterations = self.max_iterations;
        }
        options.relax |= self.relax;
        options
    }

    /// `env_logger` filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioFile;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("astar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_build_a_one_based_spec() {
        let args = parse(&[
            "--width", "3", "--height", "3", "--start", "1,1", "--end", "3,3", "--wall", "2,2",
            "-d",
        ]);
        let spec = args.partial_spec().unwrap().finish().unwrap();
        assert_eq!(spec.start, Coord::new(0, 0));
        assert_eq!(spec.end, Coord::new(2, 2));
        assert_eq!(spec.walls, vec![Coord::new(1, 1)]);
        assert!(spec.diagonal);
    }

    #[test]
    fn wall_list_and_repeated_walls_combine() {
        let args = parse(&[
            "--zero-based",
            "--walls",
            "1,0 1,1",
            "--wall",
            "2,2",
        ]);
        let p = args.partial_spec().unwrap();
        assert_eq!(
            p.walls,
            Some(vec![Coord::new(1, 0), Coord::new(1, 1), Coord::new(2, 2)])
        );
        assert_eq!(p.diagonal, None);
        assert_eq!(p.width, None);
    }

    #[test]
    fn no_diagonal_overrides_a_scenario_file() {
        let file = ScenarioFile::from_json(
            r#"{"width": 3, "height": 3, "start": {"x": 0, "y": 0},
                "end": {"x": 2, "y": 2}, "diagonal": true}"#,
        )
        .unwrap();
        let args = parse(&["--no-diagonal"]);
        assert_eq!(args.partial_spec().unwrap().diagonal, Some(false));
        let spec = file
            .clone()
            .into_partial()
            .merge(args.partial_spec().unwrap())
            .finish()
            .unwrap();
        assert!(!spec.diagonal);

        let spec = file.into_partial().merge(parse(&[]).partial_spec().unwrap());
        assert_eq!(spec.diagonal, Some(true));

        assert!(Args::try_parse_from(["astar", "-d", "--no-diagonal"]).is_err());
    }

    #[test]
    fn search_flags_override_file() {
        let args = parse(&["--metric", "manhattan", "--relax"]);
        let file = SearchOptions {
            max_iterations: Some(10),
            ..SearchOptions::default()
        };
        let options = args.search_options(Some(file));
        assert_eq!(options.metric, Metric::Manhattan);
        assert_eq!(options.max_iterations, Some(10));
        assert!(options.relax);
    }

    #[test]
    fn bad_metric_is_a_usage_error() {
        let r = Args::try_parse_from(["astar", "--metric", "octile"]);
        assert!(r.is_err());
    }

    #[test]
    fn interactive_conflicts_with_random() {
        let r = Args::try_parse_from(["astar", "--interactive", "--random"]);
        assert!(r.is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(parse(&[]).log_filter(), "warn");
        assert_eq!(parse(&["-vv"]).log_filter(), "debug");
        assert_eq!(parse(&["-vvvv"]).log_filter(), "trace");
        assert_eq!(parse(&["--format", "json"]).format, Format::Json);
    }
}
