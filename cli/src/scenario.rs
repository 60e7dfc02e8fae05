//! Turning user input into a validated [`GridSpec`].
//!
//! Scenario data can come from flags, a JSON file, the interactive prompt or
//! the random generator. Each source yields a [`PartialSpec`]; later sources
//! override earlier ones and [`PartialSpec::finish`] checks that everything
//! needed is present and valid.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use astar_core::{Coord, GridSpec, SpecError};
use astar_paths::SearchOptions;
use serde::{Deserialize, Serialize};

/// How coordinates typed by a person are numbered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CoordBase {
    /// The first cell is `1,1`.
    #[default]
    OneBased,
    /// The first cell is `0,0`.
    ZeroBased,
}

impl CoordBase {
    #[inline]
    fn offset(self) -> i32 {
        match self {
            CoordBase::OneBased => 1,
            CoordBase::ZeroBased => 0,
        }
    }

    /// Convert a typed coordinate into a grid coordinate. `None` when a
    /// component has no grid counterpart in `i32`.
    #[inline]
    pub fn to_grid(self, x: i32, y: i32) -> Option<Coord> {
        Some(Coord::new(
            x.checked_sub(self.offset())?,
            y.checked_sub(self.offset())?,
        ))
    }

    /// Format a grid coordinate the way the user typed it.
    pub fn display(self, c: Coord) -> String {
        format!("{},{}", c.x + self.offset(), c.y + self.offset())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong before a [`GridSpec`] reaches the search.
#[derive(Debug)]
pub enum ScenarioError {
    /// Text that should be `x,y` is not.
    MalformedCoord(String),
    /// A dimension or coordinate component is not an integer.
    NotANumber { field: &'static str, value: String },
    /// No source supplied a required field.
    MissingField(&'static str),
    /// Random wall density outside `0.0..=1.0`.
    InvalidDensity(f64),
    /// Reading a scenario file or the console failed.
    Io(io::Error),
    /// A scenario file is not valid JSON for [`ScenarioFile`].
    Json(serde_json::Error),
    /// The assembled grid is rejected by the core.
    Invalid(SpecError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCoord(s) => {
                write!(f, "expected a coordinate like '3,4', got '{s}'")
            }
            Self::NotANumber { field, value } => {
                write!(f, "{field} must be a whole number, got '{value}'")
            }
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::InvalidDensity(d) => write!(f, "wall density must be between 0 and 1, got {d}"),
            Self::Io(e) => write!(f, "read error: {e}"),
            Self::Json(e) => write!(f, "bad scenario file: {e}"),
            Self::Invalid(e) => write!(f, "invalid grid: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScenarioError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<SpecError> for ScenarioError {
    fn from(e: SpecError) -> Self {
        Self::Invalid(e)
    }
}

// ---------------------------------------------------------------------------
// Text parsing
// ---------------------------------------------------------------------------

/// Parse a grid dimension.
pub fn parse_dimension(field: &'static str, s: &str) -> Result<i32, ScenarioError> {
    s.trim().parse().map_err(|_| ScenarioError::NotANumber {
        field,
        value: s.trim().to_string(),
    })
}

/// Parse `x,y` into a grid coordinate.
pub fn parse_coord(s: &str, base: CoordBase) -> Result<Coord, ScenarioError> {
    let s = s.trim();
    let mut parts = s.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ScenarioError::MalformedCoord(s.to_string()));
    };
    let component = |v: &str| {
        v.trim().parse::<i32>().map_err(|_| ScenarioError::NotANumber {
            field: "coordinate",
            value: v.trim().to_string(),
        })
    };
    base.to_grid(component(x)?, component(y)?)
        .ok_or_else(|| ScenarioError::MalformedCoord(s.to_string()))
}

/// Parse whitespace-separated `x,y` pairs. Blank input is an empty list.
pub fn parse_coord_list(s: &str, base: CoordBase) -> Result<Vec<Coord>, ScenarioError> {
    s.split_whitespace().map(|c| parse_coord(c, base)).collect()
}

/// `yes`/`y`/`true` (any case) is true, anything else false.
pub fn parse_yes_no(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true"
    )
}

// ---------------------------------------------------------------------------
// Scenario file
// ---------------------------------------------------------------------------

/// On-disk scenario. Coordinates are zero-based; every field is optional so
/// flags can fill in the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFile {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub walls: Vec<Coord>,
    pub diagonal: Option<bool>,
    pub search: Option<SearchOptions>,
}

impl ScenarioFile {
    pub fn from_json(s: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        let file = Self::from_json(&text)?;
        log::info!("loaded scenario from {}", path.display());
        Ok(file)
    }

    pub fn into_partial(self) -> PartialSpec {
        PartialSpec {
            width: self.width,
            height: self.height,
            start: self.start,
            end: self.end,
            walls: (!self.walls.is_empty()).then_some(self.walls),
            diagonal: self.diagonal,
        }
    }
}

// ---------------------------------------------------------------------------
// PartialSpec
// ---------------------------------------------------------------------------

/// A [`GridSpec`] under construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialSpec {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    /// `Some` replaces the walls of earlier sources entirely.
    pub walls: Option<Vec<Coord>>,
    pub diagonal: Option<bool>,
}

impl PartialSpec {
    /// Fields set in `over` win.
    pub fn merge(self, over: PartialSpec) -> PartialSpec {
        PartialSpec {
            width: over.width.or(self.width),
            height: over.height.or(self.height),
            start: over.start.or(self.start),
            end: over.end.or(self.end),
            walls: over.walls.or(self.walls),
            diagonal: over.diagonal.or(self.diagonal),
        }
    }

    /// Check completeness and validity.
    pub fn finish(self) -> Result<GridSpec, ScenarioError> {
        let spec = GridSpec {
            width: self.width.ok_or(ScenarioError::MissingField("width"))?,
            height: self.height.ok_or(ScenarioError::MissingField("height"))?,
            start: self.start.ok_or(ScenarioError::MissingField("start"))?,
            end: self.end.ok_or(ScenarioError::MissingField("end"))?,
            walls: self.walls.unwrap_or_default(),
            diagonal: self.diagonal.unwrap_or(false),
        };
        spec.validate()?;
        Ok(spec)
    }
}
