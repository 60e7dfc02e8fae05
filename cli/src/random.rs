//! Random scenario generation.

use astar_core::{Coord, Range, SpecError};
use rand::Rng;

use crate::scenario::{PartialSpec, ScenarioError};

/// Size used when `--random` is given without dimensions.
pub const DEFAULT_SIZE: i32 = 10;

/// Scatter walls over a `width × height` grid: every cell except `start`
/// and `end` becomes a wall with probability `density`.
pub fn random_walls(
    rng: &mut impl Rng,
    width: i32,
    height: i32,
    start: Coord,
    end: Coord,
    density: f64,
) -> Result<Vec<Coord>, ScenarioError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(ScenarioError::InvalidDensity(density));
    }
    let walls = Range::with_size(width, height)
        .iter()
        .filter(|&c| c != start && c != end && rng.random_bool(density))
        .collect();
    Ok(walls)
}

/// Fill in a random scenario on top of `base`: missing dimensions default to
/// [`DEFAULT_SIZE`], missing endpoints to opposite corners, and walls are
/// generated unless `base` already has some.
pub fn random_scenario(
    rng: &mut impl Rng,
    base: PartialSpec,
    density: f64,
) -> Result<PartialSpec, ScenarioError> {
    let width = base.width.unwrap_or(DEFAULT_SIZE);
    let height = base.height.unwrap_or(DEFAULT_SIZE);
    if width <= 0 || height <= 0 {
        return Err(SpecError::NonPositiveSize { width, height }.into());
    }
    let start = base.start.unwrap_or(Coord::ZERO);
    let end = base.end.unwrap_or(Coord::new(width - 1, height - 1));
    let walls = match base.walls {
        Some(walls) => walls,
        None => random_walls(rng, width, height, start, end, density)?,
    };
    log::debug!(
        "random scenario {width}x{height}, {} walls at density {density}",
        walls.len()
    );
    Ok(PartialSpec {
        width: Some(width),
        height: Some(height),
        start: Some(start),
        end: Some(end),
        walls: Some(walls),
        diagonal: base.diagonal,
    })
}
