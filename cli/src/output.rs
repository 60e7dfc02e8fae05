//! Printing results.

use std::io::{self, Write};

use astar_core::Grid;
use astar_paths::{FailureReason, PathResult, SearchOptions, render_map, render_moves};

use crate::scenario::CoordBase;

/// Human-readable report: the plain map, then the moves and the solution
/// diagram, or the reason no path was found.
pub fn write_text<W: Write>(
    out: &mut W,
    grid: &Grid,
    result: &PathResult,
    options: &SearchOptions,
    base: CoordBase,
    render: bool,
) -> io::Result<()> {
    if render {
        for row in render_map(grid) {
            writeln!(out, "{}", row.trim_end())?;
        }
        writeln!(out)?;
    }

    match result {
        PathResult::Success {
            path,
            moves,
            cost,
            rendered,
        } => {
            writeln!(out, "Path found: {} moves, cost {cost:.2}", moves.len())?;
            let cells: Vec<String> = path.iter().map(|&c| base.display(c)).collect();
            writeln!(out, "Cells: {}", cells.join(" "))?;
            writeln!(out, "Moves: {}", render_moves(moves))?;
            if let Some(rows) = rendered {
                writeln!(out)?;
                for row in rows {
                    writeln!(out, "{}", row.trim_end())?;
                }
            }
        }
        PathResult::Failure {
            reason: FailureReason::NoPathExists,
        } => writeln!(out, "No solution possible")?,
        PathResult::Failure {
            reason: FailureReason::BudgetExceeded,
        } => match options.max_iterations {
            Some(n) => writeln!(out, "Gave up after {n} iterations")?,
            None => writeln!(out, "Gave up: {}", FailureReason::BudgetExceeded)?,
        },
    }
    Ok(())
}

/// The result as pretty JSON. Coordinates are zero-based.
pub fn write_json<W: Write>(out: &mut W, result: &PathResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astar_core::{Coord, GridSpec};
    use astar_paths::solve_grid;

    fn report(spec: &GridSpec, render: bool) -> String {
        let mut grid = Grid::new(spec).unwrap();
        let options = SearchOptions::default();
        let result = solve_grid(&mut grid, options, render).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &grid, &result, &options, CoordBase::OneBased, render).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_report_for_a_detour() {
        let spec = GridSpec::new(3, 2, Coord::new(0, 0), Coord::new(2, 0))
            .with_walls([Coord::new(1, 0)]);
        let text = report(&spec, true);
        let expected = "\
S W E
X X X

Path found: 4 moves, cost 4.00
Cells: 1,1 1,2 2,2 3,2 3,1
Moves: South, East, East, North

S W E
v   ^
X>X>X
";
        assert_eq!(text, expected);
    }

    #[test]
    fn text_report_without_diagrams() {
        let spec = GridSpec::new(3, 1, Coord::new(0, 0), Coord::new(2, 0))
            .with_walls([Coord::new(1, 0)]);
        assert_eq!(report(&spec, false), "No solution possible\n");
    }

    #[test]
    fn json_report() {
        let result = PathResult::Failure {
            reason: FailureReason::NoPathExists,
        };
        let mut out = Vec::new();
        write_json(&mut out, &result).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "failure");
        assert_eq!(value["reason"], "no_path_exists");
    }
}
