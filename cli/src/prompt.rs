//! Interactive console dialogue for entering a scenario.

use std::io::{BufRead, Write};

use crate::scenario::{
    CoordBase, PartialSpec, ScenarioError, parse_coord, parse_coord_list, parse_dimension,
    parse_yes_no,
};

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, ScenarioError> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask for height, width, start, end, walls and diagonal movement, in that
/// order. Coordinates are read as `x,y` in `base` numbering; walls are
/// separated by spaces and may be left blank.
pub fn prompt_scenario<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base: CoordBase,
) -> Result<PartialSpec, ScenarioError> {
    let height = parse_dimension("height", &ask(input, output, "Enter height of grid: ")?)?;
    let width = parse_dimension("width", &ask(input, output, "Enter width of grid: ")?)?;
    let start = parse_coord(
        &ask(input, output, "Enter start position separated by , : ")?,
        base,
    )?;
    let end = parse_coord(
        &ask(input, output, "Enter end position separated by , : ")?,
        base,
    )?;
    let walls = parse_coord_list(
        &ask(
            input,
            output,
            "Enter coordinates of walls separated by spaces: ",
        )?,
        base,
    )?;
    let diagonal = parse_yes_no(&ask(input, output, "Can move diagonally? Yes/No ")?);

    Ok(PartialSpec {
        width: Some(width),
        height: Some(height),
        start: Some(start),
        end: Some(end),
        walls: Some(walls),
        diagonal: Some(diagonal),
    })
}
