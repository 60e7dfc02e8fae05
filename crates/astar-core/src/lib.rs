//! **astar-core**: the grid model shared by the A* search crates.
//!
//! This crate provides the geometry primitives ([`Coord`], [`Range`],
//! [`Direction`]), the validated input contract ([`GridSpec`]) and the node
//! arena ([`Grid`]) that a search mutates in place.

pub mod geom;
pub mod grid;

pub use geom::{Coord, Direction, Range};
pub use grid::{Endpoint, Grid, GridSpec, INFINITE_COST, Node, NodeId, SpecError};
