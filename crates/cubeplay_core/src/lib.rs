//! Lattice model and face geometry for an interactive 3x3x3 Rubik's cube.
//!
//! The cube is made of 26 cubies at integer positions in `{-1, 0, 1}³`. Input
//! is resolved by [`geometry`] into a layer and a signed quarter turn, and
//! [`CubeModel`] applies it once the caller is done animating.

mod axis;
mod cubie;
mod face;
pub mod geometry;
mod model;

#[cfg(test)]
mod tests;

/// Re-export of `cgmath`.
pub use cgmath;

pub use axis::{Axis, Sign};
pub use cubie::{Cubie, CubieId, LATTICE_EPSILON, LatticePos, rotate_lattice, rotate_vector, twist_matrix};
pub use face::{Color, FACE_CYCLE, Face, PerFace};
pub use geometry::{Arrow, HorizontalLayout};
pub use model::{CubeModel, CubeState, Cursor, Move, TwistError, TwistLayer};

/// Number of cubies in the cube.
pub const CUBIE_COUNT: usize = 26;
