//! Cubies and the lattice rotations that move them.

use std::fmt;

use cgmath::{Deg, Angle, Matrix3, Rad, Vector3};

use crate::{Axis, Color, Face, PerFace};

/// Position of a cubie in lattice space. Each coordinate is -1, 0, or 1.
pub type LatticePos = Vector3<i8>;

/// Maximum distance along each axis for a floating-point position to be
/// considered equal to a lattice point.
pub const LATTICE_EPSILON: f32 = 0.1;

/// Stable identifier for a cubie.
///
/// IDs are assigned once when the cube is constructed and never change, so a
/// renderer may use them as keys for its meshes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the 26 unit pieces composing the cube.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cubie {
    /// Identity of the cubie.
    pub id: CubieId,
    /// Current lattice position.
    pub position: LatticePos,
    /// Lattice position in the solved state.
    pub home: LatticePos,
    /// Sticker color facing each direction. Internal sides are
    /// [`Color::Black`].
    pub stickers: PerFace<Color>,
}
impl Cubie {
    /// Constructs a cubie in its solved position, with a sticker on every
    /// side that faces outward.
    pub fn new_solved(id: CubieId, position: LatticePos) -> Self {
        let stickers = PerFace::from_fn(|face| {
            if position[face.axis().index()] == face.value() {
                face.color()
            } else {
                Color::Black
            }
        });
        Self {
            id,
            position,
            home: position,
            stickers,
        }
    }

    /// Returns the color that the cubie shows in the direction of `face`.
    pub fn sticker(&self, face: Face) -> Color {
        self.stickers[face]
    }

    /// Returns the cubie's coordinate along `axis`.
    pub fn coord(&self, axis: Axis) -> i8 {
        self.position[axis.index()]
    }

    /// Returns whether the cubie is in the given layer.
    pub fn is_in_layer(&self, axis: Axis, value: i8) -> bool {
        self.coord(axis) == value
    }

    /// Returns whether the cubie is within [`LATTICE_EPSILON`] of a
    /// floating-point position.
    pub fn is_near(&self, pos: Vector3<f32>) -> bool {
        (0..3).all(|i| (self.position[i] as f32 - pos[i]).abs() < LATTICE_EPSILON)
    }

    /// Returns whether the cubie is in its home position with its stickers
    /// facing their home directions.
    pub fn is_home(&self) -> bool {
        *self == Self::new_solved(self.id, self.home)
    }

    /// Rotates the cubie around the center of the cube and snaps it back to
    /// the lattice.
    ///
    /// See [`rotate_vector()`] for the sign convention.
    pub fn rotate(&mut self, axis: Axis, angle: Deg<f32>) {
        self.position = rotate_lattice(self.position, axis, angle);

        let old_stickers = self.stickers;
        for (face, &color) in old_stickers.iter() {
            let new_normal = rotate_lattice(face.normal(), axis, angle);
            match Face::from_normal(new_normal) {
                Some(new_face) => self.stickers[new_face] = color,
                None => log::error!("rotation by {angle:?} does not preserve faces"),
            }
        }
    }
}

/// Rotates a vector around an axis through the origin.
///
/// A positive angle is clockwise when viewed from the positive end of the
/// axis, so a positive quarter turn takes the first of
/// [`Axis::perpendiculars()`] to the second.
pub fn rotate_vector(v: Vector3<f32>, axis: Axis, angle: Deg<f32>) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    let [a, b] = axis.perpendiculars().map(Axis::index);
    let mut ret = v;
    ret[a] = v[a] * cos - v[b] * sin;
    ret[b] = v[a] * sin + v[b] * cos;
    ret
}

/// Rotates a lattice position and rounds the result to the nearest lattice
/// point.
pub fn rotate_lattice(pos: LatticePos, axis: Axis, angle: Deg<f32>) -> LatticePos {
    rotate_vector(pos.map(f32::from), axis, angle).map(|x| x.round() as i8)
}

/// Returns the rotation matrix used for rendering a rotation of `angle` around
/// `axis`, using the same sign convention as [`rotate_vector()`].
pub fn twist_matrix(axis: Axis, angle: Deg<f32>) -> Matrix3<f32> {
    // `cgmath` uses the right-hand rule, which is the reverse of ours.
    Matrix3::from_axis_angle(axis.unit_vec3(), -Rad::from(angle))
}
