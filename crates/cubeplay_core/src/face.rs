//! Faces of the cube and sticker colors.

use std::ops::{Index, IndexMut};

use cgmath::Vector3;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{Axis, Sign};

/// Order in which [`Face::next_in_cycle()`] visits the faces.
pub const FACE_CYCLE: [Face; 6] = [
    Face::Front,
    Face::Right,
    Face::Back,
    Face::Left,
    Face::Top,
    Face::Bottom,
];

/// One of the six outward-facing 3x3 grids of the cube.
///
/// Each face is fixed to one axis and one side of that axis.
#[derive(EnumIter, Display, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Face {
    /// `x = +1`
    Right = 0,
    /// `x = -1`
    Left = 1,
    /// `y = +1`
    Top = 2,
    /// `y = -1`
    Bottom = 3,
    /// `z = +1`
    #[default]
    Front = 4,
    /// `z = -1`
    Back = 5,
}
impl Face {
    /// All faces, in the same order as their discriminants.
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Returns the axis perpendicular to the face.
    pub const fn axis(self) -> Axis {
        use Face::*;

        match self {
            Right | Left => Axis::X,
            Top | Bottom => Axis::Y,
            Front | Back => Axis::Z,
        }
    }
    /// Returns which side of the axis the face is on.
    pub const fn sign(self) -> Sign {
        use Face::*;

        match self {
            Right | Top | Front => Sign::Pos,
            Left | Bottom | Back => Sign::Neg,
        }
    }
    /// Returns the coordinate shared by every cubie on the face along
    /// [`Face::axis()`].
    pub const fn value(self) -> i8 {
        self.sign().int()
    }

    /// Returns the face on the given side of an axis.
    pub const fn from_axis_sign(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => Right,
            (Axis::X, Sign::Neg) => Left,
            (Axis::Y, Sign::Pos) => Top,
            (Axis::Y, Sign::Neg) => Bottom,
            (Axis::Z, Sign::Pos) => Front,
            (Axis::Z, Sign::Neg) => Back,
        }
    }
    /// Returns the face whose outward normal is `v`, or `None` if `v` is not a
    /// unit lattice vector.
    pub fn from_normal(v: Vector3<i8>) -> Option<Self> {
        Face::iter().find(|f| f.normal() == v)
    }

    /// Returns the opposite face.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_axis_sign(self.axis(), match self.sign() {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        })
    }

    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vector3<i8> {
        let mut ret = Vector3::new(0, 0, 0);
        ret[self.axis().index()] = self.value();
        ret
    }

    /// Returns whether the face is one of the four side faces, whose "up"
    /// direction on screen is always `y+`.
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
    /// Returns whether the face is the top or bottom face, whose on-screen
    /// orientation depends on the camera.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Face::Top | Face::Bottom)
    }

    /// Returns the next face in [`FACE_CYCLE`].
    #[must_use]
    pub fn next_in_cycle(self) -> Self {
        let i = FACE_CYCLE.iter().position(|&f| f == self).unwrap_or(0);
        FACE_CYCLE[(i + 1) % FACE_CYCLE.len()]
    }

    /// Returns the color of the stickers on this face when the cube is solved.
    pub const fn color(self) -> Color {
        use Face::*;

        match self {
            Right => Color::Red,
            Left => Color::Orange,
            Top => Color::White,
            Bottom => Color::Yellow,
            Front => Color::Green,
            Back => Color::Blue,
        }
    }

    /// Returns the single-letter notation symbol of the face.
    pub const fn symbol(self) -> char {
        use Face::*;

        match self {
            Right => 'R',
            Left => 'L',
            Top => 'U',
            Bottom => 'D',
            Front => 'F',
            Back => 'B',
        }
    }
}

/// Sticker color.
#[derive(EnumIter, Display, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// Right face.
    Red,
    /// Left face.
    Orange,
    /// Top face.
    White,
    /// Bottom face.
    Yellow,
    /// Front face.
    Green,
    /// Back face.
    Blue,
    /// Internal side of a cubie, which is never visible from outside the cube.
    #[default]
    Black,
}
impl Color {
    /// Returns a single uppercase letter for the color.
    pub const fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Black => '.',
        }
    }
}

/// Value for each of the six faces.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PerFace<T>([T; 6]);
impl<T> Index<Face> for PerFace<T> {
    type Output = T;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face as usize]
    }
}
impl<T> IndexMut<Face> for PerFace<T> {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face as usize]
    }
}
impl<T> PerFace<T> {
    /// Constructs a value for each face using a function.
    pub fn from_fn(mut f: impl FnMut(Face) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Face::ALL[i])))
    }

    /// Returns an iterator over faces and their values.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &T)> {
        Face::ALL.into_iter().zip(&self.0)
    }
}
