//! Lattice axes and signs.

use std::ops::{Mul, Neg};

use cgmath::{Deg, Vector3};
use strum::{Display, EnumIter};

/// 3-dimensional axis.
#[derive(EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns the perpendicular axes from this one, using the left-hand rule.
    /// (The cross product of the returned axes is the opposite of the input.)
    ///
    /// A positive quarter turn around `self` takes the first axis to the
    /// second, which is a clockwise rotation when viewed from the positive end
    /// of `self`.
    pub const fn perpendiculars(self) -> [Axis; 2] {
        use Axis::*;
        match self {
            X => [Z, Y], // X+ => rotate from Z+ to Y+.
            Y => [X, Z], // Y+ => rotate from X+ to Z+.
            Z => [Y, X], // Z+ => rotate from Y+ to X+.
        }
    }

    /// Returns the index of this axis into a 3D vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}

/// Positive or negative.
///
/// Used both for the side of the cube that a face is on and for the direction
/// of a quarter turn, where [`Sign::Pos`] means clockwise when viewed from the
/// positive end of the axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }

    /// Returns the signed angle of a quarter turn in this direction.
    pub fn quarter_turn(self) -> Deg<f32> {
        Deg(90.0 * self.float())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_perpendiculars_are_left_handed() {
        for axis in Axis::iter() {
            let [a, b] = axis.perpendiculars();
            let cross = a.unit_vec3().cross(b.unit_vec3());
            assert_eq!(cross, -axis.unit_vec3());
        }
    }

    #[test]
    fn test_sign_arithmetic() {
        assert_eq!(Sign::Neg * Sign::Neg, Sign::Pos);
        assert_eq!(-Sign::Pos, Sign::Neg);
        assert_eq!(Sign::Neg.int(), -1);
    }
}
