//! Mapping from faces, cursor positions, and on-screen directions to lattice
//! positions and layer rotations.
//!
//! The four side faces are always displayed with `y+` pointing up on screen,
//! so arrows on those faces map to a fixed rotation. The top and bottom faces
//! are seen at an angle that depends on the camera, so arrows on those faces
//! are resolved relative to the side face nearest the viewer.

use cgmath::Vector3;
use float_ord::FloatOrd;
use strum::{Display, EnumIter};

use crate::{Axis, Face, LatticePos, Sign};

/// On-screen direction.
#[derive(EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Arrow {
    /// Toward the top of the screen.
    Up,
    /// Toward the bottom of the screen.
    Down,
    /// Toward the left of the screen.
    Left,
    /// Toward the right of the screen.
    Right,
}

/// Which side face appears in each on-screen direction when looking at the
/// top or bottom face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HorizontalLayout {
    /// Side face at the top of the screen.
    pub forward: Face,
    /// Side face at the bottom of the screen.
    pub backward: Face,
    /// Side face at the left of the screen.
    pub left: Face,
    /// Side face at the right of the screen.
    pub right: Face,
}
impl HorizontalLayout {
    /// Returns the side face in the direction of `arrow`.
    pub const fn side_face(self, arrow: Arrow) -> Face {
        match arrow {
            Arrow::Up => self.forward,
            Arrow::Down => self.backward,
            Arrow::Left => self.left,
            Arrow::Right => self.right,
        }
    }
}

/// Returns the lattice position of the sticker at `(row, col)` on `face`.
///
/// Row 0 is the top row and column 0 is the left column when the face is
/// viewed straight on (with `y+` up for side faces). Top and bottom rows are
/// laid out from the front.
pub fn grid_to_lattice(row: u8, col: u8, face: Face) -> LatticePos {
    debug_assert!(row < 3 && col < 3, "grid position ({row}, {col}) out of range");
    let r = row as i8;
    let c = col as i8;
    match face {
        Face::Front => Vector3::new(c - 1, 1 - r, 1),
        Face::Back => Vector3::new(1 - c, 1 - r, -1),
        Face::Left => Vector3::new(-1, 1 - r, c - 1),
        Face::Right => Vector3::new(1, 1 - r, 1 - c),
        Face::Top => Vector3::new(c - 1, 1, 1 - r),
        Face::Bottom => Vector3::new(c - 1, -1, r - 1),
    }
}

/// Returns the axis perpendicular to `face`.
pub const fn axis_of(face: Face) -> Axis {
    face.axis()
}
/// Returns which side of its axis `face` is on.
pub const fn sign_of(face: Face) -> Sign {
    face.sign()
}

/// Returns the face that most directly faces the viewer.
///
/// `camera_direction` points from the viewer toward the center of the cube.
pub fn primary_viewed_face(camera_direction: Vector3<f32>) -> Face {
    let Some(axis) = dominant_axis(camera_direction, &[Axis::X, Axis::Y, Axis::Z]) else {
        return Face::Front;
    };
    face_toward_viewer(camera_direction, axis)
}

/// Returns the side face that most directly faces the viewer, ignoring the
/// vertical component of `camera_direction`. When looking straight up or
/// down, returns [`Face::Front`].
pub fn primary_side_face(camera_direction: Vector3<f32>) -> Face {
    match dominant_axis(camera_direction, &[Axis::X, Axis::Z]) {
        Some(axis) => face_toward_viewer(camera_direction, axis),
        None => Face::Front,
    }
}

fn dominant_axis(v: Vector3<f32>, candidates: &[Axis]) -> Option<Axis> {
    candidates
        .iter()
        .copied()
        .filter(|axis| v[axis.index()] != 0.0)
        .max_by_key(|axis| FloatOrd(v[axis.index()].abs()))
}

fn face_toward_viewer(camera_direction: Vector3<f32>, axis: Axis) -> Face {
    // The camera looks against the outward normal of the face it sees.
    let sign = if camera_direction[axis.index()] > 0.0 {
        Sign::Neg
    } else {
        Sign::Pos
    };
    Face::from_axis_sign(axis, sign)
}

/// Returns which side faces appear in each on-screen direction when `face`
/// (which must be top or bottom) is viewed from `camera_direction`.
///
/// For the top face, the side face nearest the viewer is at the bottom of the
/// screen. The bottom face is seen from below, so forward and backward are
/// swapped while left and right stay the same.
pub fn horizontal_layout(camera_direction: Vector3<f32>, face: Face) -> HorizontalLayout {
    use Face::*;

    let near = primary_side_face(camera_direction);
    let (left, right) = match near {
        Front => (Left, Right),
        Back => (Right, Left),
        Right => (Front, Back),
        Left => (Back, Front),
        Top | Bottom => (Left, Right),
    };
    let (forward, backward) = match face {
        Bottom => (near, near.opposite()),
        _ => (near.opposite(), near),
    };
    HorizontalLayout {
        forward,
        backward,
        left,
        right,
    }
}

/// Returns the rotation that moves the stickers under the cursor in the
/// direction of `arrow`, as seen on screen.
///
/// `camera_direction` is only used for the top and bottom faces. If it is
/// `None`, the viewer is assumed to be on the front side.
pub fn resolve_rotation(
    arrow: Arrow,
    face: Face,
    camera_direction: Option<Vector3<f32>>,
) -> (Axis, Sign) {
    use Arrow::*;
    use Sign::*;

    match face {
        Face::Front => match arrow {
            Up => (Axis::X, Pos),
            Down => (Axis::X, Neg),
            Left => (Axis::Y, Pos),
            Right => (Axis::Y, Neg),
        },
        Face::Back => match arrow {
            Up => (Axis::X, Neg),
            Down => (Axis::X, Pos),
            Left => (Axis::Y, Pos),
            Right => (Axis::Y, Neg),
        },
        Face::Left => match arrow {
            Up => (Axis::Z, Pos),
            Down => (Axis::Z, Neg),
            Left => (Axis::Y, Pos),
            Right => (Axis::Y, Neg),
        },
        Face::Right => match arrow {
            Up => (Axis::Z, Neg),
            Down => (Axis::Z, Pos),
            Left => (Axis::Y, Pos),
            Right => (Axis::Y, Neg),
        },
        Face::Top | Face::Bottom => {
            let camera_direction = camera_direction.unwrap_or(DEFAULT_CAMERA_DIRECTION);
            let target = horizontal_layout(camera_direction, face).side_face(arrow);
            let (axis, sign) = turn_top_toward(target);
            (axis, sign * face.sign())
        }
    }
}

/// Camera direction assumed when none is given: looking at the front face.
const DEFAULT_CAMERA_DIRECTION: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

/// Returns the rotation that moves stickers on the top face toward `side`.
fn turn_top_toward(side: Face) -> (Axis, Sign) {
    match side {
        Face::Front => (Axis::X, Sign::Neg),
        Face::Back => (Axis::X, Sign::Pos),
        Face::Right => (Axis::Z, Sign::Pos),
        Face::Left => (Axis::Z, Sign::Neg),
        // Not a side face.
        Face::Top | Face::Bottom => {
            log::warn!("no horizontal rotation toward {side}");
            (Axis::X, Sign::Pos)
        }
    }
}

/// Returns the coordinate of the layer that [`resolve_rotation()`] would
/// rotate for the sticker at `(row, col)` on `face`.
pub fn layer_coordinate(
    arrow: Arrow,
    row: u8,
    col: u8,
    face: Face,
    camera_direction: Option<Vector3<f32>>,
) -> i8 {
    let (axis, _) = resolve_rotation(arrow, face, camera_direction);
    grid_to_lattice(row, col, face)[axis.index()]
}

/// Returns the `(Δrow, Δcol)` that moves the cursor one sticker in the
/// direction of `arrow`, as seen on screen.
pub fn cursor_step(
    arrow: Arrow,
    face: Face,
    camera_direction: Option<Vector3<f32>>,
) -> (i8, i8) {
    let screen_step = match arrow {
        Arrow::Up => (-1, 0),
        Arrow::Down => (1, 0),
        Arrow::Left => (0, -1),
        Arrow::Right => (0, 1),
    };
    if face.is_vertical() {
        return screen_step;
    }

    let camera_direction = camera_direction.unwrap_or(DEFAULT_CAMERA_DIRECTION);
    let target = horizontal_layout(camera_direction, face)
        .side_face(arrow)
        .normal();
    let center = grid_to_lattice(1, 1, face);
    let candidates = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    candidates
        .into_iter()
        .find(|&(dr, dc)| {
            let moved = grid_to_lattice((1 + dr) as u8, (1 + dc) as u8, face);
            moved - center == target
        })
        .unwrap_or(screen_step)
}
