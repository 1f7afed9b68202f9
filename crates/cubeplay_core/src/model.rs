//! Discrete cube state: cubies, cursor, selected face, and move history.

use std::fmt;

use cgmath::{Deg, Vector3};
use itertools::Itertools;
use smallvec::SmallVec;

use crate::geometry::{self, Arrow};
use crate::{Axis, Cubie, CubieId, Face, LatticePos, Sign};

/// Cursor position on the current face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// Row, from 0 to 2.
    pub row: u8,
    /// Column, from 0 to 2.
    pub col: u8,
}
impl Default for Cursor {
    fn default() -> Self {
        Self::CENTER
    }
}
impl Cursor {
    /// Center sticker of a face.
    pub const CENTER: Self = Self { row: 1, col: 1 };

    /// Constructs a cursor, clamping each coordinate to the grid.
    pub fn clamped(row: i32, col: i32) -> Self {
        Self {
            row: row.clamp(0, 2) as u8,
            col: col.clamp(0, 2) as u8,
        }
    }

    /// Returns the cursor moved by `(drow, dcol)`, clamped to the grid.
    #[must_use]
    pub fn offset(self, (drow, dcol): (i8, i8)) -> Self {
        Self::clamped(
            i32::from(self.row) + i32::from(drow),
            i32::from(self.col) + i32::from(dcol),
        )
    }
}

/// Entry in the move history.
///
/// `clockwise` is relative to the positive end of the face's axis, not to the
/// face itself, so a clockwise move of [`Face::Back`] looks counterclockwise
/// from behind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face that the move was made against.
    pub face: Face,
    /// Whether the rotation was clockwise when viewed from the positive end of
    /// the axis.
    pub clockwise: bool,
    /// Number of layers between `face` and the rotated layer. 0 is the face's
    /// own layer, 1 is the middle slice, and 2 is the opposite layer.
    pub depth: u8,
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth > 0 {
            write!(f, "{}", self.depth + 1)?;
        }
        write!(f, "{}", self.face.symbol())?;
        if !self.clockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}
impl Move {
    /// Constructs a move of the outer layer of `face`.
    pub fn new(face: Face, clockwise: bool) -> Self {
        Self::with_depth(face, clockwise, 0)
    }
    /// Constructs a move of the layer `depth` layers in from `face`.
    pub fn with_depth(face: Face, clockwise: bool, depth: u8) -> Self {
        Self {
            face,
            clockwise,
            depth,
        }
    }

    /// Returns the axis that the move rotates around.
    pub fn axis(self) -> Axis {
        self.face.axis()
    }
    /// Returns the coordinate of the rotated layer along [`Move::axis()`].
    pub fn layer_value(self) -> i8 {
        self.face.value() - self.face.sign().int() * self.depth as i8
    }
    /// Returns the direction of the rotation.
    pub fn direction(self) -> Sign {
        if self.clockwise { Sign::Pos } else { Sign::Neg }
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            clockwise: !self.clockwise,
            ..self
        }
    }
}

/// Error returned when a twist cannot be started.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TwistError {
    /// Another twist is still in progress.
    #[error("a twist is already in progress")]
    Animating,
    /// The move history is empty.
    #[error("no moves to undo")]
    NothingToUndo,
    /// The layer coordinate is outside the cube.
    #[error("no layer at {axis} = {value}")]
    InvalidLayer {
        /// Axis of the layer.
        axis: Axis,
        /// Requested coordinate.
        value: i8,
    },
}

/// Layer selected for a twist, returned when a twist starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwistLayer {
    /// Cubies in the layer when the twist started.
    pub cubies: SmallVec<[CubieId; 9]>,
    /// Axis of rotation.
    pub axis: Axis,
    /// Coordinate of the layer along `axis`.
    pub value: i8,
    /// Direction of rotation. [`Sign::Pos`] is clockwise when viewed from the
    /// positive end of `axis`.
    pub direction: Sign,
    /// Face the move was recorded against, if any.
    pub face: Option<Face>,
}
impl TwistLayer {
    /// Returns the exact angle that the layer rotates by.
    pub fn target_angle(&self) -> Deg<f32> {
        self.direction.quarter_turn()
    }
}

/// Complete state of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState {
    /// Every cubie, indexed by [`CubieId`].
    pub cubies: Vec<Cubie>,
    /// Face that the cursor is on.
    pub current_face: Face,
    /// Cursor position on `current_face`.
    pub cursor: Cursor,
    /// Default twist direction for the current face.
    pub clockwise: bool,
    /// Whether a twist is in progress.
    pub is_animating: bool,
    /// Moves that can be undone, oldest first.
    pub history: Vec<Move>,
}

/// 3x3x3 cube with a cursor and move history.
///
/// Lattice coordinates are only ever changed by [`CubeModel::commit_rotation()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeModel {
    state: CubeState,
}
impl Default for CubeModel {
    fn default() -> Self {
        Self::new()
    }
}
impl CubeModel {
    /// Constructs a solved cube with the cursor in the center of the front
    /// face.
    pub fn new() -> Self {
        Self {
            state: CubeState {
                cubies: solved_cubies(),
                current_face: Face::default(),
                cursor: Cursor::CENTER,
                clockwise: true,
                is_animating: false,
                history: vec![],
            },
        }
    }

    /// Returns the cube to the solved state and clears the move history.
    ///
    /// The current face, cursor, and default direction are kept.
    pub fn reset(&mut self) {
        self.state.cubies = solved_cubies();
        self.clear_history();
        self.state.is_animating = false;
    }

    /// Returns the whole state.
    pub fn state(&self) -> &CubeState {
        &self.state
    }
    /// Returns every cubie, indexed by [`CubieId`].
    pub fn cubies(&self) -> &[Cubie] {
        &self.state.cubies
    }
    /// Returns a cubie by ID.
    pub fn cubie(&self, id: CubieId) -> Option<&Cubie> {
        self.state.cubies.get(id.0 as usize)
    }
    /// Returns the cubie at a lattice position.
    pub fn cubie_at(&self, pos: LatticePos) -> Option<&Cubie> {
        self.state.cubies.iter().find(|c| c.position == pos)
    }
    /// Returns the cubie within [`crate::LATTICE_EPSILON`] of a floating-point
    /// position.
    pub fn cubie_near(&self, pos: Vector3<f32>) -> Option<&Cubie> {
        self.state.cubies.iter().find(|c| c.is_near(pos))
    }

    /// Returns the face that the cursor is on.
    pub fn current_face(&self) -> Face {
        self.state.current_face
    }
    /// Returns the cursor position.
    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }
    /// Returns the lattice position under the cursor.
    pub fn selected_position(&self) -> LatticePos {
        let Cursor { row, col } = self.state.cursor;
        geometry::grid_to_lattice(row, col, self.state.current_face)
    }
    /// Returns the cubie under the cursor.
    pub fn selected_cubie(&self) -> Option<&Cubie> {
        self.cubie_at(self.selected_position())
    }
    /// Returns whether a twist is in progress.
    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    /// Moves the cursor one sticker in the direction of `arrow` as seen on
    /// screen. Returns `false` if a twist is in progress.
    pub fn move_cursor(&mut self, arrow: Arrow, camera_direction: Option<Vector3<f32>>) -> bool {
        if self.state.is_animating {
            return false;
        }
        let step = geometry::cursor_step(arrow, self.state.current_face, camera_direction);
        self.state.cursor = self.state.cursor.offset(step);
        true
    }
    /// Sets the cursor, clamping it to the grid. Returns `false` if a twist is
    /// in progress.
    pub fn set_cursor(&mut self, row: i32, col: i32) -> bool {
        if self.state.is_animating {
            return false;
        }
        self.state.cursor = Cursor::clamped(row, col);
        true
    }
    /// Moves the cursor to the center of the next face. Returns `false` if a
    /// twist is in progress.
    pub fn switch_face(&mut self) -> bool {
        if self.state.is_animating {
            return false;
        }
        self.state.current_face = self.state.current_face.next_in_cycle();
        self.state.cursor = Cursor::CENTER;
        true
    }

    /// Flips the default twist direction.
    pub fn toggle_direction(&mut self) {
        self.state.clockwise = !self.state.clockwise;
    }
    /// Sets the default twist direction.
    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.state.clockwise = clockwise;
    }
    /// Returns the default twist direction.
    pub fn is_clockwise(&self) -> bool {
        self.state.clockwise
    }

    /// Returns the cubies whose coordinate along `axis` is `value`.
    pub fn layer(&self, axis: Axis, value: i8) -> impl Iterator<Item = &Cubie> {
        self.state
            .cubies
            .iter()
            .filter(move |c| c.is_in_layer(axis, value))
    }

    /// Starts a twist of one layer.
    ///
    /// If `face` is given, the move is pushed onto the history so that it can
    /// be undone. The lattice is not changed until
    /// [`CubeModel::commit_rotation()`].
    pub fn begin_twist(
        &mut self,
        axis: Axis,
        value: i8,
        direction: Sign,
        face: Option<Face>,
    ) -> Result<TwistLayer, TwistError> {
        if self.state.is_animating {
            return Err(TwistError::Animating);
        }
        if !(-1..=1).contains(&value) {
            return Err(TwistError::InvalidLayer { axis, value });
        }

        let face = face.filter(|f| {
            let matches = f.axis() == axis;
            if !matches {
                log::warn!("not recording twist around {axis} against {f}");
            }
            matches
        });
        if let Some(f) = face {
            let depth = (f.value() - value).unsigned_abs();
            self.state
                .history
                .push(Move::with_depth(f, direction == Sign::Pos, depth));
        }

        self.state.is_animating = true;
        Ok(self.twist_layer(axis, value, direction, face))
    }

    /// Starts a twist that undoes the last move in the history.
    ///
    /// The undone move is removed from the history and the inverse move is not
    /// added to it.
    pub fn undo_last(&mut self) -> Result<TwistLayer, TwistError> {
        if self.state.is_animating {
            return Err(TwistError::Animating);
        }
        let m = self.state.history.pop().ok_or(TwistError::NothingToUndo)?;
        let inv = m.inverse();
        self.state.is_animating = true;
        Ok(self.twist_layer(inv.axis(), inv.layer_value(), inv.direction(), Some(m.face)))
    }

    fn twist_layer(&self, axis: Axis, value: i8, direction: Sign, face: Option<Face>) -> TwistLayer {
        TwistLayer {
            cubies: self.layer(axis, value).map(|c| c.id).collect(),
            axis,
            value,
            direction,
            face,
        }
    }

    /// Rotates cubies around `axis` by `angle` and snaps them to the lattice.
    ///
    /// A positive angle is clockwise when viewed from the positive end of the
    /// axis.
    pub fn commit_rotation(&mut self, cubies: &[CubieId], axis: Axis, angle: Deg<f32>) {
        log::debug!("committing rotation of {} cubies by {angle:?} around {axis}", cubies.len());
        for &id in cubies {
            match self.state.cubies.get_mut(id.0 as usize) {
                Some(cubie) => cubie.rotate(axis, angle),
                None => log::error!("no cubie with ID {id}"),
            }
        }
    }

    /// Marks the current twist as complete so that new input is accepted.
    pub fn finish_twist(&mut self) {
        self.set_animating(false);
    }
    /// Sets whether a twist is in progress.
    pub fn set_animating(&mut self, is_animating: bool) {
        self.state.is_animating = is_animating;
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            self.layer(face.axis(), face.value())
                .map(|c| c.sticker(face))
                .all_equal()
        })
    }

    /// Returns the moves that can be undone, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.state.history
    }
    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<&Move> {
        self.state.history.last()
    }
    /// Clears the move history without changing the cube.
    pub fn clear_history(&mut self) {
        self.state.history.clear();
    }
}

fn solved_cubies() -> Vec<Cubie> {
    itertools::iproduct!(-1..=1, -1..=1, -1..=1)
        .filter(|&(x, y, z)| (x, y, z) != (0, 0, 0))
        .enumerate()
        .map(|(i, (x, y, z))| Cubie::new_solved(CubieId(i as u8), Vector3::new(x, y, z)))
        .collect()
}
