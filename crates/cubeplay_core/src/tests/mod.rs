use cgmath::Vector3;
use pretty_assertions::assert_eq;

use crate::geometry::{self, Arrow};
use crate::*;


/// Starts and immediately commits a twist, as an animation would on its last
/// frame.
fn twist_instantly(
    cube: &mut CubeModel,
    axis: Axis,
    value: i8,
    direction: Sign,
    face: Option<Face>,
) -> TwistLayer {
    let layer = cube
        .begin_twist(axis, value, direction, face)
        .expect("twist rejected");
    cube.commit_rotation(&layer.cubies, layer.axis, layer.target_angle());
    cube.finish_twist();
    layer
}

fn undo_instantly(cube: &mut CubeModel) {
    let layer = cube.undo_last().expect("undo rejected");
    cube.commit_rotation(&layer.cubies, layer.axis, layer.target_angle());
    cube.finish_twist();
}

#[test]
fn test_four_quarter_turns_are_identity() {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        for value in -1..=1 {
            for direction in [Sign::Pos, Sign::Neg] {
                let mut cube = CubeModel::new();
                let initial = cube.cubies().to_vec();
                for _ in 0..4 {
                    twist_instantly(&mut cube, axis, value, direction, None);
                }
                assert_eq!(cube.cubies(), initial.as_slice());
            }
        }
    }
}

#[test]
fn test_undo_restores_state() {
    let mut cube = CubeModel::new();
    twist_instantly(&mut cube, Axis::Y, 1, Sign::Neg, Some(Face::Top));
    let before = cube.state().clone();

    twist_instantly(&mut cube, Axis::Z, 1, Sign::Pos, Some(Face::Front));
    assert_eq!(cube.last_move(), Some(&Move::new(Face::Front, true)));
    assert_ne!(cube.state(), &before);

    undo_instantly(&mut cube);
    assert_eq!(cube.state(), &before);
}

#[test]
fn test_undo_slice_move() {
    let mut cube = CubeModel::new();
    twist_instantly(&mut cube, Axis::X, 0, Sign::Pos, Some(Face::Left));
    assert_eq!(cube.move_history(), &[Move::with_depth(Face::Left, true, 1)]);
    assert!(!cube.is_solved());

    undo_instantly(&mut cube);
    assert!(cube.is_solved());
    assert!(cube.move_history().is_empty());
}

#[test]
fn test_undo_everything() {
    let mut cube = CubeModel::new();
    let moves = [
        (Axis::Z, 1, Sign::Pos, Face::Front),
        (Axis::X, -1, Sign::Neg, Face::Left),
        (Axis::Y, 1, Sign::Pos, Face::Top),
        (Axis::Z, -1, Sign::Neg, Face::Back),
        (Axis::X, 1, Sign::Pos, Face::Right),
    ];
    for (axis, value, direction, face) in moves {
        twist_instantly(&mut cube, axis, value, direction, Some(face));
    }
    assert_eq!(cube.move_history().len(), moves.len());
    assert!(!cube.is_solved());

    while !cube.move_history().is_empty() {
        undo_instantly(&mut cube);
    }
    assert!(cube.is_solved());
    assert_eq!(cube.undo_last(), Err(TwistError::NothingToUndo));
}

#[test]
fn test_single_flight() {
    let mut cube = CubeModel::new();
    cube.begin_twist(Axis::Z, 1, Sign::Pos, Some(Face::Front))
        .expect("first twist");
    let during = cube.state().clone();

    assert_eq!(
        cube.begin_twist(Axis::Y, 1, Sign::Pos, Some(Face::Top)),
        Err(TwistError::Animating),
    );
    assert_eq!(cube.undo_last(), Err(TwistError::Animating));
    assert!(!cube.move_cursor(Arrow::Right, None));
    assert!(!cube.set_cursor(0, 0));
    assert!(!cube.switch_face());
    assert_eq!(cube.state(), &during);
}

#[test]
fn test_solved_predicate() {
    let mut cube = CubeModel::new();
    assert!(cube.is_solved());

    twist_instantly(&mut cube, Axis::Z, 1, Sign::Pos, Some(Face::Front));
    assert!(!cube.is_solved());

    // Turning the middle slice and both outer layers together rotates the
    // whole cube, which still counts as solved.
    twist_instantly(&mut cube, Axis::Z, 0, Sign::Pos, None);
    twist_instantly(&mut cube, Axis::Z, -1, Sign::Pos, None);
    assert!(cube.is_solved());
    assert!(cube.cubies().iter().any(|c| !c.is_home()));
}

#[test]
fn test_reset() {
    let mut cube = CubeModel::new();
    cube.switch_face();
    cube.toggle_direction();
    twist_instantly(&mut cube, Axis::X, 1, Sign::Pos, Some(Face::Right));
    cube.begin_twist(Axis::Y, 0, Sign::Pos, None).expect("twist");

    cube.reset();
    assert!(cube.is_solved());
    assert!(!cube.is_animating());
    assert!(cube.move_history().is_empty());
    assert!(cube.cubies().iter().all(|c| c.is_home()));
    assert_eq!(cube.current_face(), Face::Right);
    assert!(!cube.is_clockwise());
}

#[test]
fn test_selected_cubie_follows_cursor() {
    let mut cube = CubeModel::new();
    let center = cube.selected_cubie().expect("center cubie");
    assert_eq!(center.position, Vector3::new(0, 0, 1));

    cube.move_cursor(Arrow::Up, None);
    cube.move_cursor(Arrow::Right, None);
    let corner = cube.selected_cubie().expect("corner cubie");
    assert_eq!(corner.position, Vector3::new(1, 1, 1));

    let id = corner.id;
    twist_instantly(&mut cube, Axis::Z, 1, Sign::Pos, Some(Face::Front));
    // The cursor stays put; a different cubie is now under it.
    assert_ne!(cube.selected_cubie().map(|c| c.id), Some(id));
    assert_eq!(
        cube.cubie(id).map(|c| c.position),
        Some(Vector3::new(1, -1, 1)),
    );
}

#[test]
fn test_cubie_near() {
    let cube = CubeModel::new();
    let cubie = cube
        .cubie_near(Vector3::new(0.95, -0.04, 1.02))
        .expect("cubie near corner");
    assert_eq!(cubie.position, Vector3::new(1, 0, 1));
    assert!(cube.cubie_near(Vector3::new(0.5, 0.0, 1.0)).is_none());
}

#[test]
fn test_commit_rotation_matches_geometry() {
    // Pressing "up" on the top face from the front moves the sticker under
    // the cursor toward the back.
    let mut cube = CubeModel::new();
    for _ in 0..4 {
        cube.switch_face();
    }
    assert_eq!(cube.current_face(), Face::Top);

    let (axis, direction) = geometry::resolve_rotation(Arrow::Up, Face::Top, None);
    let value = geometry::layer_coordinate(Arrow::Up, 1, 1, Face::Top, None);
    let id = cube.selected_cubie().expect("top center").id;
    twist_instantly(&mut cube, axis, value, direction, None);

    let cubie = cube.cubie(id).expect("cubie");
    assert_eq!(cubie.position, Face::Back.normal());
    assert_eq!(cubie.sticker(Face::Back), Color::White);
    assert_eq!(cubie.home, Face::Top.normal());
}
