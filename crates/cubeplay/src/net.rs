//! Text rendering of the cube as an unfolded net.
//!
//! ```text
//!     UUU
//!     UUU
//!     UUU
//! LLL FFF RRR BBB
//! LLL FFF RRR BBB
//! LLL FFF RRR BBB
//!     DDD
//!     DDD
//!     DDD
//! ```

use cubeplay_core::geometry::grid_to_lattice;
use cubeplay_core::{Color, CubeModel, Face};
use itertools::Itertools;
use owo_colors::OwoColorize;

const SIDE_FACES: [Face; 4] = [Face::Left, Face::Front, Face::Right, Face::Back];

/// Renders the cube as a net. The sticker under the cursor is shown in
/// lowercase, or in brackets when `color` is `true`.
pub fn render(model: &CubeModel, color: bool) -> String {
    let cell_width = if color { 3 } else { 1 };
    let indent = " ".repeat(cell_width * 3 + 1);

    let mut lines = vec![];
    for row in 0..3 {
        lines.push(format!("{indent}{}", face_row(model, Face::Top, row, color)));
    }
    for row in 0..3 {
        lines.push(
            SIDE_FACES
                .iter()
                .map(|&face| face_row(model, face, row, color))
                .join(" "),
        );
    }
    for row in 0..3 {
        lines.push(format!("{indent}{}", face_row(model, Face::Bottom, row, color)));
    }
    lines.join("\n")
}

/// Renders one displayed row of a face.
fn face_row(model: &CubeModel, face: Face, display_row: u8, color: bool) -> String {
    // The top and bottom faces are drawn with their front edge touching the
    // front face.
    let row = match face {
        Face::Top | Face::Bottom => 2 - display_row,
        _ => display_row,
    };
    let cursor = model.cursor();
    (0..3)
        .map(|col| {
            let sticker = model
                .cubie_at(grid_to_lattice(row, col, face))
                .map_or(Color::Black, |cubie| cubie.sticker(face));
            let selected = face == model.current_face() && cursor.row == row && cursor.col == col;
            render_sticker(sticker, selected, color)
        })
        .collect()
}

fn render_sticker(sticker: Color, selected: bool, color: bool) -> String {
    let letter = sticker.letter();
    if !color {
        return match selected {
            true => letter.to_ascii_lowercase().to_string(),
            false => letter.to_string(),
        };
    }
    let text = match selected {
        true => format!("[{letter}]"),
        false => format!(" {letter} "),
    };
    let (r, g, b) = rgb(sticker);
    text.black().on_truecolor(r, g, b).to_string()
}

fn rgb(sticker: Color) -> (u8, u8, u8) {
    match sticker {
        Color::Red => (0xc4, 0x1e, 0x3a),
        Color::Orange => (0xff, 0x58, 0x00),
        Color::White => (0xff, 0xff, 0xff),
        Color::Yellow => (0xff, 0xd5, 0x00),
        Color::Green => (0x00, 0x9e, 0x60),
        Color::Blue => (0x00, 0x51, 0xba),
        Color::Black => (0x20, 0x20, 0x20),
    }
}

#[cfg(test)]
mod tests {
    use cubeplay_core::{Axis, Sign};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_solved_net() {
        let model = CubeModel::new();
        let expected = "    WWW
    WWW
    WWW
OOO GGG RRR BBB
OOO GgG RRR BBB
OOO GGG RRR BBB
    YYY
    YYY
    YYY";
        assert_eq!(render(&model, false), expected);
    }

    #[test]
    fn test_net_after_front_twist() {
        let mut model = CubeModel::new();
        model.set_cursor(0, 0);
        let layer = model
            .begin_twist(Axis::Z, 1, Sign::Pos, Some(Face::Front))
            .unwrap();
        model.commit_rotation(&layer.cubies, layer.axis, layer.target_angle());
        model.finish_twist();

        // Clockwise from the front: top row of stickers moves to the right face.
        let expected = "    WWW
    WWW
    OOO
OOY gGG WRR BBB
OOY GGG WRR BBB
OOY GGG WRR BBB
    RRR
    YYY
    YYY";
        assert_eq!(render(&model, false), expected);
    }
}
