//! Abstract input actions and the keyboard bindings that produce them.

use std::collections::BTreeMap;
use std::fmt;

use cubeplay_core::Arrow;

/// User input, independent of how it was produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the cursor one sticker on screen.
    MoveCursor(Arrow),
    /// Twist the layer under the cursor so that the sticker moves on screen.
    Twist(Arrow),
    /// Twist the current face in the default direction.
    TwistFace,
    /// Move the cursor to the next face.
    SwitchFace,
    /// Flip the default twist direction.
    ToggleDirection,
    /// Undo the last twist.
    Undo,
    /// Reset and shuffle the cube. `None` uses the number of moves from the
    /// preferences.
    Shuffle(Option<u32>),
    /// Return the cube to the solved state.
    Reset,
}
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveCursor(arrow) => write!(f, "move cursor {arrow}"),
            Action::Twist(arrow) => write!(f, "twist {arrow}"),
            Action::TwistFace => write!(f, "twist face"),
            Action::SwitchFace => write!(f, "switch face"),
            Action::ToggleDirection => write!(f, "toggle direction"),
            Action::Undo => write!(f, "undo"),
            Action::Shuffle(Some(n)) => write!(f, "shuffle {n}"),
            Action::Shuffle(None) => write!(f, "shuffle"),
            Action::Reset => write!(f, "reset"),
        }
    }
}

/// Map from key names to actions.
///
/// Key names are matched case-insensitively. Arrow keys may be written either
/// as `arrowup` or `up`, and the space bar as `space` or ` `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings(BTreeMap<String, Action>);
impl Default for KeyBindings {
    fn default() -> Self {
        let mut ret = Self(BTreeMap::new());

        ret.bind("w", Action::MoveCursor(Arrow::Up));
        ret.bind("a", Action::MoveCursor(Arrow::Left));
        ret.bind("s", Action::MoveCursor(Arrow::Down));
        ret.bind("d", Action::MoveCursor(Arrow::Right));

        ret.bind("arrowup", Action::Twist(Arrow::Up));
        ret.bind("arrowdown", Action::Twist(Arrow::Down));
        ret.bind("arrowleft", Action::Twist(Arrow::Left));
        ret.bind("arrowright", Action::Twist(Arrow::Right));

        ret.bind("space", Action::SwitchFace);
        ret.bind("f", Action::TwistFace);
        ret.bind("t", Action::ToggleDirection);
        ret.bind("u", Action::Undo);
        ret.bind("x", Action::Shuffle(None));
        ret.bind("escape", Action::Reset);

        ret
    }
}
impl KeyBindings {
    /// Binds a key to an action, replacing any existing binding for the key.
    pub fn bind(&mut self, key: &str, action: Action) {
        self.0.insert(normalize_key_name(key), action);
    }

    /// Returns the action bound to a key.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.0.get(&normalize_key_name(key)).copied()
    }

    /// Returns every binding, sorted by key name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Action)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

fn normalize_key_name(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }
    let key = key.trim().to_lowercase();
    match key.as_str() {
        "up" | "down" | "left" | "right" => format!("arrow{key}"),
        "esc" => "escape".to_string(),
        _ => key,
    }
}
