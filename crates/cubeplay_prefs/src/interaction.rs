use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Initial value of the direction toggle.
    pub clockwise_by_default: bool,
    /// Whether arrows on the top and bottom faces follow the camera. If
    /// `false`, they behave as if viewed from the front.
    pub viewer_relative_controls: bool,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            clockwise_by_default: true,
            viewer_relative_controls: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ShufflePreferences {
    /// Number of random twists in a shuffle.
    pub move_count: u32,
}
impl Default for ShufflePreferences {
    fn default() -> Self {
        Self { move_count: 25 }
    }
}
