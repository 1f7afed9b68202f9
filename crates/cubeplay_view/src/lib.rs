//! Cube user interface state manager: twist animation, shuffling, and input
//! handling, independent of any renderer or windowing system.

mod animations;
mod input;
mod simulation;

pub use animations::{CompletedTwist, OnComplete, Pivot, RotationEngine, ShuffleState, Shuffler};
pub use input::{Action, KeyBindings};
pub use simulation::{CubeSimulation, ScrambleState};
