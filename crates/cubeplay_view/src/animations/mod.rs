//! Time-driven state machines: the twist animation and the shuffle queue.

mod shuffle;
mod twist;

pub use shuffle::{ShuffleState, Shuffler};
pub use twist::{CompletedTwist, OnComplete, Pivot, RotationEngine};
