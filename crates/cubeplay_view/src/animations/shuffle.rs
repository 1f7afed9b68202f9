use std::fmt;

use cubeplay_core::{CubeModel, Face, Move};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use sha2::Digest;

use super::OnComplete;

/// Progress of a shuffle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShuffleState {
    /// No shuffle is running.
    #[default]
    Idle,
    /// Random twists are still being played.
    Running {
        /// Number of twists that have not been started yet.
        moves_left: u32,
    },
}

/// Queue of random twists, started one at a time as each previous twist
/// completes.
pub struct Shuffler {
    state: ShuffleState,
    seed: String,
    rng: ChaCha12Rng,
    on_complete: Option<OnComplete>,
}
impl fmt::Debug for Shuffler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffler")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
impl Default for Shuffler {
    fn default() -> Self {
        Self {
            state: ShuffleState::Idle,
            seed: String::new(),
            rng: rng_from_seed(""),
            on_complete: None,
        }
    }
}
impl Shuffler {
    /// Generates a new random seed.
    pub fn random_seed() -> String {
        let random_u64: u64 = rand::rng().random();
        format!("{random_u64:016x}")
    }

    /// Queues `move_count` random twists generated from `seed`.
    ///
    /// `on_complete` is called once after the last twist has been committed.
    /// Any shuffle that is already running is replaced without calling its
    /// callback.
    pub fn start(
        &mut self,
        move_count: u32,
        seed: String,
        on_complete: impl FnOnce(&mut CubeModel) + 'static,
    ) {
        log::debug!("shuffling {move_count} moves with seed {seed:?}");
        self.rng = rng_from_seed(&seed);
        self.seed = seed;
        self.state = ShuffleState::Running {
            moves_left: move_count,
        };
        self.on_complete = Some(Box::new(on_complete));
    }

    /// Returns the state of the shuffle.
    pub fn state(&self) -> ShuffleState {
        self.state
    }
    /// Returns whether a shuffle is running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ShuffleState::Running { .. })
    }
    /// Returns the number of twists that have not been started yet.
    pub fn moves_left(&self) -> u32 {
        match self.state {
            ShuffleState::Idle => 0,
            ShuffleState::Running { moves_left } => moves_left,
        }
    }
    /// Returns the seed of the most recent shuffle.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns the next random twist, or `None` if there are no twists left.
    pub fn next_move(&mut self) -> Option<Move> {
        let ShuffleState::Running { moves_left } = &mut self.state else {
            return None;
        };
        *moves_left = moves_left.checked_sub(1)?;
        let face = *Face::ALL.choose(&mut self.rng)?;
        let clockwise = self.rng.random_bool(0.5);
        Some(Move::new(face, clockwise))
    }

    /// Ends the shuffle and runs its completion callback.
    pub fn finish(&mut self, model: &mut CubeModel) {
        self.state = ShuffleState::Idle;
        if let Some(f) = self.on_complete.take() {
            f(model);
        }
    }

    /// Stops the shuffle without running its completion callback.
    pub fn cancel(&mut self) {
        self.state = ShuffleState::Idle;
        self.on_complete = None;
    }
}

fn rng_from_seed(seed: &str) -> ChaCha12Rng {
    let mut sha256 = sha2::Sha256::new();
    sha256.update((seed.len() as u64).to_le_bytes());
    sha256.update(seed.as_bytes());
    ChaCha12Rng::from_seed(sha256.finalize().into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn drain(shuffler: &mut Shuffler) -> Vec<Move> {
        std::iter::from_fn(|| shuffler.next_move()).collect()
    }

    #[test]
    fn test_exact_move_count() {
        let mut shuffler = Shuffler::default();
        shuffler.start(12, "abc".to_string(), |_| ());
        assert_eq!(shuffler.moves_left(), 12);
        assert_eq!(drain(&mut shuffler).len(), 12);
        assert_eq!(shuffler.moves_left(), 0);
        assert!(shuffler.is_running());
        assert!(shuffler.next_move().is_none());
    }

    #[test]
    fn test_seeded_shuffles_are_reproducible() {
        let mut a = Shuffler::default();
        let mut b = Shuffler::default();
        a.start(30, "seed".to_string(), |_| ());
        b.start(30, "seed".to_string(), |_| ());
        let moves = drain(&mut a);
        assert_eq!(moves, drain(&mut b));
        assert!(moves.iter().all(|m| m.depth == 0));

        b.start(30, "other seed".to_string(), |_| ());
        assert_ne!(moves, drain(&mut b));
    }

    #[test]
    fn test_finish_runs_callback_once() {
        let mut model = CubeModel::new();
        let mut shuffler = Shuffler::default();
        shuffler.start(0, Shuffler::random_seed(), |model| model.toggle_direction());
        assert_eq!(shuffler.next_move(), None);

        shuffler.finish(&mut model);
        shuffler.finish(&mut model);
        assert!(!model.is_clockwise());
        assert_eq!(shuffler.state(), ShuffleState::Idle);
    }

    #[test]
    fn test_cancel() {
        let mut model = CubeModel::new();
        let mut shuffler = Shuffler::default();
        shuffler.start(5, "x".to_string(), |model| model.toggle_direction());
        shuffler.cancel();
        shuffler.finish(&mut model);
        assert!(model.is_clockwise());
        assert_eq!(shuffler.next_move(), None);
    }
}
