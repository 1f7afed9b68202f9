use std::time::Duration;

use cgmath::Vector3;
use cubeplay_core::geometry;
use cubeplay_core::{Arrow, Axis, CubeModel, Cursor, Face, Move, Sign, TwistError};
use cubeplay_prefs::Preferences;

use crate::Action;
use crate::animations::{RotationEngine, ShuffleState, Shuffler};

/// Time step used by [`CubeSimulation::skip_animations()`].
const SKIP_STEP: Duration = Duration::from_secs(3600);

/// Whether the cube has been shuffled and solved since the last reset.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScrambleState {
    /// The cube has not been shuffled, or a shuffle is still running.
    #[default]
    None,
    /// The cube has been shuffled and not yet solved.
    Shuffled,
    /// The cube was solved after being shuffled.
    Solved,
}

/// Cube simulation, which manages the cube state, the twist animation, the
/// shuffle queue, and undo history.
#[derive(Debug)]
pub struct CubeSimulation {
    model: CubeModel,
    engine: RotationEngine,
    shuffler: Shuffler,
    prefs: Preferences,

    /// Direction from the viewer to the center of the cube, or `None` if
    /// unknown.
    camera_direction: Option<Vector3<f32>>,

    /// Number of twists since the last reset or shuffle, not counting undone
    /// twists.
    twist_count: u32,
    /// Twists applied by the last shuffle.
    scramble: Vec<Move>,
    scramble_state: ScrambleState,
    /// Whether the solved state has been handled by the UI.
    solved_state_handled: bool,
}
impl Default for CubeSimulation {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}
impl CubeSimulation {
    /// Constructs a new simulation with a solved cube.
    pub fn new(prefs: Preferences) -> Self {
        let mut model = CubeModel::new();
        model.set_clockwise(prefs.interaction.clockwise_by_default);
        Self {
            model,
            engine: RotationEngine::default(),
            shuffler: Shuffler::default(),
            prefs,

            camera_direction: None,

            twist_count: 0,
            scramble: vec![],
            scramble_state: ScrambleState::None,
            solved_state_handled: true,
        }
    }

    /// Returns the latest cube state, not including the twist being animated.
    pub fn model(&self) -> &CubeModel {
        &self.model
    }
    /// Returns the twist animation, for rendering.
    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }
    /// Returns the shuffle queue.
    pub fn shuffler(&self) -> &Shuffler {
        &self.shuffler
    }
    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Replaces the preferences. Takes effect on the next frame.
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    /// Sets the direction from the viewer to the center of the cube.
    pub fn set_camera_direction(&mut self, camera_direction: Option<Vector3<f32>>) {
        self.camera_direction = camera_direction;
    }
    /// Returns the direction from the viewer to the center of the cube.
    pub fn camera_direction(&self) -> Option<Vector3<f32>> {
        self.camera_direction
    }
    /// Returns the camera direction used to resolve input on `face`.
    fn input_camera(&self, face: Face) -> Option<Vector3<f32>> {
        if face.is_horizontal() && self.prefs.interaction.viewer_relative_controls {
            self.camera_direction
        } else {
            None
        }
    }

    /// Returns whether a twist is animating or a shuffle is running.
    pub fn is_busy(&self) -> bool {
        self.model.is_animating() || self.engine.is_animating() || self.shuffler.is_running()
    }

    /// Applies a user action. Returns `false` if the action was ignored
    /// because the cube is busy or the action was rejected.
    pub fn do_action(&mut self, action: Action) -> bool {
        if self.is_busy() {
            log::trace!("ignoring {action} while busy");
            return false;
        }
        match action {
            Action::MoveCursor(arrow) => {
                let camera = self.input_camera(self.model.current_face());
                self.model.move_cursor(arrow, camera)
            }
            Action::Twist(arrow) => self.twist(arrow).is_ok(),
            Action::TwistFace => self.twist_face().is_ok(),
            Action::SwitchFace => self.model.switch_face(),
            Action::ToggleDirection => {
                self.model.toggle_direction();
                true
            }
            Action::Undo => self.undo().is_ok(),
            Action::Shuffle(move_count) => {
                let n = move_count.unwrap_or(self.prefs.shuffle.move_count);
                self.shuffle(n, None, |_| ());
                true
            }
            Action::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Twists the layer under the cursor so that the sticker under the cursor
    /// moves in the direction of `arrow` on screen.
    pub fn twist(&mut self, arrow: Arrow) -> Result<(), TwistError> {
        let face = self.model.current_face();
        let camera = self.input_camera(face);
        let (axis, direction) = geometry::resolve_rotation(arrow, face, camera);
        let Cursor { row, col } = self.model.cursor();
        let value = geometry::layer_coordinate(arrow, row, col, face, camera);

        // Record against the current face when possible so that the history
        // reads naturally.
        let record_face = if face.axis() == axis {
            face
        } else {
            Face::from_axis_sign(axis, Sign::Pos)
        };
        self.begin_twist(axis, value, direction, Some(record_face))
    }

    /// Twists the whole current face in the default direction.
    pub fn twist_face(&mut self) -> Result<(), TwistError> {
        let m = Move::new(self.model.current_face(), self.model.is_clockwise());
        self.begin_twist(m.axis(), m.layer_value(), m.direction(), Some(m.face))
    }

    /// Starts animating a twist of one layer. See [`CubeModel::begin_twist()`].
    pub fn begin_twist(
        &mut self,
        axis: Axis,
        value: i8,
        direction: Sign,
        face: Option<Face>,
    ) -> Result<(), TwistError> {
        let layer = self.model.begin_twist(axis, value, direction, face)?;
        self.engine.start_layer(&layer);
        self.twist_count += 1;
        Ok(())
    }

    /// Starts animating the inverse of the last twist.
    pub fn undo(&mut self) -> Result<(), TwistError> {
        let layer = self.model.undo_last()?;
        self.engine.start_layer(&layer);
        self.twist_count = self.twist_count.saturating_sub(1);
        Ok(())
    }

    /// Resets the cube and plays `move_count` random twists.
    ///
    /// If `seed` is `None`, a random seed is used. `on_complete` is called
    /// once after the last twist is committed. Shuffle twists are recorded in
    /// the move history like any other twist.
    pub fn shuffle(
        &mut self,
        move_count: u32,
        seed: Option<String>,
        on_complete: impl FnOnce(&mut CubeModel) + 'static,
    ) {
        self.reset();
        let seed = seed.unwrap_or_else(Shuffler::random_seed);
        self.shuffler.start(move_count, seed, on_complete);
        self.advance_shuffle();
    }

    /// Resets the cube to the solved state, cancelling any animation or
    /// shuffle.
    pub fn reset(&mut self) {
        self.shuffler.cancel();
        self.engine = RotationEngine::default();
        self.model.reset();
        self.twist_count = 0;
        self.scramble.clear();
        self.scramble_state = ScrambleState::None;
        self.solved_state_handled = true;
    }

    /// Advances the animation and shuffle to the next frame, using the given
    /// time delta between this frame and the last. Returns whether the cube
    /// must be redrawn.
    pub fn step(&mut self, delta: Duration) -> bool {
        let mut needs_redraw = self.engine.is_animating();

        if self
            .engine
            .tick(delta, &self.prefs.animation, &mut self.model)
            .is_some()
        {
            self.check_solved();
        }
        needs_redraw |= self.advance_shuffle();

        needs_redraw
    }

    /// Completes the current twist and any running shuffle immediately.
    pub fn skip_animations(&mut self) {
        while self.is_busy() {
            if !self.step(SKIP_STEP) {
                // Not animating and no shuffle progress; the model flag is
                // stale.
                log::warn!("clearing stuck animation flag");
                self.model.finish_twist();
            }
        }
    }

    /// Starts the next shuffle twist if the previous one is done. Returns
    /// whether anything changed.
    fn advance_shuffle(&mut self) -> bool {
        if !self.shuffler.is_running() || self.engine.is_animating() {
            return false;
        }
        match self.shuffler.next_move() {
            Some(m) => {
                match self
                    .model
                    .begin_twist(m.axis(), m.layer_value(), m.direction(), Some(m.face))
                {
                    Ok(layer) => {
                        self.engine.start_layer(&layer);
                    }
                    Err(e) => log::error!("error starting shuffle twist {m}: {e}"),
                }
            }
            None => {
                self.scramble = self.model.move_history().to_vec();
                self.twist_count = 0;
                self.scramble_state = ScrambleState::Shuffled;
                log::debug!(
                    "shuffle done: {}",
                    self.scramble.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" "),
                );
                self.shuffler.finish(&mut self.model);
                self.check_solved();
            }
        }
        true
    }

    fn check_solved(&mut self) {
        if self.scramble_state == ScrambleState::Shuffled
            && !self.shuffler.is_running()
            && self.model.is_solved()
        {
            log::info!("solved in {} twists", self.twist_count);
            self.scramble_state = ScrambleState::Solved;
            self.solved_state_handled = false;
        }
    }

    /// Returns whether the cube is _currently_ solved.
    pub fn is_solved(&self) -> bool {
        self.model.is_solved()
    }
    /// Returns whether the cube was _just_ solved after a shuffle.
    ///
    /// This returns `true` at most once per shuffle.
    pub fn handle_newly_solved(&mut self) -> bool {
        self.scramble_state == ScrambleState::Solved
            && !std::mem::replace(&mut self.solved_state_handled, true)
    }
    /// Returns whether the cube has been shuffled and solved since the last
    /// reset.
    pub fn scramble_state(&self) -> ScrambleState {
        self.scramble_state
    }
    /// Returns the twists applied by the last shuffle.
    pub fn scramble(&self) -> &[Move] {
        &self.scramble
    }
    /// Returns the number of twists since the last reset or shuffle.
    pub fn twist_count(&self) -> u32 {
        self.twist_count
    }
    /// Returns the state of the shuffle queue.
    pub fn shuffle_state(&self) -> ShuffleState {
        self.shuffler.state()
    }
}
