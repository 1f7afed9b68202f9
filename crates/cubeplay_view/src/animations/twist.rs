use std::fmt;
use std::time::Duration;

use cgmath::{Deg, Matrix3, SquareMatrix, Vector3};
use cubeplay_core::{Axis, CubeModel, Cubie, CubieId, Sign, TwistLayer};
use cubeplay_prefs::{AnimationPreferences, InterpolateFn};
use smallvec::SmallVec;

/// Callback invoked after a twist has been committed.
pub type OnComplete = Box<dyn FnOnce(&mut CubeModel)>;

/// Animation of a single quarter turn.
///
/// Cubies in the animation are attached to a pivot whose angle is only used
/// for rendering. The lattice is updated once, when the animation completes.
#[derive(Default)]
pub struct RotationEngine {
    current: Option<TwistAnimation>,
    /// Easing applied to [`RotationEngine::pivot()`].
    easing: InterpolateFn,
}
impl fmt::Debug for RotationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotationEngine")
            .field("current", &self.current)
            .field("easing", &self.easing)
            .finish()
    }
}

struct TwistAnimation {
    cubies: SmallVec<[CubieId; 9]>,
    axis: Axis,
    direction: Sign,
    /// Unsigned angle turned so far, from 0 to 90 degrees.
    progress: Deg<f32>,
    on_complete: Option<OnComplete>,
}
impl fmt::Debug for TwistAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwistAnimation")
            .field("cubies", &self.cubies)
            .field("axis", &self.axis)
            .field("direction", &self.direction)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// Axis and displayed angle of the pivot that animating cubies are attached
/// to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pivot {
    /// Axis of rotation.
    pub axis: Axis,
    /// Signed angle to display, using the same sign convention as
    /// [`cubeplay_core::rotate_vector()`].
    pub angle: Deg<f32>,
}

/// Twist that was committed to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTwist {
    /// Cubies that were rotated.
    pub cubies: SmallVec<[CubieId; 9]>,
    /// Axis of rotation.
    pub axis: Axis,
    /// Exact angle that was committed.
    pub angle: Deg<f32>,
}

impl RotationEngine {
    /// Returns whether a twist is being animated.
    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Starts animating a quarter turn of `cubies`. Does nothing and returns
    /// `false` if another twist is still animating.
    pub fn start(
        &mut self,
        cubies: &[CubieId],
        axis: Axis,
        direction: Sign,
        on_complete: impl FnOnce(&mut CubeModel) + 'static,
    ) -> bool {
        if self.is_animating() {
            log::trace!("ignoring twist around {axis} while animating");
            return false;
        }
        self.current = Some(TwistAnimation {
            cubies: cubies.iter().copied().collect(),
            axis,
            direction,
            progress: Deg(0.0),
            on_complete: Some(Box::new(on_complete)),
        });
        true
    }

    /// Starts animating a layer returned by [`CubeModel::begin_twist()`] or
    /// [`CubeModel::undo_last()`].
    pub fn start_layer(&mut self, layer: &TwistLayer) -> bool {
        self.start(&layer.cubies, layer.axis, layer.direction, |_| ())
    }

    /// Advances the animation by `delta`. When the twist reaches its target,
    /// commits it to `model`, clears the model's animating flag, and runs the
    /// completion callback.
    pub fn tick(
        &mut self,
        delta: Duration,
        prefs: &AnimationPreferences,
        model: &mut CubeModel,
    ) -> Option<CompletedTwist> {
        self.easing = prefs.twist_interpolation;
        let anim = self.current.as_mut()?;

        let speed = prefs.twist_speed;
        if speed.is_finite() && speed > 0.0 {
            anim.progress.0 += speed * delta.as_secs_f32();
        } else {
            // Bad speed; finish the twist instantly.
            anim.progress = Deg(90.0);
        }
        if anim.progress < Deg(90.0) {
            log::trace!("twist around {} at {:?}", anim.axis, anim.progress);
            return None;
        }

        let TwistAnimation {
            cubies,
            axis,
            direction,
            progress: _,
            on_complete,
        } = self.current.take()?;
        let angle = direction.quarter_turn();
        model.commit_rotation(&cubies, axis, angle);
        model.finish_twist();
        if let Some(f) = on_complete {
            f(model);
        }
        Some(CompletedTwist {
            cubies,
            axis,
            angle,
        })
    }

    /// Returns the pivot of the twist being animated.
    pub fn pivot(&self) -> Option<Pivot> {
        let anim = self.current.as_ref()?;
        let t = self.easing.interpolate(anim.progress.0 / 90.0);
        Some(Pivot {
            axis: anim.axis,
            angle: anim.direction.quarter_turn() * t,
        })
    }

    /// Returns the rotation matrix of the pivot, or the identity matrix if no
    /// twist is animating.
    pub fn pivot_matrix(&self) -> Matrix3<f32> {
        match self.pivot() {
            Some(p) => cubeplay_core::twist_matrix(p.axis, p.angle),
            None => Matrix3::identity(),
        }
    }

    /// Returns whether a cubie is attached to the pivot.
    pub fn is_attached(&self, id: CubieId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|anim| anim.cubies.contains(&id))
    }

    /// Returns the position at which to draw a cubie, including the pivot
    /// rotation if it is attached.
    pub fn render_position(&self, cubie: &Cubie) -> Vector3<f32> {
        let pos = cubie.position.map(f32::from);
        match self.pivot() {
            Some(p) if self.is_attached(cubie.id) => {
                cubeplay_core::rotate_vector(pos, p.axis, p.angle)
            }
            _ => pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;
    use cubeplay_core::Face;
    use pretty_assertions::assert_eq;

    use super::*;

    fn prefs() -> AnimationPreferences {
        AnimationPreferences::default()
    }

    #[test]
    fn test_quarter_turn_takes_half_a_second() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        let layer = model
            .begin_twist(Axis::Z, 1, Sign::Pos, Some(Face::Front))
            .unwrap();
        assert!(engine.start_layer(&layer));

        let frame = Duration::from_millis(125);
        for _ in 0..3 {
            assert_eq!(engine.tick(frame, &prefs(), &mut model), None);
            assert!(model.is_animating());
        }
        let completed = engine.tick(frame, &prefs(), &mut model).unwrap();
        assert_eq!(completed.angle, Deg(90.0));
        assert_eq!(completed.cubies, layer.cubies);
        assert!(!engine.is_animating());
        assert!(!model.is_animating());
        assert!(!model.is_solved());
    }

    #[test]
    fn test_lattice_is_unchanged_while_animating() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        let layer = model.begin_twist(Axis::X, -1, Sign::Neg, None).unwrap();
        engine.start_layer(&layer);
        let before = model.cubies().to_vec();

        engine.tick(Duration::from_millis(250), &prefs(), &mut model);
        assert_eq!(model.cubies(), before.as_slice());

        let pivot = engine.pivot().unwrap();
        assert_eq!(pivot.axis, Axis::X);
        assert!((pivot.angle.0 + 45.0).abs() < 1e-4);

        // Attached cubies are drawn halfway through the turn; others are not.
        let attached = model.cubie(layer.cubies[0]).unwrap();
        assert!(engine.is_attached(attached.id));
        let drawn = engine.render_position(attached);
        assert!((drawn - attached.position.map(f32::from)).magnitude() > 0.1);
        assert!(model.cubie_near(drawn).is_none());

        let detached = model.cubie_at(Vector3::new(1, 0, 0)).unwrap();
        assert!(!engine.is_attached(detached.id));
        assert_eq!(engine.render_position(detached), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_start_while_animating_is_ignored() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        assert!(engine.start(&[CubieId(0)], Axis::Y, Sign::Pos, |_| ()));
        assert!(!engine.start(&[CubieId(1)], Axis::Z, Sign::Pos, |_| ()));
        assert_eq!(engine.pivot().map(|p| p.axis), Some(Axis::Y));

        let completed = engine
            .tick(Duration::from_secs(1), &prefs(), &mut model)
            .unwrap();
        assert_eq!(completed.cubies.as_slice(), &[CubieId(0)]);
    }

    #[test]
    fn test_on_complete_runs_after_commit() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        let layer = model.begin_twist(Axis::Y, 1, Sign::Pos, None).unwrap();
        engine.start(&layer.cubies, layer.axis, layer.direction, |model| {
            // The twist is already committed and input is unlocked.
            assert!(!model.is_animating());
            assert!(!model.is_solved());
            model.toggle_direction();
        });
        engine.tick(Duration::from_secs(1), &prefs(), &mut model);
        assert!(!model.is_clockwise());
    }

    #[test]
    fn test_easing_only_affects_display() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        let prefs = AnimationPreferences {
            twist_interpolation: InterpolateFn::CosineAccel,
            ..prefs()
        };
        engine.start(&[], Axis::Z, Sign::Pos, |_| ());
        engine.tick(Duration::from_millis(250), &prefs, &mut model);
        let angle = engine.pivot().unwrap().angle;
        assert!(angle.0 > 0.0 && angle.0 < 45.0);
        assert!(engine.tick(Duration::from_millis(250), &prefs, &mut model).is_some());
    }

    #[test]
    fn test_bad_speed_finishes_instantly() {
        for twist_speed in [0.0, -90.0, f32::NAN, f32::INFINITY] {
            let mut model = CubeModel::new();
            let mut engine = RotationEngine::default();
            let prefs = AnimationPreferences {
                twist_speed,
                ..prefs()
            };
            engine.start(&[], Axis::X, Sign::Neg, |_| ());
            let completed = engine.tick(Duration::ZERO, &prefs, &mut model);
            assert!(completed.is_some(), "speed {twist_speed}");
            assert!(!engine.is_animating());
        }
    }

    #[test]
    fn test_pivot_matrix() {
        let mut model = CubeModel::new();
        let mut engine = RotationEngine::default();
        assert_eq!(engine.pivot_matrix(), Matrix3::identity());
        engine.start(&[], Axis::Z, Sign::Pos, |_| ());
        engine.tick(Duration::from_millis(499), &prefs(), &mut model);
        let v = engine.pivot_matrix() * Vector3::new(0.0, 1.0, 0.0);
        assert!((v - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 0.01);
    }
}
