use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Angular speed of a twist, in degrees per second.
    pub twist_speed: f32,
    /// Easing applied to the displayed angle of a twist.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_speed: 180.0,
            twist_interpolation: InterpolateFn::Lerp,
        }
    }
}
impl AnimationPreferences {
    /// Returns how long one quarter turn takes, in seconds.
    pub fn quarter_turn_duration(&self) -> f32 {
        90.0 / self.twist_speed
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};
    use strum::{Display, EnumIter};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize, Deserialize, EnumIter, Display, Debug, Default, Copy, Clone, PartialEq, Eq, Hash,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum InterpolateFn {
        /// Constant speed.
        #[default]
        Lerp,
        /// Cosine from 0 to π.
        Cosine,
        /// Cosine from 0 to π/2.
        CosineAccel,
        /// Cosine from π/2 to 0.
        CosineDecel,
        /// Smoothstep.
        Cubic,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        pub fn interpolate(self, t: f32) -> f32 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,
                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
                Self::CosineAccel => 1.0 - (t * PI / 2.0).cos(),
                Self::CosineDecel => ((1.0 - t) * PI / 2.0).cos(),
                Self::Cubic => (3.0 - 2.0 * t) * t * t,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use strum::IntoEnumIterator;

        use super::*;

        #[test]
        fn test_interpolation_endpoints() {
            for f in InterpolateFn::iter() {
                assert!(f.interpolate(0.0).abs() < 1e-6, "{f} at 0");
                assert!((f.interpolate(1.0) - 1.0).abs() < 1e-6, "{f} at 1");
                assert!((f.interpolate(2.0) - 1.0).abs() < 1e-6, "{f} past 1");
            }
        }

        #[test]
        fn test_interpolation_is_monotonic() {
            for f in InterpolateFn::iter() {
                let mut last = 0.0;
                for i in 1..=100 {
                    let y = f.interpolate(i as f32 / 100.0);
                    assert!(y >= last - 1e-6, "{f} decreases at step {i}");
                    last = y;
                }
            }
        }
    }
}
