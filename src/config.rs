//! Game configuration
//!
//! Every tunable the simulation needs is injected here; the core never
//! queries a display or platform. Values a host typically overrides
//! (screen size, speeds, widths) are absolute; layout ratios stay
//! fractional so they track whatever screen size is injected.
//!
//! Invalid configuration is a programmer error and fails fast at engine
//! construction via [`GameConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::consts;

/// Configuration rejected at engine construction
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field that must be strictly positive was zero or negative
    NonPositive { field: &'static str, value: f32 },
    /// A field was NaN or infinite
    NonFinite { field: &'static str },
    /// The easy gap fraction must not be below the hard gap fraction
    GapRangeInverted { base: f32, min: f32 },
    /// `difficulty_step` of zero would divide by zero in the staircase
    ZeroDifficultyStep,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "config field `{field}` must be positive, got {value}")
            }
            ConfigError::NonFinite { field } => {
                write!(f, "config field `{field}` must be finite")
            }
            ConfigError::GapRangeInverted { base, min } => {
                write!(f, "base gap fraction {base} is below min gap fraction {min}")
            }
            ConfigError::ZeroDifficultyStep => write!(f, "difficulty_step must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Logical screen size; screen y grows downward
    pub screen_width: f32,
    pub screen_height: f32,

    /// Gravity, screen units per 60 Hz frame squared
    pub gravity: f32,
    /// Jump impulse; replaces velocity outright, negative = upward
    pub jump_impulse: f32,

    /// Scroll speed at and below `speed_threshold`
    pub base_pipe_speed: f32,
    /// Absolute speed gain per `difficulty_step` points past the threshold
    pub speed_increment: f32,

    /// Pipe solid width
    pub pipe_width: f32,
    /// Length of each solid half above/below the gap; tall enough to
    /// always reach past the screen edge
    pub pipe_half_height: f32,

    /// Gap size at difficulty level 0, fraction of screen height
    pub base_gap_fraction: f32,
    /// Gap size at the max difficulty level, fraction of screen height
    pub min_gap_fraction: f32,
    /// Gap center offset is sampled in ± this fraction of screen height
    pub vertical_offset_fraction: f32,

    /// Score past which scroll speed rises
    pub speed_threshold: u32,
    /// Score past which the gap narrows
    pub difficulty_threshold: u32,
    /// Points per difficulty step
    pub difficulty_step: u32,
    /// Last gap-narrowing step
    pub max_difficulty_level: u32,

    /// Spawn once the rightmost pipe is this fraction of screen width
    /// in from the right edge
    pub spawn_distance_fraction: f32,
    /// Prune once fully left of this fraction of screen width
    pub removal_threshold_fraction: f32,
    /// Lead distance of a run's seed pipe, fraction of screen width
    pub first_pipe_lead_fraction: f32,

    /// Player anchor column, fraction of screen width
    pub player_x_fraction: f32,
    /// Player bounding square, fraction of screen width
    pub player_size_fraction: f32,
    /// Starting offset from mid-screen, fraction of screen height
    pub player_start_offset_fraction: f32,
    /// Boundary-breach margin, fraction of screen height
    pub boundary_margin_fraction: f32,

    /// Cutout legs on the gap-mouth / far corners, fractions of pipe width
    pub cutout_near_fraction: f32,
    pub cutout_far_fraction: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: consts::SCREEN_WIDTH,
            screen_height: consts::SCREEN_HEIGHT,
            gravity: consts::GRAVITY,
            jump_impulse: consts::JUMP_IMPULSE,
            base_pipe_speed: consts::SCREEN_WIDTH * consts::BASE_SPEED_FRACTION,
            speed_increment: consts::SPEED_INCREMENT,
            pipe_width: consts::SCREEN_WIDTH * consts::PIPE_WIDTH_FRACTION,
            pipe_half_height: consts::SCREEN_HEIGHT,
            base_gap_fraction: consts::BASE_GAP_FRACTION,
            min_gap_fraction: consts::MIN_GAP_FRACTION,
            vertical_offset_fraction: consts::VERTICAL_OFFSET_FRACTION,
            speed_threshold: consts::SPEED_THRESHOLD,
            difficulty_threshold: consts::DIFFICULTY_THRESHOLD,
            difficulty_step: consts::DIFFICULTY_STEP,
            max_difficulty_level: consts::MAX_DIFFICULTY_LEVEL,
            spawn_distance_fraction: consts::SPAWN_DISTANCE_FRACTION,
            removal_threshold_fraction: consts::REMOVAL_THRESHOLD_FRACTION,
            first_pipe_lead_fraction: consts::FIRST_PIPE_LEAD_FRACTION,
            player_x_fraction: consts::PLAYER_X_FRACTION,
            player_size_fraction: consts::PLAYER_SIZE_FRACTION,
            player_start_offset_fraction: consts::PLAYER_START_OFFSET_FRACTION,
            boundary_margin_fraction: consts::BOUNDARY_MARGIN_FRACTION,
            cutout_near_fraction: consts::CUTOUT_NEAR_FRACTION,
            cutout_far_fraction: consts::CUTOUT_FAR_FRACTION,
        }
    }
}

impl GameConfig {
    /// Check the configuration, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("base_pipe_speed", self.base_pipe_speed),
            ("speed_increment", self.speed_increment),
            ("vertical_offset_fraction", self.vertical_offset_fraction),
            ("spawn_distance_fraction", self.spawn_distance_fraction),
            ("removal_threshold_fraction", self.removal_threshold_fraction),
            ("first_pipe_lead_fraction", self.first_pipe_lead_fraction),
            ("player_start_offset_fraction", self.player_start_offset_fraction),
            ("boundary_margin_fraction", self.boundary_margin_fraction),
            ("cutout_near_fraction", self.cutout_near_fraction),
            ("cutout_far_fraction", self.cutout_far_fraction),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("pipe_width", self.pipe_width),
            ("pipe_half_height", self.pipe_half_height),
            ("base_gap_fraction", self.base_gap_fraction),
            ("min_gap_fraction", self.min_gap_fraction),
            ("player_x_fraction", self.player_x_fraction),
            ("player_size_fraction", self.player_size_fraction),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.base_gap_fraction < self.min_gap_fraction {
            return Err(ConfigError::GapRangeInverted {
                base: self.base_gap_fraction,
                min: self.min_gap_fraction,
            });
        }
        if self.difficulty_step == 0 {
            return Err(ConfigError::ZeroDifficultyStep);
        }
        Ok(())
    }

    /// Player anchor column in screen space
    #[inline]
    pub fn player_x(&self) -> f32 {
        self.screen_width * self.player_x_fraction
    }

    /// Side of the player's unscaled bounding square
    #[inline]
    pub fn player_size(&self) -> f32 {
        self.screen_width * self.player_size_fraction
    }

    /// Player `y` at the start of a run (offset from mid-screen)
    #[inline]
    pub fn player_start_y(&self) -> f32 {
        self.screen_height * self.player_start_offset_fraction
    }

    #[inline]
    pub fn screen_center_y(&self) -> f32 {
        self.screen_height / 2.0
    }

    #[inline]
    pub fn boundary_margin(&self) -> f32 {
        self.screen_height * self.boundary_margin_fraction
    }

    /// Rightmost pipe `x` below this triggers a spawn
    #[inline]
    pub fn spawn_threshold_x(&self) -> f32 {
        self.screen_width - self.screen_width * self.spawn_distance_fraction
    }

    /// `x` where freshly spawned pipes appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.screen_width + self.pipe_width
    }

    /// `x` of the single pipe seeded at run start
    #[inline]
    pub fn first_pipe_x(&self) -> f32 {
        self.screen_width + self.screen_width * self.first_pipe_lead_fraction
    }

    /// Pipes whose trailing edge is left of this are pruned
    #[inline]
    pub fn removal_x(&self) -> f32 {
        self.screen_width * self.removal_threshold_fraction
    }

    /// Cutout leg on the gap-mouth corners
    #[inline]
    pub fn cutout_near(&self) -> f32 {
        self.pipe_width * self.cutout_near_fraction
    }

    /// Cutout leg on the far corners
    #[inline]
    pub fn cutout_far(&self) -> f32 {
        self.pipe_width * self.cutout_far_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_derived_positions() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.player_x(), 100.0);
        assert_eq!(cfg.player_size(), 60.0);
        assert_eq!(cfg.pipe_width, 80.0);
        assert_eq!(cfg.base_pipe_speed, 4.0);
        assert_eq!(cfg.spawn_threshold_x(), 200.0);
        assert_eq!(cfg.spawn_x(), 480.0);
        assert_eq!(cfg.removal_x(), -50.0);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut cfg = GameConfig::default();
        cfg.screen_height = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "screen_height", .. })
        ));

        let mut cfg = GameConfig::default();
        cfg.pipe_width = -80.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "pipe_width", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_gap_range() {
        let mut cfg = GameConfig::default();
        cfg.base_gap_fraction = 0.1;
        cfg.min_gap_fraction = 0.3;
        assert!(matches!(cfg.validate(), Err(ConfigError::GapRangeInverted { .. })));
    }

    #[test]
    fn test_rejects_non_finite_and_zero_step() {
        let mut cfg = GameConfig::default();
        cfg.gravity = f32::NAN;
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite { field: "gravity" }));

        let mut cfg = GameConfig::default();
        cfg.difficulty_step = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDifficultyStep));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let cfg = GameConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
