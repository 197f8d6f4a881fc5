//! Sloth Hop - a tap-to-hop side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collision, game state)
//! - `geom`: 2D geometry kernel (polygons, cut rectangles, containment tests)
//! - `config`: Injected game configuration, validated at engine construction
//! - `store`: Key-value persistence seam for the high score
//! - `feedback`: Injected sound/haptics capability
//!
//! The crate contains no rendering or platform code. A host drives the
//! engine with `handle_tap()` and `tick(dt)` and reads plain-data
//! snapshots back for presentation.

pub mod config;
pub mod feedback;
pub mod geom;
pub mod sim;
pub mod store;

pub use config::{ConfigError, GameConfig};
pub use feedback::{Feedback, NullFeedback};
pub use sim::{Engine, GamePhase, PipeSnapshot, PlayerSnapshot};
pub use store::{JsonFileStore, MemoryStore, ScoreStore};

/// Game tuning constants
///
/// Screen-relative values are fractions of the injected screen dimensions
/// so the simulation is resolution-independent. `GameConfig::default()`
/// is built from these.
pub mod consts {
    /// Gravity acceleration, in screen units per 60 Hz frame squared
    pub const GRAVITY: f32 = 0.55;
    /// Jump impulse; negative = upward (screen y grows downward)
    pub const JUMP_IMPULSE: f32 = -9.0;

    /// Default logical screen size (injected, not queried from a display)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Pipe width as a fraction of screen width
    pub const PIPE_WIDTH_FRACTION: f32 = 0.2;
    /// Base scroll speed as a fraction of screen width per 60 Hz frame
    pub const BASE_SPEED_FRACTION: f32 = 0.01;
    /// Absolute speed increase per difficulty step past the threshold
    pub const SPEED_INCREMENT: f32 = 0.1;

    /// Passable gap, easiest, as a fraction of screen height
    pub const BASE_GAP_FRACTION: f32 = 0.35;
    /// Passable gap, hardest, as a fraction of screen height
    pub const MIN_GAP_FRACTION: f32 = 0.20;
    /// Gap center is sampled uniformly within ± this fraction of screen height
    pub const VERTICAL_OFFSET_FRACTION: f32 = 0.20;

    /// Score at which the scroll speed starts rising
    pub const SPEED_THRESHOLD: u32 = 10;
    /// Score at which the gap starts narrowing
    pub const DIFFICULTY_THRESHOLD: u32 = 10;
    /// Points per difficulty step past the threshold
    pub const DIFFICULTY_STEP: u32 = 5;
    /// Last gap-narrowing step; speed keeps rising beyond it, uncapped
    pub const MAX_DIFFICULTY_LEVEL: u32 = 4;

    /// A new pipe spawns once the rightmost one has scrolled this
    /// fraction of screen width in from the right edge
    pub const SPAWN_DISTANCE_FRACTION: f32 = 0.5;
    /// Pipes are pruned once fully past this fraction of screen width
    /// left of the screen (negative = off-screen)
    pub const REMOVAL_THRESHOLD_FRACTION: f32 = -0.125;
    /// The seed pipe of a run starts this fraction of screen width
    /// beyond the right edge
    pub const FIRST_PIPE_LEAD_FRACTION: f32 = 0.25;

    /// Player anchor column as a fraction of screen width
    pub const PLAYER_X_FRACTION: f32 = 0.25;
    /// Player bounding square as a fraction of screen width
    pub const PLAYER_SIZE_FRACTION: f32 = 0.15;
    /// Starting vertical offset from mid-screen (negative = above center)
    pub const PLAYER_START_OFFSET_FRACTION: f32 = -0.10;
    /// Boundary-breach margin as a fraction of screen height
    pub const BOUNDARY_MARGIN_FRACTION: f32 = 0.0375;

    /// Cutout leg on the corners bordering the gap mouth, fraction of pipe width
    pub const CUTOUT_NEAR_FRACTION: f32 = 0.30;
    /// Cutout leg on the corners away from the gap, fraction of pipe width
    pub const CUTOUT_FAR_FRACTION: f32 = 0.12;

    /// Delta-time clamp band; ticks outside it are treated as hitches
    pub const DT_MIN: f32 = 1.0 / 120.0;
    pub const DT_MAX: f32 = 1.0 / 30.0;
    /// Physics constants are tuned against a 60 Hz frame
    pub const DT_BASELINE: f32 = 60.0;

    /// Transient hitbox/visual scale applied on jump
    pub const JUMP_SCALE_POP: f32 = 1.2;
    /// Seconds the jump scale pop lasts
    pub const JUMP_SCALE_POP_SECS: f32 = 0.2;

    /// Tilt while ascending, degrees
    pub const ROTATION_ASCENDING_DEG: f32 = -15.0;
    /// Tilt while descending, degrees
    pub const ROTATION_DESCENDING_DEG: f32 = 20.0;

    /// Ticks the transient GameOver phase lasts before returning to Menu
    pub const GAME_OVER_TICKS: u32 = 36;
}

/// Clamp a raw frame delta into the sane band before integration.
///
/// Guards against hitches and the missing-timestamp first frame; a
/// non-finite delta collapses to the upper bound.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(consts::DT_MIN, consts::DT_MAX)
    } else {
        consts::DT_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dt_band() {
        assert_eq!(clamp_dt(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clamp_dt(0.0), consts::DT_MIN);
        assert_eq!(clamp_dt(1.0), consts::DT_MAX);
        assert_eq!(clamp_dt(f32::NAN), consts::DT_MAX);
    }
}
