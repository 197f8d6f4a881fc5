//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - Delta-time integration, clamped to a sane band
//! - Seeded RNG only (a run seed reproduces the run exactly)
//! - Single-threaded mutation, all inside the tick
//! - No rendering or platform dependencies
//!
//! Hosts talk to [`Engine`]; the submodules are exposed for tests and
//! for embedders that want the pieces individually.

pub mod collision;
pub mod engine;
pub mod pipes;
pub mod player;

pub use engine::{Engine, GamePhase, PipeSnapshot, PlayerSnapshot};
pub use pipes::{Pipe, difficulty_level, gap_height, pipe_speed};
pub use player::PlayerBody;
