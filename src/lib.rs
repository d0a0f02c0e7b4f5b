//! Nova Strike - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `wasm`: Browser bindings (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use sim::{GameState, SessionPhase, SessionSnapshot, TickInput, advance};
pub use tuning::{Tuning, TuningError};

/// Frame timing constants for drivers
pub mod consts {
    /// Nominal frame rate the tick-based counters are balanced for
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;
}
