//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded};
pub use snapshot::{
    BulletView, EnemyView, ParticleView, PlayerView, PowerUpView, SessionSnapshot,
};
pub use state::{
    Bullet, Enemy, EnemyKind, ExplosionKind, GameEvent, GameState, Particle, Player, PowerUp,
    SessionPhase,
};
pub use tick::{TickInput, advance, tick};
