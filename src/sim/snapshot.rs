//! Read-only view of a session for renderers
//!
//! A snapshot is an owned copy taken after a tick, so a renderer can draw it
//! while the next tick runs against the live state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, ExplosionKind, GameEvent, GameState, SessionPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    /// Triple-shot active (drawn gold instead of cyan)
    pub powered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    /// Center
    pub pos: Vec2,
    pub size: f32,
    pub kind: ExplosionKind,
    /// Remaining life in [0, 1], used as alpha
    pub life: f32,
}

/// Everything a renderer or HUD needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub tick: u64,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub field: Vec2,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    /// Events from the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl SessionSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            tick: state.tick,
            score: state.score,
            lives: state.lives,
            level: state.level,
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                powered: state.player.power_up_active,
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    size: b.size,
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                    kind: e.kind,
                    health: e.health,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    size: p.size,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    kind: p.kind,
                    life: p.life_fraction(),
                })
                .collect(),
            events: state.events.clone(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}
