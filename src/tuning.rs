//! Data-driven game balance
//!
//! Every gameplay constant lives here. Defaults reproduce the classic arcade
//! feel on an 800x600 field at 60 ticks per second. Overrides are loaded from
//! JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::EnemyKind;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Per-variant enemy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyVariant {
    pub width: f32,
    pub height: f32,
    pub health: u32,
    /// Score awarded when destroyed
    pub points: u64,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal movement per tick
    pub player_speed: f32,
    /// Distance from the bottom edge to the player's top edge at spawn
    pub player_spawn_margin: f32,
    pub starting_lives: u32,
    pub shoot_cooldown_ticks: u32,
    pub powered_shoot_cooldown_ticks: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Lateral drift of the outer bullets in a triple shot
    pub spread_drift: f32,

    // === Enemies ===
    pub normal_enemy: EnemyVariant,
    pub strong_enemy: EnemyVariant,
    /// Probability that a spawned enemy is the strong variant
    pub strong_enemy_chance: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_level: f32,
    /// Spawn x is drawn from `[0, field_width - enemy_spawn_margin)`
    pub enemy_spawn_margin: f32,
    pub enemy_spawn_y: f32,
    pub enemy_spawn_interval_ms: f32,
    pub enemy_spawn_interval_step_ms: f32,
    pub min_enemy_spawn_interval_ms: f32,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_speed: f32,
    pub power_up_spawn_interval_ms: f32,
    pub power_up_duration_ticks: u32,

    // === Particles ===
    pub explosion_particles: u32,
    pub particle_life_ticks: u32,
    /// Max absolute velocity per axis
    pub particle_max_speed: f32,
    pub particle_min_size: f32,
    pub particle_size_range: f32,
    /// Size multiplier applied every tick
    pub particle_decay: f32,
    pub max_particles: usize,

    // === Progression ===
    /// A level is gained every time the score crosses a multiple of this
    pub level_score_step: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_width: 40.0,
            player_height: 40.0,
            player_speed: 5.0,
            player_spawn_margin: 60.0,
            starting_lives: 3,
            shoot_cooldown_ticks: 20,
            powered_shoot_cooldown_ticks: 10,

            bullet_width: 4.0,
            bullet_height: 12.0,
            bullet_speed: 7.0,
            spread_drift: 2.0,

            normal_enemy: EnemyVariant {
                width: 35.0,
                height: 35.0,
                health: 1,
                points: 10,
            },
            strong_enemy: EnemyVariant {
                width: 45.0,
                height: 45.0,
                health: 3,
                points: 30,
            },
            strong_enemy_chance: 0.2,
            enemy_base_speed: 2.0,
            enemy_speed_per_level: 0.5,
            enemy_spawn_margin: 40.0,
            enemy_spawn_y: -40.0,
            enemy_spawn_interval_ms: 1000.0,
            enemy_spawn_interval_step_ms: 100.0,
            min_enemy_spawn_interval_ms: 500.0,

            power_up_size: 25.0,
            power_up_speed: 2.0,
            power_up_spawn_interval_ms: 15_000.0,
            power_up_duration_ticks: 300, // 5 seconds at 60 Hz

            explosion_particles: 15,
            particle_life_ticks: 30,
            particle_max_speed: 3.0,
            particle_min_size: 2.0,
            particle_size_range: 4.0,
            particle_decay: 0.95,
            max_particles: 512,

            level_score_step: 200,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parameters for an enemy variant
    pub fn enemy_variant(&self, kind: EnemyKind) -> &EnemyVariant {
        match kind {
            EnemyKind::Normal => &self.normal_enemy,
            EnemyKind::Strong => &self.strong_enemy,
        }
    }

    /// Downward speed of enemies spawned at `level`
    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.enemy_base_speed + level.saturating_sub(1) as f32 * self.enemy_speed_per_level
    }

    /// Enemy spawn threshold at `level`, floor-clamped
    pub fn enemy_spawn_interval(&self, level: u32) -> f32 {
        let shrink = level.saturating_sub(1) as f32 * self.enemy_spawn_interval_step_ms;
        (self.enemy_spawn_interval_ms - shrink).max(self.min_enemy_spawn_interval_ms)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("enemy_base_speed", self.enemy_base_speed),
            ("min_enemy_spawn_interval_ms", self.min_enemy_spawn_interval_ms),
            ("power_up_size", self.power_up_size),
            ("power_up_speed", self.power_up_speed),
            ("power_up_spawn_interval_ms", self.power_up_spawn_interval_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.player_width >= self.field_width {
            return Err(invalid("player_width", "player must fit inside the field"));
        }
        if self.player_spawn_margin <= 0.0 || self.player_spawn_margin > self.field_height {
            return Err(invalid(
                "player_spawn_margin",
                "player must spawn inside the field",
            ));
        }
        if self.enemy_spawn_margin >= self.field_width {
            return Err(invalid("enemy_spawn_margin", "must be narrower than the field"));
        }
        if self.power_up_size >= self.field_width {
            return Err(invalid("power_up_size", "must be narrower than the field"));
        }
        if !(0.0..=1.0).contains(&self.strong_enemy_chance) {
            return Err(invalid("strong_enemy_chance", "must be within [0, 1]"));
        }
        for (field, variant) in [
            ("normal_enemy", &self.normal_enemy),
            ("strong_enemy", &self.strong_enemy),
        ] {
            if variant.health == 0 {
                return Err(invalid(field, "health must be at least 1"));
            }
            if !(variant.width > 0.0 && variant.height > 0.0) {
                return Err(invalid(field, "size must be positive"));
            }
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.particle_life_ticks == 0 {
            return Err(invalid("particle_life_ticks", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.particle_decay) {
            return Err(invalid("particle_decay", "must be within [0, 1]"));
        }
        if self.level_score_step == 0 {
            return Err(invalid("level_score_step", "must be at least 1"));
        }

        Ok(())
    }
}
