//! Session state and entity types
//!
//! Everything a tick reads or writes lives in `GameState`, which the caller
//! owns and passes into `tick`/`advance`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounded};
use crate::tuning::{Tuning, TuningError};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but not yet started
    NotStarted,
    /// Active gameplay
    Running,
    /// Out of lives; terminal until reset
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal movement per tick
    pub speed: f32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Triple-shot mode
    pub power_up_active: bool,
    pub power_up_ticks: u32,
}

impl Player {
    /// Player centered horizontally near the bottom of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0 - tuning.player_width / 2.0,
                tuning.field_height - tuning.player_spawn_margin,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            shoot_cooldown: 0,
            power_up_active: false,
            power_up_ticks: 0,
        }
    }

    /// Where a bullet of the given width leaves the ship
    pub fn muzzle(&self, bullet_width: f32) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0 - bullet_width / 2.0, self.pos.y)
    }

    /// Enter (or refresh) triple-shot mode
    pub fn activate_power_up(&mut self, ticks: u32) {
        self.power_up_active = true;
        self.power_up_ticks = ticks;
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward movement per tick
    pub speed: f32,
    /// Horizontal movement per tick (angled shots)
    pub drift: f32,
}

impl Bullet {
    /// Fully above the top edge
    pub fn is_off_field(&self) -> bool {
        self.pos.y < -self.size.y
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    /// Larger, takes three hits, worth more
    Strong,
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward movement per tick, fixed at spawn
    pub speed: f32,
    pub health: u32,
}

impl Enemy {
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn is_off_field(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A falling triple-shot pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl PowerUp {
    pub fn is_off_field(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// What caused an explosion; doubles as the particle color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Enemy rammed the player (red)
    PlayerHit,
    /// Enemy shot down (green)
    EnemyDestroyed,
}

/// A visual particle (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: ExplosionKind,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { bullets: u32 },
    EnemyHit { id: u32, health: u32 },
    EnemyDestroyed { id: u32, kind: EnemyKind, points: u64 },
    PlayerHit { lives: u32 },
    PowerUpCollected,
    PowerUpExpired,
    LevelUp { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from (reused by `reset`)
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    /// Ticks advanced since the session started
    pub tick: u64,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Accumulated ms since the last enemy spawn
    pub enemy_spawn_timer: f32,
    /// Accumulated ms since the last power-up spawn
    pub power_up_spawn_timer: f32,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session with default tuning. Call `start` to begin play.
    pub fn new(seed: u64) -> Self {
        Self::from_validated(Tuning::default(), seed)
    }

    /// Create a session with custom tuning, rejecting values the tick
    /// cannot run with (for example a player wider than the field).
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_validated(tuning, seed))
    }

    fn from_validated(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::NotStarted,
            tick: 0,
            score: 0,
            level: 1,
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            enemy_spawn_timer: 0.0,
            power_up_spawn_timer: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// NotStarted -> Running. Ignored in any other phase.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::NotStarted {
            self.phase = SessionPhase::Running;
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Return to the initial counters and empty field, then restart play.
    /// The RNG is reseeded so the restarted session is reproducible.
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Like `reset`, but with a fresh seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::from_validated(tuning, seed);
        self.phase = SessionPhase::Running;
        log::info!("Session reset (seed {})", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a bullet at `pos` drifting sideways by `drift` per tick
    pub fn spawn_bullet(&mut self, pos: Vec2, drift: f32) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            size: Vec2::new(self.tuning.bullet_width, self.tuning.bullet_height),
            speed: self.tuning.bullet_speed,
            drift,
        });
        id
    }

    /// Spawn an enemy of the given variant; speed follows the current level
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let variant = *self.tuning.enemy_variant(kind);
        let speed = self.tuning.enemy_speed(self.level);
        self.enemies.push(Enemy {
            id,
            kind,
            pos,
            size: Vec2::new(variant.width, variant.height),
            speed,
            health: variant.health,
        });
        log::debug!("Spawned {:?} enemy {} at ({:.1}, {:.1})", kind, id, pos.x, pos.y);
        id
    }

    pub fn spawn_power_up(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let size = self.tuning.power_up_size;
        self.power_ups.push(PowerUp {
            id,
            pos,
            size: Vec2::splat(size),
            speed: self.tuning.power_up_speed,
        });
        log::debug!("Spawned power-up {} at x={:.1}", id, pos.x);
        id
    }

    /// Emit a burst of particles centered at `center`
    pub fn spawn_explosion(&mut self, center: Vec2, kind: ExplosionKind) {
        let t = &self.tuning;
        let life = t.particle_life_ticks;
        let spread = t.particle_max_speed * 2.0;

        for _ in 0..t.explosion_particles {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * spread,
                (self.rng.random::<f32>() - 0.5) * spread,
            );
            let size = self.rng.random::<f32>() * t.particle_size_range + t.particle_min_size;
            self.particles.push(Particle {
                pos: center,
                vel,
                size,
                kind,
                life,
                max_life: life,
            });
        }

        // Drop the oldest particles to stay under the cap
        let excess = self.particles.len().saturating_sub(t.max_particles);
        if excess > 0 {
            self.particles.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.pos, Vec2::new(380.0, 540.0));
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut state = GameState::new(1);
        state.start();
        assert_eq!(state.phase, SessionPhase::Running);

        state.phase = SessionPhase::GameOver;
        state.start();
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = GameState::new(7);
        state.start();
        state.score = 420;
        state.lives = 0;
        state.level = 3;
        state.phase = SessionPhase::GameOver;
        state.spawn_enemy(EnemyKind::Strong, Vec2::new(10.0, 10.0));
        state.spawn_bullet(Vec2::new(10.0, 10.0), 0.0);
        state.spawn_power_up(Vec2::new(10.0, 10.0));
        state.spawn_explosion(Vec2::new(10.0, 10.0), ExplosionKind::PlayerHit);
        state.enemy_spawn_timer = 900.0;

        state.reset();

        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.enemy_spawn_timer, 0.0);
        assert_eq!(state.player, Player::new(&state.tuning));
    }

    #[test]
    fn test_reset_keeps_custom_tuning() {
        let tuning = Tuning {
            starting_lives: 5,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(tuning, 3).unwrap();
        state.lives = 1;
        state.reset();
        assert_eq!(state.lives, 5);
        assert_eq!(state.tuning.starting_lives, 5);
    }

    #[test]
    fn test_with_tuning_rejects_player_wider_than_field() {
        let tuning = Tuning {
            field_width: 30.0,
            ..Tuning::default()
        };
        let err = GameState::with_tuning(tuning, 1).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player_width",
                ..
            }
        ));
    }

    #[test]
    fn test_enemy_center() {
        let mut state = GameState::new(1);
        state.spawn_enemy(EnemyKind::Strong, Vec2::new(100.0, 20.0));
        assert_eq!(state.enemies[0].center(), Vec2::new(122.5, 42.5));
    }

    #[test]
    fn test_enemy_variants() {
        let mut state = GameState::new(1);
        state.spawn_enemy(EnemyKind::Normal, Vec2::ZERO);
        state.spawn_enemy(EnemyKind::Strong, Vec2::ZERO);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.enemies[0].size, Vec2::splat(35.0));
        assert_eq!(state.enemies[1].health, 3);
        assert_eq!(state.enemies[1].size, Vec2::splat(45.0));
        assert_ne!(state.enemies[0].id, state.enemies[1].id);
    }

    #[test]
    fn test_explosion_burst() {
        let mut state = GameState::new(1);
        let center = Vec2::new(200.0, 200.0);
        state.spawn_explosion(center, ExplosionKind::EnemyDestroyed);
        assert_eq!(state.particles.len(), 15);
        for p in &state.particles {
            assert_eq!(p.pos, center);
            assert!(p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0);
            assert!(p.size >= 2.0 && p.size <= 6.0);
            assert_eq!(p.life_fraction(), 1.0);
        }
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let tuning = Tuning {
            max_particles: 20,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(tuning, 1).unwrap();
        state.spawn_explosion(Vec2::ZERO, ExplosionKind::PlayerHit);
        state.spawn_explosion(Vec2::ONE, ExplosionKind::EnemyDestroyed);
        assert_eq!(state.particles.len(), 20);
        let player_hit = state
            .particles
            .iter()
            .filter(|p| p.kind == ExplosionKind::PlayerHit)
            .count();
        assert_eq!(player_hit, 5);
    }

    #[test]
    fn test_muzzle_is_centered() {
        let player = Player::new(&Tuning::default());
        assert_eq!(player.muzzle(4.0), Vec2::new(398.0, 540.0));
    }
}
