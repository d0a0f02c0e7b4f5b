//! Frame-driven simulation tick
//!
//! Advances a running session by exactly one step. Phases run in a fixed
//! order; entities that become invalid are dropped within the same tick, and
//! collision passes always test against the entity set as it stood when the
//! pass began.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Bounded;
use super::snapshot::SessionSnapshot;
use super::state::{EnemyKind, ExplosionKind, GameEvent, GameState, SessionPhase};

/// Logical inputs held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Clamp `dt_ms`, advance one tick and capture the result for rendering.
///
/// Negative or non-finite frame times are treated as zero.
pub fn advance(state: &mut GameState, input: &TickInput, dt_ms: f32) -> SessionSnapshot {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    tick(state, input, dt_ms);
    SessionSnapshot::capture(state)
}

/// Advance the session by one step. Does nothing unless the session is running.
///
/// `dt_ms` must be non-negative; `advance` guarantees this.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();
    if state.phase != SessionPhase::Running {
        return;
    }
    state.tick += 1;

    update_player(state, input);
    update_bullets(state);
    spawn_enemies(state, dt_ms);
    update_enemies(state);
    if state.phase == SessionPhase::GameOver {
        return;
    }
    resolve_bullet_hits(state);
    spawn_power_ups(state, dt_ms);
    update_power_ups(state);
    update_particles(state);
}

/// Movement, firing and power-up countdown
fn update_player(state: &mut GameState, input: &TickInput) {
    let max_x = state.tuning.field_width - state.player.size.x;
    let player = &mut state.player;

    let mut dx = 0.0;
    if input.left {
        dx -= player.speed;
    }
    if input.right {
        dx += player.speed;
    }
    // f32::clamp panics on a negative or NaN bound
    player.pos.x = (player.pos.x + dx).min(max_x).max(0.0);

    player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);
    if input.fire && player.shoot_cooldown == 0 {
        fire(state);
    }

    let player = &mut state.player;
    if player.power_up_active {
        player.power_up_ticks = player.power_up_ticks.saturating_sub(1);
        if player.power_up_ticks == 0 {
            player.power_up_active = false;
            state.events.push(GameEvent::PowerUpExpired);
            log::debug!("Power-up expired");
        }
    }
}

fn fire(state: &mut GameState) {
    let muzzle = state.player.muzzle(state.tuning.bullet_width);
    let powered = state.player.power_up_active;

    let bullets = if powered {
        let drift = state.tuning.spread_drift;
        for offset in [-drift, 0.0, drift] {
            state.spawn_bullet(muzzle, offset);
        }
        state.player.shoot_cooldown = state.tuning.powered_shoot_cooldown_ticks;
        3
    } else {
        state.spawn_bullet(muzzle, 0.0);
        state.player.shoot_cooldown = state.tuning.shoot_cooldown_ticks;
        1
    };
    state.events.push(GameEvent::Shot { bullets });
}

fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
        bullet.pos.x += bullet.drift;
    }
    state.bullets.retain(|b| !b.is_off_field());
}

/// Accumulate frame time; spawn one enemy once the level's threshold is exceeded
fn spawn_enemies(state: &mut GameState, dt_ms: f32) {
    state.enemy_spawn_timer += dt_ms;
    if state.enemy_spawn_timer <= state.tuning.enemy_spawn_interval(state.level) {
        return;
    }
    state.enemy_spawn_timer = 0.0;

    let kind = if state.rng.random::<f32>() < state.tuning.strong_enemy_chance {
        EnemyKind::Strong
    } else {
        EnemyKind::Normal
    };
    let span = state.tuning.field_width - state.tuning.enemy_spawn_margin;
    let x = state.rng.random::<f32>() * span;
    let y = state.tuning.enemy_spawn_y;
    state.spawn_enemy(kind, Vec2::new(x, y));
}

/// Move enemies down and resolve collisions with the player
fn update_enemies(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let field_height = state.tuning.field_height;
    let mut lives = state.lives;
    let mut rammed: Vec<(u32, Vec2)> = Vec::new();

    state.enemies.retain_mut(|enemy| {
        enemy.pos.y += enemy.speed;
        // Once the last life is gone nothing else can hit the player
        if lives > 0 && enemy.bounds().overlaps(&player_bounds) {
            lives -= 1;
            rammed.push((enemy.id, enemy.center()));
            return false;
        }
        !enemy.is_off_field(field_height)
    });

    state.lives = lives;
    for (id, center) in rammed {
        state.spawn_explosion(center, ExplosionKind::PlayerHit);
        state.events.push(GameEvent::PlayerHit { lives: state.lives });
        log::debug!("Enemy {} hit the player, {} lives left", id, state.lives);
    }

    if state.lives == 0 {
        state.phase = SessionPhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        log::info!(
            "Game over after {} ticks: score {}, level {}",
            state.tick,
            state.score,
            state.level
        );
    }
}

/// Each bullet strikes at most one enemy: the first live one it overlaps.
/// Health is checked per hit, so several bullets can finish a strong enemy in
/// the same tick while any surplus bullet flies on.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];
    let mut kills: Vec<(u32, EnemyKind, Vec2)> = Vec::new();

    for (bullet, used) in state.bullets.iter().zip(spent.iter_mut()) {
        let bounds = bullet.bounds();
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.health > 0 && e.bounds().overlaps(&bounds))
        else {
            continue;
        };

        *used = true;
        enemy.health -= 1;
        if enemy.health == 0 {
            kills.push((enemy.id, enemy.kind, enemy.center()));
        } else {
            state.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                health: enemy.health,
            });
        }
    }

    let mut spent = spent.into_iter();
    state.bullets.retain(|_| !spent.next().unwrap_or(false));
    state.enemies.retain(|e| e.health > 0);

    for (id, kind, center) in kills {
        state.spawn_explosion(center, ExplosionKind::EnemyDestroyed);
        let points = state.tuning.enemy_variant(kind).points;
        state.events.push(GameEvent::EnemyDestroyed { id, kind, points });
        log::debug!("Destroyed {:?} enemy {} (+{})", kind, id, points);
        award_points(state, points);
    }
}

/// Add score and gain a level for every multiple of the level step crossed
fn award_points(state: &mut GameState, points: u64) {
    let step = state.tuning.level_score_step;
    let before = state.score;
    state.score += points;

    let crossed = state.score / step - before / step;
    for _ in 0..crossed {
        state.level += 1;
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!("Level up: {} (score {})", state.level, state.score);
    }
}

fn spawn_power_ups(state: &mut GameState, dt_ms: f32) {
    state.power_up_spawn_timer += dt_ms;
    if state.power_up_spawn_timer <= state.tuning.power_up_spawn_interval_ms {
        return;
    }
    state.power_up_spawn_timer = 0.0;

    let span = state.tuning.field_width - state.tuning.power_up_size;
    let x = state.rng.random::<f32>() * span;
    let y = -state.tuning.power_up_size;
    state.spawn_power_up(Vec2::new(x, y));
}

fn update_power_ups(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let field_height = state.tuning.field_height;
    let mut collected = false;

    state.power_ups.retain_mut(|power_up| {
        power_up.pos.y += power_up.speed;
        if power_up.bounds().overlaps(&player_bounds) {
            collected = true;
            return false;
        }
        !power_up.is_off_field(field_height)
    });

    if collected {
        let ticks = state.tuning.power_up_duration_ticks;
        state.player.activate_power_up(ticks);
        state.events.push(GameEvent::PowerUpCollected);
        log::debug!("Power-up collected, triple shot for {} ticks", ticks);
    }
}

fn update_particles(state: &mut GameState) {
    let decay = state.tuning.particle_decay;
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.size *= decay;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}
