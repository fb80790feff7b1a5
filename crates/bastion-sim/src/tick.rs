//! Pure state transitions: start, end, per-frame tick and enemy spawn.
//!
//! Each transition reads a committed `GameState` and returns a new one; the
//! input is never modified, so a reader holding the old snapshot never sees a
//! half-applied frame.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bastion_core::config::SimConfig;
use bastion_core::enums::EndReason;
use bastion_core::events::GameEvent;
use bastion_core::state::GameState;
use bastion_core::types::Position;

use crate::frame::{FrameContext, PositionResolver};
use crate::systems::{cleanup, collision, movement, range, spawner, targeting};

/// Frame timing supplied by the driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Time since the previous frame (ms). Varies with the display.
    pub elapsed_ms: f64,
    /// Session clock (ms).
    pub now_ms: f64,
}

/// A committed-ready state plus the events produced on the way.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }
}

/// Fresh active session. A running session is left as is.
///
/// The id counter carries over so ids stay unique across sessions.
pub fn start_game(state: &GameState) -> GameState {
    if state.is_running() {
        return state.clone();
    }
    GameState {
        game_active: true,
        next_entity_id: state.next_entity_id,
        ..GameState::default()
    }
}

/// Explicit termination. Only affects a running session.
pub fn end_game(state: &GameState) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    GameState {
        game_active: false,
        game_over: true,
        ..state.clone()
    }
}

/// Whether the turret may fire again at `now_ms`.
pub fn cooldown_elapsed(last_fired_ms: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    last_fired_ms.map_or(true, |last| now_ms - last >= cooldown_ms)
}

/// Advance one frame.
///
/// Order: move, classify range, player contact (ends the session and stops),
/// bullet hits and scoring, lifetime pruning, then the turret shot.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    config: &SimConfig,
    resolver: &dyn PositionResolver,
) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::unchanged(state);
    }

    let mut next = state.clone();
    next.frame += 1;
    let mut events = Vec::new();

    if next.enemies.is_empty() {
        return TickOutcome {
            state: next,
            events,
        };
    }

    let now_ms = input.now_ms;
    let ctx = FrameContext::new(resolver);
    // World coordinates keep the player at the origin.
    movement::run(&mut next.enemies, Position::ORIGIN, config, input.elapsed_ms);

    let range_info = range::track_enemies_in_range(
        &next.enemies,
        config.player.shooting_range,
        &ctx,
        config.debug.enemy_position_limit,
    );

    if let Some(hit) = range::check_player_collisions(&next.enemies, &ctx, config) {
        info!(
            enemy = hit.enemy_id,
            distance = hit.distance,
            score = next.score,
            "player hit, game over"
        );
        next.game_over = true;
        next.game_active = false;
        next.debug_info = range_info;
        events.push(GameEvent::PlayerHit {
            enemy_id: hit.enemy_id,
            distance: hit.distance,
        });
        events.push(GameEvent::GameEnded {
            score: next.score,
            reason: EndReason::Collision,
        });
        return TickOutcome {
            state: next,
            events,
        };
    }

    let sweep = collision::Sweep {
        previous: &state.enemies,
        elapsed_ms: input.elapsed_ms,
        now_ms,
    };
    let hits =
        collision::check_bullet_collisions(&next.bullets, &next.enemies, &ctx, &sweep, config);
    if !hits.is_empty() {
        let destroyed: HashSet<u64> = hits.iter().map(|&(_, enemy_id)| enemy_id).collect();
        let consumed: HashSet<u64> = hits.iter().map(|&(bullet_id, _)| bullet_id).collect();

        let mut gained = 0u64;
        for enemy in next.enemies.iter().filter(|e| destroyed.contains(&e.id)) {
            let points = config.points_for(enemy.kind);
            gained += points;
            events.push(GameEvent::EnemyDestroyed {
                enemy_id: enemy.id,
                kind: enemy.kind,
                points,
            });
        }
        debug!(
            hits = hits.len(),
            kills = destroyed.len(),
            gained,
            "bullet collisions"
        );

        next.score += gained;
        next.enemies.retain(|e| !destroyed.contains(&e.id));
        next.bullets.retain(|b| !consumed.contains(&b.id));
    }

    cleanup::prune_expired_bullets(&mut next.bullets, now_ms, config.bullet.lifetime_ms);

    if range_info.enemies_in_range > 0
        && cooldown_elapsed(next.last_bullet_fired_ms, now_ms, config.bullet.cooldown_ms)
    {
        if let Some(target) =
            targeting::find_closest_enemy_in_range(&next.enemies, config.player.shooting_range, &ctx)
        {
            let bullet_id = next.next_entity_id;
            let bullet = targeting::create_bullet(bullet_id, target.enemy, target.position, now_ms);
            debug!(
                bullet = bullet_id,
                enemy = target.enemy.id,
                distance = target.distance,
                "firing"
            );
            events.push(GameEvent::BulletFired {
                bullet_id,
                enemy_id: target.enemy.id,
                distance: target.distance,
            });
            next.next_entity_id += 1;
            next.bullets.push(bullet);
            next.last_bullet_fired_ms = Some(now_ms);
        }
    }

    next.debug_info = range_info;
    TickOutcome {
        state: next,
        events,
    }
}

/// Append one random enemy on the spawn ring. No-op unless running.
pub fn spawn_enemy(
    state: &GameState,
    now_ms: f64,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::unchanged(state);
    }

    let mut next = state.clone();
    let id = next.next_entity_id;
    next.next_entity_id += 1;

    let enemy = spawner::create_enemy(id, rng, config, Position::ORIGIN, now_ms);
    debug!(
        id,
        kind = %enemy.kind,
        x = enemy.position.x.round(),
        y = enemy.position.y.round(),
        "spawning enemy"
    );
    let event = GameEvent::EnemySpawned {
        id,
        kind: enemy.kind,
        x: enemy.position.x,
        y: enemy.position.y,
    };
    next.enemies.push(enemy);

    TickOutcome {
        state: next,
        events: vec![event],
    }
}
