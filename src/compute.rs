/// Simulation logic.
///
/// Every phase function borrows the `GameState` mutably, mutates it in
/// place and reports side effects as `GameEvent`s. Randomness comes
/// through an injected RNG and time through an injected monotonic `now`,
/// so callers (and tests) control determinism. No I/O happens here.

use std::time::{Duration, Instant};

use log::warn;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Bullet, Despawn, GameEvent, GameState, GameStatus, Player, Target, TARGET_COLORS,
};

// ── Constructors & state machine ─────────────────────────────────────────────

/// Build a fresh game for the given canvas bounds: player centred, empty
/// bullet list, an initial batch of targets, score and level at zero.
pub fn init_state(
    cfg: &GameConfig,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> GameState {
    let player = Player {
        x: width / 2.0,
        y: height / 2.0,
        radius: cfg.player_radius,
        speed: cfg.player_speed,
    };
    let targets = spawn_targets(rng, cfg, cfg.initial_batch as usize, width, height, &player);
    GameState {
        player,
        bullets: Vec::new(),
        targets,
        score: 0,
        level: 0,
        batch_size: cfg.initial_batch,
        status: GameStatus::Running,
        frame: 0,
        width,
        height,
    }
}

pub fn reset_score(state: &mut GameState) {
    state.score = 0;
}

pub fn reset_level(state: &mut GameState) {
    state.level = 0;
}

/// The GameOver → Running transition: counters back to zero, bullets
/// cleared, batch size back to the initial value, fresh targets, player
/// recentred. Safe to call from Running as well (it is a full restart).
pub fn reset(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng) {
    reset_score(state);
    reset_level(state);
    state.bullets.clear();
    state.batch_size = cfg.initial_batch;
    state.player.x = state.width / 2.0;
    state.player.y = state.height / 2.0;
    state.targets = spawn_targets(
        rng,
        cfg,
        state.batch_size as usize,
        state.width,
        state.height,
        &state.player,
    );
    state.status = GameStatus::Running;
    state.frame = 0;
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one frame of held-key displacement. `dx`/`dy` are direction
/// signs (-1, 0 or 1); the player centre stays fully on the canvas.
pub fn move_player(state: &mut GameState, dx: f32, dy: f32) {
    let (w, h) = (state.width, state.height);
    let p = &mut state.player;
    p.x = clamp_to_span(p.x + dx * p.speed, p.radius, w);
    p.y = clamp_to_span(p.y + dy * p.speed, p.radius, h);
}

/// Clamp a centre coordinate so the circle stays within `[0, dim]`. A
/// canvas narrower than the diameter pins the centre to the middle
/// instead (clamp bounds would invert there).
fn clamp_to_span(v: f32, radius: f32, dim: f32) -> f32 {
    if dim < 2.0 * radius {
        dim / 2.0
    } else {
        v.clamp(radius, dim - radius)
    }
}

/// Fire one bullet from the player centre toward the aim point. The
/// velocity is fixed at fire time: unit aim vector × bullet speed. A
/// degenerate aim (on the player centre) fires straight up.
pub fn fire_bullet(state: &mut GameState, aim_x: f32, aim_y: f32, cfg: &GameConfig) {
    let (px, py) = (state.player.x, state.player.y);
    let (mut ux, mut uy) = (aim_x - px, aim_y - py);
    let len = (ux * ux + uy * uy).sqrt();
    if len > f32::EPSILON {
        ux /= len;
        uy /= len;
    } else {
        ux = 0.0;
        uy = -1.0;
    }
    state.bullets.push(Bullet {
        x: px,
        y: py,
        radius: cfg.bullet_radius,
        dx: ux * cfg.bullet_speed,
        dy: uy * cfg.bullet_speed,
    });
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Place up to `count` targets inside padded canvas bounds, each with its
/// per-axis distance from the player exceeding radius + clearance on both
/// axes. Placement is bounded random retry; running out of attempts
/// under-spawns with a warning rather than failing.
pub fn spawn_targets(
    rng: &mut impl Rng,
    cfg: &GameConfig,
    count: usize,
    width: f32,
    height: f32,
    player: &Player,
) -> Vec<Target> {
    let min = cfg.spawn_padding;
    let max_x = width - cfg.target_size - cfg.spawn_padding;
    let max_y = height - cfg.target_size - cfg.spawn_padding;
    if max_x <= min || max_y <= min {
        warn!("canvas too small to place any {}-unit target", cfg.target_size);
        return Vec::new();
    }

    let clearance = player.radius + cfg.spawn_clearance;
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..cfg.spawn_attempts {
            let x = rng.gen_range(min..max_x);
            let y = rng.gen_range(min..max_y);
            if (x - player.x).abs() <= clearance || (y - player.y).abs() <= clearance {
                continue;
            }
            placed.push(Target {
                x,
                y,
                size: cfg.target_size,
                dx: random_axis_speed(rng, cfg),
                dy: random_axis_speed(rng, cfg),
                angle: 0.0,
                spin: rng.gen_range(-cfg.target_max_spin..cfg.target_max_spin),
                color: rng.gen_range(0..TARGET_COLORS),
                despawn: None,
            });
            break;
        }
    }
    if placed.len() < count {
        warn!(
            "placed {} of {} targets within the attempt budget",
            placed.len(),
            count
        );
    }
    placed
}

fn random_axis_speed(rng: &mut impl Rng, cfg: &GameConfig) -> f32 {
    let v = rng.gen_range(cfg.target_min_speed..cfg.target_max_speed);
    if rng.gen_bool(0.5) {
        v
    } else {
        -v
    }
}

// ── Hit tests ────────────────────────────────────────────────────────────────

/// Strict point-in-rectangle containment: a point exactly on an edge is
/// not inside.
pub fn point_in_target(t: &Target, x: f32, y: f32) -> bool {
    x > t.x && x < t.x + t.size && y > t.y && y < t.y + t.size
}

/// Expanded-rectangle overlap test using the player radius as margin.
pub fn target_touches_player(t: &Target, p: &Player) -> bool {
    p.x + p.radius > t.x
        && p.x - p.radius < t.x + t.size
        && p.y + p.radius > t.y
        && p.y - p.radius < t.y + t.size
}

// ── Per-frame phases ─────────────────────────────────────────────────────────

/// Advance every bullet and target by one frame.
///
/// Bullets whose centre leaves the canvas are dropped in a single filter
/// pass. Targets reflect elastically off the edges: the offending
/// coordinate is clamped into `[0, dim - size]` and that axis's velocity
/// is negated. Rotation accumulates without normalization.
pub fn step_physics(state: &mut GameState) {
    let (w, h) = (state.width, state.height);

    for b in state.bullets.iter_mut() {
        b.x += b.dx;
        b.y += b.dy;
    }
    state
        .bullets
        .retain(|b| b.x >= 0.0 && b.x <= w && b.y >= 0.0 && b.y <= h);

    for t in state.targets.iter_mut() {
        t.x += t.dx;
        t.y += t.dy;
        t.angle += t.spin;

        let max_x = w - t.size;
        if t.x < 0.0 {
            t.x = 0.0;
            t.dx = -t.dx;
        } else if t.x > max_x {
            t.x = max_x;
            t.dx = -t.dx;
        }
        let max_y = h - t.size;
        if t.y < 0.0 {
            t.y = 0.0;
            t.dy = -t.dy;
        } else if t.y > max_y {
            t.y = max_y;
            t.dy = -t.dy;
        }
    }
}

/// Side length of a despawning target after `elapsed` of the animation:
/// grow by `despawn_expand` over the first half, shrink to the remnant
/// over the second.
fn despawn_size(cfg: &GameConfig, base: f32, elapsed: Duration) -> f32 {
    let frac = (elapsed.as_secs_f32() / Duration::from_millis(cfg.despawn_ms).as_secs_f32())
        .clamp(0.0, 1.0);
    let peak = base + cfg.despawn_expand;
    if frac < 0.5 {
        base + cfg.despawn_expand * (frac / 0.5)
    } else {
        peak - (peak - cfg.despawn_remnant) * ((frac - 0.5) / 0.5)
    }
}

/// Advance every running despawn animation against `now`. Completed
/// targets are removed in one filter pass, each scoring a point and
/// emitting `TargetDestroyed`. If removal empties the board the batch
/// size doubles, the spawner refills it and the level increments.
pub fn step_despawns(
    state: &mut GameState,
    now: Instant,
    rng: &mut impl Rng,
    cfg: &GameConfig,
) -> Vec<GameEvent> {
    let total = Duration::from_millis(cfg.despawn_ms);

    for t in state.targets.iter_mut() {
        if let Some(d) = t.despawn {
            let elapsed = now.saturating_duration_since(d.started);
            if elapsed < total {
                t.size = despawn_size(cfg, d.base_size, elapsed);
            }
        }
    }

    let before = state.targets.len();
    state.targets.retain(|t| match t.despawn {
        Some(d) => now.saturating_duration_since(d.started) < total,
        None => true,
    });
    let removed = before - state.targets.len();
    state.score += removed as u32;
    let mut events = vec![GameEvent::TargetDestroyed; removed];

    if removed > 0 && state.targets.is_empty() {
        state.batch_size *= 2;
        state.level += 1;
        state.targets = spawn_targets(
            rng,
            cfg,
            state.batch_size as usize,
            state.width,
            state.height,
            &state.player,
        );
        events.push(GameEvent::BatchCleared);
    }
    events
}

/// All-pairs collision pass.
///
/// Each bullet is tested against every active (non-despawning) target
/// with the strict containment test; the first hit removes the bullet in
/// the same tick and stamps the target's despawn record with `now`.
/// Separately, any target overlapping the player's expanded rectangle
/// ends the game immediately.
pub fn step_collisions(state: &mut GameState, now: Instant) -> Vec<GameEvent> {
    let mut used_bullets: Vec<usize> = Vec::new();
    for (bi, b) in state.bullets.iter().enumerate() {
        for t in state.targets.iter_mut() {
            if t.despawn.is_some() {
                continue;
            }
            if point_in_target(t, b.x, b.y) {
                t.despawn = Some(Despawn {
                    started: now,
                    base_size: t.size,
                });
                used_bullets.push(bi);
                break;
            }
        }
    }
    let mut i = 0;
    state.bullets.retain(|_| {
        let keep = !used_bullets.contains(&i);
        i += 1;
        keep
    });

    let mut events = Vec::new();
    if state
        .targets
        .iter()
        .any(|t| target_touches_player(t, &state.player))
    {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::PlayerHit);
    }
    events
}

/// One frame of simulation: physics, despawn progression (with
/// refill-on-empty), then collisions. Does nothing unless Running.
pub fn tick(
    state: &mut GameState,
    now: Instant,
    rng: &mut impl Rng,
    cfg: &GameConfig,
) -> Vec<GameEvent> {
    if state.status != GameStatus::Running {
        return Vec::new();
    }
    state.frame += 1;

    step_physics(state);
    let mut events = step_despawns(state, now, rng, cfg);
    events.extend(step_collisions(state, now));
    events
}
