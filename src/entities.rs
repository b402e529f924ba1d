/// All game entity types — pure data, no logic.

use std::time::Instant;

/// Number of entries in the target colour palette (see the display layer).
/// The spawner draws a palette index in `0..TARGET_COLORS`.
pub const TARGET_COLORS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Simulation side effects surfaced to the driver.
///
/// The tick functions mutate state and report what happened through these
/// instead of doing I/O, so the driver owns the audio cue and the overlay
/// and tests can observe effects directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A target finished its despawn animation and left play (score +1).
    TargetDestroyed,
    /// The last active target was destroyed; a doubled batch respawned.
    BatchCleared,
    /// A target touched the player; the game is over.
    PlayerHit,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Centre, world units.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Displacement per frame per held axis.
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    /// Centre, world units.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Velocity per frame, fixed at fire time (unit aim vector × speed).
    pub dx: f32,
    pub dy: f32,
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// Despawn animation bookkeeping for a target that has been hit.
/// The size curve is a pure function of time elapsed since `started`.
#[derive(Clone, Copy, Debug)]
pub struct Despawn {
    pub started: Instant,
    /// Side length the target had when the hit landed.
    pub base_size: f32,
}

#[derive(Clone, Debug)]
pub struct Target {
    /// Top-left corner, world units.
    pub x: f32,
    pub y: f32,
    /// Side length; mutated while a despawn animation runs.
    pub size: f32,
    /// Velocity per frame.
    pub dx: f32,
    pub dy: f32,
    /// Rotation in radians. Unbounded; wraps implicitly in trigonometric use.
    pub angle: f32,
    /// Rotation added per frame.
    pub spin: f32,
    /// Palette index in `0..TARGET_COLORS`.
    pub color: u8,
    /// Set once a bullet lands; the target leaves play when it completes.
    pub despawn: Option<Despawn>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Owned by the loop driver, borrowed mutably by
/// each simulation phase.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub targets: Vec<Target>,
    pub score: u32,
    pub level: u32,
    /// Targets per respawn; doubles each time the board is cleared.
    pub batch_size: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Canvas bounds in world units, fixed at startup.
    pub width: f32,
    pub height: f32,
}

impl GameState {
    /// The score/level readout exactly as the HUD prints it.
    pub fn hud_line(&self) -> String {
        format!("Score: {}  Level: {}", self.score, self.level)
    }
}
