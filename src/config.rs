//! Game tunables, gathered in one struct instead of scattered globals.

/// Every knob the simulation reads. Injected into `compute::init_state`
/// and `compute::tick`; tests build one with `Default` and tweak fields.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Player circle radius, world units.
    pub player_radius: f32,
    /// Player displacement per frame per held axis.
    pub player_speed: f32,
    /// Bullet circle radius, world units.
    pub bullet_radius: f32,
    /// Bullet displacement per frame along its aim vector.
    pub bullet_speed: f32,
    /// Side length of a freshly spawned target.
    pub target_size: f32,
    /// Per-axis target speed range (absolute value, per frame).
    pub target_min_speed: f32,
    pub target_max_speed: f32,
    /// Maximum target rotation per frame, radians (either direction).
    pub target_max_spin: f32,

    /// Targets in the first batch; doubles every time the board clears.
    pub initial_batch: u32,
    /// Distance kept between spawned corners and the canvas edge.
    pub spawn_padding: f32,
    /// Added to the player radius to form the per-axis spawn exclusion.
    pub spawn_clearance: f32,
    /// Random placement attempts per requested target.
    pub spawn_attempts: u32,

    /// Total despawn animation length, milliseconds.
    pub despawn_ms: u64,
    /// Units a hit target grows over the first animation half.
    pub despawn_expand: f32,
    /// Side length of the remnant the second half shrinks toward.
    pub despawn_remnant: f32,

    /// Auto-fire period, milliseconds, plus its adjustable range.
    pub fire_period_ms: u64,
    pub fire_period_min_ms: u64,
    pub fire_period_max_ms: u64,
    pub fire_period_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_radius: 15.0,
            player_speed: 5.0,
            bullet_radius: 5.0,
            bullet_speed: 8.0,
            target_size: 30.0,
            target_min_speed: 0.5,
            target_max_speed: 2.5,
            target_max_spin: 0.1,

            initial_batch: 5,
            spawn_padding: 10.0,
            spawn_clearance: 50.0,
            spawn_attempts: 10,

            despawn_ms: 500,
            despawn_expand: 4.0,
            despawn_remnant: 1.0,

            fire_period_ms: 300,
            fire_period_min_ms: 50,
            fire_period_max_ms: 1000,
            fire_period_step_ms: 50,
        }
    }
}
