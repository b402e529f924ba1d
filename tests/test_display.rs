use square_shooter::display::render;
use square_shooter::entities::*;

/// An 800×600 world canvas (80×30 terminal cells), player centred.
fn make_state() -> GameState {
    GameState {
        player: Player { x: 400.0, y: 300.0, radius: 15.0, speed: 5.0 },
        bullets: Vec::new(),
        targets: Vec::new(),
        score: 0,
        level: 0,
        batch_size: 5,
        status: GameStatus::Running,
        frame: 0,
        width: 800.0,
        height: 600.0,
    }
}

fn render_to_string(state: &GameState) -> String {
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, state, 300).expect("rendering to a buffer cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

#[test]
fn render_draws_border_box() {
    let out = render_to_string(&make_state());
    assert!(out.contains('┌'));
    assert!(out.contains('┐'));
    assert!(out.contains('└'));
    assert!(out.contains('┘'));
    assert!(out.contains('─'));
    assert!(out.contains('│'));
}

#[test]
fn render_draws_hud_and_hint() {
    let out = render_to_string(&make_state());
    assert!(out.contains("Score: 0  Level: 0"));
    assert!(out.contains("Fire: 300ms"));
    assert!(out.contains("ARROWS : Move"));
}

#[test]
fn render_draws_game_over_overlay() {
    let mut state = make_state();
    state.status = GameStatus::GameOver;
    state.score = 17;
    let out = render_to_string(&state);
    assert!(out.contains("GAME  OVER"));
    assert!(out.contains("Final Score:"));
    assert!(out.contains("Play Again"));
}

#[test]
fn render_draws_entities() {
    let mut state = make_state();
    state.bullets.push(Bullet { x: 200.0, y: 200.0, radius: 5.0, dx: 0.0, dy: -8.0 });
    state.targets.push(Target {
        x: 100.0,
        y: 100.0,
        size: 30.0,
        dx: 1.0,
        dy: 1.0,
        angle: 0.0,
        spin: 0.05,
        color: 0,
        despawn: None,
    });
    let out = render_to_string(&state);
    assert!(out.contains('◉')); // player
    assert!(out.contains('•')); // bullet
    assert!(out.contains('▓')); // unrotated target
}
