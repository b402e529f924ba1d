use square_shooter::entities::*;

#[test]
fn enums_compare_and_clone() {
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);
    assert_eq!(GameEvent::TargetDestroyed, GameEvent::TargetDestroyed);
    assert_ne!(GameEvent::TargetDestroyed, GameEvent::BatchCleared);

    let ev = GameEvent::PlayerHit;
    assert_eq!(ev, GameEvent::PlayerHit);
}

#[test]
fn hud_line_formats_score_and_level() {
    let state = GameState {
        player: Player { x: 400.0, y: 300.0, radius: 15.0, speed: 5.0 },
        bullets: Vec::new(),
        targets: Vec::new(),
        score: 12,
        level: 3,
        batch_size: 5,
        status: GameStatus::Running,
        frame: 0,
        width: 800.0,
        height: 600.0,
    };
    assert_eq!(state.hud_line(), "Score: 12  Level: 3");
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
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
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.targets.push(Target {
        x: 100.0,
        y: 100.0,
        size: 30.0,
        dx: 1.0,
        dy: 1.0,
        angle: 0.0,
        spin: 0.05,
        color: 2,
        despawn: None,
    });

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.targets.is_empty());
}
