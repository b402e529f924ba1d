use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use square_shooter::compute::{fire_bullet, init_state, move_player, reset, tick};
use square_shooter::config::GameConfig;
use square_shooter::display::{self, CELL_H, CELL_W};
use square_shooter::entities::{GameEvent, GameStatus};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and apply all their effects simultaneously,
/// so diagonal movement works with two arrows held.
///
/// The auto-fire timer is its own timeline: a deadline checked once per
/// frame, fired and re-armed whenever `now` passes it.  Adjusting the period
/// with `[` / `]` re-arms the deadline from `now + period` in one step, the
/// cancel-and-reinstate semantics of a swapped timer.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let cfg = GameConfig::default();
    let mut rng = thread_rng();

    // Canvas sized once at startup; terminal resizes are ignored afterwards
    let (cols, rows) = terminal::size()?;
    let width = cols as f32 * CELL_W;
    let height = rows as f32 * CELL_H;

    let mut state = init_state(&cfg, width, height, &mut rng);

    let mut fire_period_ms = cfg.fire_period_ms;
    let mut next_shot = Instant::now() + Duration::from_millis(fire_period_ms);

    // Aim point in world units, updated from mouse-move events.
    // Until the mouse moves, bullets go straight up from the start position.
    let mut aim: (f32, f32) = (width / 2.0, 0.0);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(());
                            }
                            KeyCode::Char('[') => {
                                fire_period_ms = fire_period_ms
                                    .saturating_sub(cfg.fire_period_step_ms)
                                    .max(cfg.fire_period_min_ms);
                                next_shot =
                                    Instant::now() + Duration::from_millis(fire_period_ms);
                            }
                            KeyCode::Char(']') => {
                                fire_period_ms = (fire_period_ms + cfg.fire_period_step_ms)
                                    .min(cfg.fire_period_max_ms);
                                next_shot =
                                    Instant::now() + Duration::from_millis(fire_period_ms);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
                                if state.status == GameStatus::GameOver =>
                            {
                                reset(&mut state, &cfg, &mut rng);
                                next_shot =
                                    Instant::now() + Duration::from_millis(fire_period_ms);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    if matches!(
                        kind,
                        MouseEventKind::Moved | MouseEventKind::Drag(_)
                    ) {
                        // Cell centre → world units; cells and canvas share
                        // the same grid, so no page/canvas offset exists
                        aim = (
                            column as f32 * CELL_W + CELL_W / 2.0,
                            row as f32 * CELL_H + CELL_H / 2.0,
                        );
                    }
                }
                _ => {}
            }
        }

        if state.status == GameStatus::Running {
            // ── Held-key displacement, read once at the top of the frame ──────
            let dx = (is_held(&key_frame, &KeyCode::Right, frame) as i8
                - is_held(&key_frame, &KeyCode::Left, frame) as i8) as f32;
            let dy = (is_held(&key_frame, &KeyCode::Down, frame) as i8
                - is_held(&key_frame, &KeyCode::Up, frame) as i8) as f32;
            if dx != 0.0 || dy != 0.0 {
                move_player(&mut state, dx, dy);
            }

            // ── Auto-fire on its own period ───────────────────────────────────
            let now = Instant::now();
            while now >= next_shot {
                fire_bullet(&mut state, aim.0, aim.1, &cfg);
                next_shot += Duration::from_millis(fire_period_ms);
            }

            let events = tick(&mut state, now, &mut rng, &cfg);
            for ev in &events {
                if *ev == GameEvent::TargetDestroyed {
                    // Pop cue: terminal bell, flushed with the frame
                    out.queue(Print("\x07"))?;
                }
            }
        }

        display::render(out, &state, fire_period_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Before the alternate screen so RUST_LOG output stays on stderr
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
