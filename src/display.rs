/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use crate::entities::{Bullet, GameState, GameStatus, Player, Target};

/// World units covered by one terminal cell. Cells are roughly twice as
/// tall as they are wide, so the vertical scale is doubled to keep the
/// game visually square.
pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_FIRE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_GLOW: Color = Color::DarkGrey;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Indexed by `Target::color`; length must stay `entities::TARGET_COLORS`.
const C_TARGETS: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::Cyan,
];

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    fire_period_ms: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (cols, rows) = grid_size(state);

    draw_border(out, cols, rows)?;

    for target in &state.targets {
        draw_target(out, target, cols, rows)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, cols, rows)?;
    }
    draw_player(out, &state.player, cols, rows)?;

    draw_hud(out, state, fire_period_ms, cols)?;
    draw_controls_hint(out, rows)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World → cell mapping ──────────────────────────────────────────────────────

fn grid_size(state: &GameState) -> (u16, u16) {
    ((state.width / CELL_W) as u16, (state.height / CELL_H) as u16)
}

fn to_cell(x: f32, y: f32) -> (i32, i32) {
    ((x / CELL_W) as i32, (y / CELL_H) as i32)
}

fn put<W: Write>(
    out: &mut W,
    col: i32,
    row: i32,
    cols: u16,
    rows: u16,
    glyph: &str,
) -> std::io::Result<()> {
    // Entity glyphs stay inside the border; HUD and hint rows stay clear
    if col < 1
        || row < 2
        || col >= cols.saturating_sub(1) as i32
        || row >= rows.saturating_sub(2) as i32
    {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row rows-2 — bottom bar
    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    fire_period_ms: u64,
    cols: u16,
) -> std::io::Result<()> {
    // Score and level — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.hud_line()))?;

    // Firing period readout — right
    let fire_str = format!("Fire: {}ms", fire_period_ms);
    let rx = cols.saturating_sub(fire_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_FIRE))?;
    out.queue(Print(&fire_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(player.x, player.y);

    // Glow halo first, then the body over its centre
    out.queue(style::SetForegroundColor(C_PLAYER_GLOW))?;
    put(out, col - 1, row, cols, rows, "░")?;
    put(out, col + 1, row, cols, rows, "░")?;
    put(out, col, row - 1, cols, rows, "░")?;
    put(out, col, row + 1, cols, rows, "░")?;

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    put(out, col, row, cols, rows, "◉")?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (col, row) = to_cell(bullet.x, bullet.y);
    out.queue(style::SetForegroundColor(C_BULLET))?;
    put(out, col, row, cols, rows, "•")?;
    Ok(())
}

fn draw_target<W: Write>(
    out: &mut W,
    target: &Target,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let color = C_TARGETS[target.color as usize % C_TARGETS.len()];
    out.queue(style::SetForegroundColor(color))?;

    let (col, row) = to_cell(target.x, target.y);

    // Shrunk remnant near the end of the despawn animation
    if target.size < CELL_W / 2.0 {
        return put(out, col, row, cols, rows, "·");
    }

    // The rotation shows as the square "tipping" between flat and diagonal
    let eighth = target.angle.rem_euclid(FRAC_PI_2);
    let glyph = if eighth < FRAC_PI_4 { "▓" } else { "◆" };

    let w_cells = ((target.size / CELL_W).round() as i32).max(1);
    let h_cells = ((target.size / CELL_H).round() as i32).max(1);
    for dr in 0..h_cells {
        for dc in 0..w_cells {
            put(out, col + dc, row + dr, cols, rows, glyph)?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("ARROWS : Move   MOUSE : Aim   [ ] : Fire rate   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let score_line = format!("Final Score: {:>6}", state.score);
    let level_line = format!("Level Reached: {:>4}", state.level);
    let hint = "R / ENTER - Play Again  Q - Quit";

    let cx = cols / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + level + hint
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let level_row = score_row + 1;
    let col = cx.saturating_sub(level_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, level_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&level_line))?;

    let hint_row = level_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
