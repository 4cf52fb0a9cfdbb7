//! Rendering layer — all terminal I/O lives here.
//!
//! `draw` paints one frame of the game onto any `Surface`; `present`
//! pushes a `FrameBuffer` plus the HUD out to the terminal.  No game logic
//! is performed; this module only translates state into draw calls and
//! terminal commands.

pub mod canvas;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

pub use canvas::{FrameBuffer, Rgba, Surface};

use crate::entities::{GameState, Notice};

// ── Colour palette ────────────────────────────────────────────────────────────

/// Painted over the whole canvas each frame; leaves motion trails.
pub const FADE: Rgba = Rgba::rgba(0, 0, 0, 0.1);
pub const SHIP_COLOR: Rgba = Rgba::rgb(0, 255, 255);
pub const PROJECTILE_COLOR: Rgba = Rgba::rgb(0, 255, 255);
pub const ENEMY_COLOR: Rgba = Rgba::rgb(255, 0, 0);

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Draw one frame of the game onto `surface`.
pub fn draw<S: Surface>(surface: &mut S, state: &GameState) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, w, h, FADE);

    // Ship: tip at top centre, base along the bottom edge
    let s = state.ship.rect();
    surface.fill_triangle(
        [
            (s.x + s.width / 2.0, s.y),
            (s.x, s.y + s.height),
            (s.x + s.width, s.y + s.height),
        ],
        SHIP_COLOR,
    );

    for projectile in &state.projectiles {
        let r = projectile.rect();
        surface.fill_rect(r.x, r.y, r.width, r.height, PROJECTILE_COLOR);
    }

    // Enemies point down at the ship
    for enemy in &state.enemies {
        let r = enemy.rect();
        surface.fill_triangle(
            [
                (r.x + r.width / 2.0, r.y + r.height),
                (r.x, r.y),
                (r.x + r.width, r.y),
            ],
            ENEMY_COLOR,
        );
    }
}

// ── Terminal output ───────────────────────────────────────────────────────────

/// Draw `state` into `fb` and push everything to the terminal.
pub fn render<W: Write>(
    out: &mut W,
    fb: &mut FrameBuffer,
    state: &GameState,
) -> std::io::Result<()> {
    draw(fb, state);
    present(out, fb, state)
}

/// Write the raster and HUD to the terminal and flush.
pub fn present<W: Write>(
    out: &mut W,
    fb: &FrameBuffer,
    state: &GameState,
) -> std::io::Result<()> {
    draw_hud(out, state)?;
    draw_raster(out, fb)?;
    draw_controls_hint(out, fb.rows() / 2 + 1)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;
    out.queue(Print("   "))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("High Score: {}", state.high_score)))?;
    out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    Ok(())
}

/// Each terminal cell shows two stacked pixels as `▀`: the foreground
/// colour is the upper pixel, the background the lower one.
fn draw_raster<W: Write>(out: &mut W, fb: &FrameBuffer) -> std::io::Result<()> {
    let mut last: Option<((u8, u8, u8), (u8, u8, u8))> = None;

    for cell_row in 0..fb.rows() / 2 {
        out.queue(cursor::MoveTo(0, cell_row as u16 + 1))?;
        for col in 0..fb.cols() {
            let top = fb.pixel(col, cell_row * 2);
            let bottom = fb.pixel(col, cell_row * 2 + 1);
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(rgb(top)))?;
                out.queue(style::SetBackgroundColor(rgb(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print('▀'))?;
        }
    }
    Ok(())
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

fn draw_controls_hint<W: Write>(out: &mut W, row: usize) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row as u16))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    Ok(())
}

// ── Session-end overlay ───────────────────────────────────────────────────────

/// Boxed notice centred on a `width` × `height` terminal.
pub fn draw_notice<W: Write>(
    out: &mut W,
    notice: &Notice,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let mut body = notice.lines();
    body.push(String::new());
    body.push("ENTER - Play Again   Q - Quit".to_string());

    let inner = body.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let mut lines: Vec<(String, Color)> = Vec::with_capacity(body.len() + 2);
    lines.push((format!("╔{}╗", "═".repeat(inner)), Color::Red));
    for (i, text) in body.iter().enumerate() {
        let color = match notice {
            Notice::NewHighScore { .. } if i == 0 => Color::Yellow,
            _ if i + 1 == body.len() => Color::White,
            _ => Color::Red,
        };
        lines.push((format!("║{:^inner$}║", text, inner = inner), color));
    }
    lines.push((format!("╚{}╝", "═".repeat(inner)), Color::Red));

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
