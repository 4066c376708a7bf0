//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::ambient::Ambient;
use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{BlockColor, FIELD_HEIGHT, FIELD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen-space placement of the field frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the usual terminal glyph.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Center the field frame in the viewport.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = FIELD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = FIELD_HEIGHT as u16 + 2;
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of field cell `(x, y)`.
    pub fn cell_origin(&self, layout: Layout, x: u16, y: u16) -> (u16, u16) {
        (
            layout.frame_x + 1 + x * self.cell_w,
            layout.frame_y + 1 + y,
        )
    }

    pub fn render(&self, snap: &GameSnapshot, ambient: &Ambient, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let layout = self.layout(viewport);
        let field_bg = ambient.background();

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            Style::new(Rgb::new(70, 70, 80), field_bg),
        );
        draw_border(&mut fb, layout, Style::default());

        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                let color = snap.active_at(x, y).or_else(|| snap.settled_at(x, y));
                if let Some(color) = color {
                    let fg = if ambient.blink_on() {
                        Rgb::WHITE
                    } else {
                        block_rgb(color)
                    };
                    let (px, py) = self.cell_origin(layout, x as u16, y as u16);
                    fb.fill_rect(px, py, self.cell_w, 1, '█', Style::new(fg, field_bg));
                }
            }
        }

        self.draw_side_panel(&mut fb, snap, viewport, layout);

        if !snap.started {
            draw_overlay(&mut fb, layout, &["PRESS ENTER"]);
        } else if snap.game_over {
            let total = format!("Total score: {}", snap.score);
            draw_overlay(&mut fb, layout, &["GAME OVER", &total, "ENTER: again"]);
        } else if snap.paused {
            draw_overlay(&mut fb, layout, &["PAUSED"]);
        }

        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.frame_x + layout.frame_w + 2;
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::default();
        let hint = Style::new(Rgb::new(120, 120, 130), Rgb::BLACK);

        let y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x, y + 1, &snap.score.to_string(), value);
        fb.put_str(panel_x, y + 3, "ROWS", label);
        fb.put_str(panel_x, y + 4, &snap.rows_cleared.to_string(), value);

        let help = [
            "←/A  left",
            "→/D  right",
            "↓/S  down",
            "SPC  rotate",
            "P    pause",
            "Q    quit",
        ];
        for (i, line) in help.iter().enumerate() {
            fb.put_str(panel_x, y + 6 + i as u16, line, hint);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: Style) {
    let Layout {
        frame_x: x,
        frame_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;

    fb.put(x, y, '┌', style);
    fb.put(x + w - 1, y, '┐', style);
    fb.put(x, y + h - 1, '└', style);
    fb.put(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', style);
        fb.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', style);
        fb.put(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, layout: Layout, lines: &[&str]) {
    let style = Style::new(Rgb::WHITE, Rgb::BLACK).bold();
    let top = layout.frame_y + layout.frame_h / 2 - lines.len() as u16 / 2;
    for (i, line) in lines.iter().enumerate() {
        let w = line.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
        fb.put_str(x, top + i as u16, line, style);
    }
}

pub fn block_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Red => Rgb::new(220, 40, 40),
        BlockColor::Orange => Rgb::new(255, 165, 0),
        BlockColor::Yellow => Rgb::new(240, 220, 60),
        BlockColor::Green => Rgb::new(60, 190, 80),
        BlockColor::LightSkyBlue => Rgb::new(135, 206, 250),
        BlockColor::Blue => Rgb::new(50, 90, 230),
        BlockColor::Purple => Rgb::new(150, 60, 190),
    }
}
