//! Text renderer for terminals and headless runs
//!
//! The frame is sampled on a coarse grid: one cell per `CELL` units. Each
//! sprite fills the cells its box covers, later sprites on top.

use super::{Renderer, SpriteDraw};
use crate::consts::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::sim::EntityKind;

/// Logical units per character cell
const CELL: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    grid: Vec<Vec<char>>,
    /// Frames and messages drawn so far
    pub frames_drawn: u64,
    pub messages_drawn: u64,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        let cols = (FRAME_WIDTH / CELL) as usize;
        let rows = (FRAME_HEIGHT / CELL) as usize;
        Self {
            cols,
            rows,
            grid: vec![vec![' '; cols]; rows],
            frames_drawn: 0,
            messages_drawn: 0,
        }
    }

    /// Last drawn picture, framed with a border
    pub fn frame(&self) -> String {
        let border = format!("+{}+", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2));
        out.push_str(&border);
        out.push('\n');
        for row in &self.grid {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    fn glyph(draw: &SpriteDraw) -> char {
        match (draw.key.kind, draw.key.flipped) {
            (EntityKind::Player, false) => 'P',
            (EntityKind::Player, true) => 'p',
            (EntityKind::Enemy, false) => 'E',
            (EntityKind::Enemy, true) => 'e',
            (EntityKind::Projectile, _) => '*',
        }
    }

    /// Cell span covered by `[start, start + len)`, clipped to `limit`
    fn span(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        let from = (start / CELL).floor().max(0.0) as usize;
        let to = ((start + len) / CELL).ceil().max(0.0) as usize;
        from.min(limit)..to.min(limit)
    }
}

impl Renderer for AsciiRenderer {
    fn draw_frame(&mut self, sprites: &[SpriteDraw]) {
        self.clear();
        for draw in sprites {
            let glyph = Self::glyph(draw);
            for row in Self::span(draw.pos.y, draw.size.y, self.rows) {
                for col in Self::span(draw.pos.x, draw.size.x, self.cols) {
                    self.grid[row][col] = glyph;
                }
            }
        }
        self.frames_drawn += 1;
    }

    fn draw_message(&mut self, message: &str) {
        // Drawn over the last frame, centered
        let lines: Vec<&str> = message.lines().collect();
        let top = self.rows.saturating_sub(lines.len()) / 2;
        for (i, line) in lines.iter().enumerate() {
            let Some(row) = self.grid.get_mut(top + i) else {
                break;
            };
            let text: Vec<char> = line.chars().take(self.cols).collect();
            let left = (self.cols - text.len()) / 2;
            row[left..left + text.len()].copy_from_slice(&text);
        }
        self.messages_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{ImageHandle, SpriteKey};
    use glam::Vec2;

    fn draw(kind: EntityKind, pos: Vec2, size: Vec2) -> SpriteDraw {
        SpriteDraw {
            entity_id: 1,
            key: SpriteKey::base(kind),
            image: ImageHandle(1),
            pos,
            size,
            angle: 0.0,
        }
    }

    #[test]
    fn test_sprites_fill_cells() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw_frame(&[
            draw(EntityKind::Player, Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0)),
            draw(EntityKind::Projectile, Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0)),
        ]);
        assert_eq!(renderer.cell(0, 0), Some('P'));
        assert_eq!(renderer.cell(1, 1), Some('*'), "later sprites on top");
        assert_eq!(renderer.cell(2, 2), Some(' '));
        assert_eq!(renderer.frames_drawn, 1);
    }

    #[test]
    fn test_offscreen_sprite_is_clipped() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw_frame(&[draw(
            EntityKind::Enemy,
            Vec2::new(480.0, 240.0),
            Vec2::new(100.0, 82.0),
        )]);
        assert_eq!(renderer.cell(49, 24), Some('E'));
        assert!(renderer.frame().lines().all(|l| l.chars().count() == 52));
    }

    #[test]
    fn test_message_overlay() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw_message("You win!\nYeah!");
        let frame = renderer.frame();
        assert!(frame.contains("You win!"));
        assert!(frame.contains("Yeah!"));
        assert_eq!(renderer.messages_drawn, 1);
    }
}
