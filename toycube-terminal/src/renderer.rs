/// Character-cell drawing surface for terminal output
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point2, Vector2};
use std::io::Write;
use toycube_core::{Rgba, Surface};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Surface units per cell row. Cells are roughly twice as tall as wide, so
/// one surface unit is a column horizontally and half a row vertically.
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<Rgba>,
}

impl Cell {
    const BLANK: Self = Self {
        ch: ' ',
        color: None,
    };
}

/// Grid of coloured characters implementing [`Surface`]
pub struct CharCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CharCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    /// Resize to `width` columns and `height` rows, dropping the contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
    }

    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    /// Character at column `x`, row `y`
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }

    /// Cell position of a surface point
    fn to_cell(&self, x: f32, y: f32) -> (i64, i64) {
        (x.floor() as i64, (y / CELL_ASPECT).floor() as i64)
    }

    fn put(&mut self, col: i64, row: i64, ch: char, color: Rgba) {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = Cell {
            ch,
            color: Some(color),
        };
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let color = match cell.color {
                    Some(c) => Color::Rgb {
                        r: c.r,
                        g: c.g,
                        b: c.b,
                    },
                    None => Color::Reset,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(cell.ch))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a colour's brightness
fn shade_char(color: &Rgba) -> char {
    let brightness = color.luminance() * color.a.clamp(0.0, 1.0);
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    // keep filled faces visible even when dark
    LUMINOSITY_RAMP[index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

/// Line glyph for a direction in cell space (y grows downwards)
fn line_char(dx: f32, dy: f32) -> char {
    if dy.abs() < dx.abs() * 0.4 {
        '-'
    } else if dx.abs() < dy.abs() * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

impl Surface for CharCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32 * CELL_ASPECT)
    }

    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (c0, r0) = self.to_cell(x, y);
        let (c1, r1) = self.to_cell(x + width, y + height);
        for row in r0.max(0)..r1.min(self.height as i64) {
            for col in c0.max(0)..c1.min(self.width as i64) {
                self.cells[row as usize * self.width + col as usize] = Cell::BLANK;
            }
        }
    }

    fn draw_line(&mut self, p0: Point2<f32>, p1: Point2<f32>, _width: f32, color: Rgba) {
        // step in cell space so every crossed cell gets a glyph
        let a = Vector2::new(p0.x, p0.y / CELL_ASPECT);
        let b = Vector2::new(p1.x, p1.y / CELL_ASPECT);
        let delta = b - a;
        if !delta.iter().all(|c| c.is_finite()) {
            return;
        }

        let ch = line_char(delta.x, delta.y);
        let bounds = Vector2::new(self.width as f32, self.height as f32);
        let Some((a, b)) = clip_segment(a, b, bounds) else {
            return;
        };
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a + delta * (i as f32 / steps as f32);
            self.put(p.x.floor() as i64, p.y.floor() as i64, ch, color);
        }
    }

    fn fill_triangle(&mut self, p0: Point2<f32>, p1: Point2<f32>, p2: Point2<f32>, color: Rgba) {
        let ch = shade_char(&color);
        let (v0, v1, v2) = ((p0.x, p0.y), (p1.x, p1.y), (p2.x, p2.y));

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = (v0.1.min(v1.1).min(v2.1) / CELL_ASPECT).floor() as i64;
        let max_y = (v0.1.max(v1.1).max(v2.1) / CELL_ASPECT).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for row in min_y..=max_y {
            for col in min_x..=max_x {
                // cell centre in surface units
                let px = col as f32 + 0.5;
                let py = (row as f32 + 0.5) * CELL_ASPECT;

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(col, row, ch, color);
                    }
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font_size: f32, color: Rgba) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let (col, row) = self.to_cell(x, y);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i64, row, ch, color);
        }
    }
}

/// Liang-Barsky clip of segment `a`-`b` to the rectangle from the origin to `max`
fn clip_segment(
    a: Vector2<f32>,
    b: Vector2<f32>,
    max: Vector2<f32>,
) -> Option<(Vector2<f32>, Vector2<f32>)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in [(-d.x, a.x), (d.x, max.x - a.x), (-d.y, a.y), (d.y, max.y - a.y)] {
        if p == 0.0 {
            // parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    (t0 <= t1).then(|| (a + d * t0, a + d * t1))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 || !denom.is_finite() {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(canvas: &CharCanvas, pred: impl Fn(char) -> bool) -> usize {
        (0..canvas.rows())
            .flat_map(|y| (0..canvas.columns()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.char_at(x, y).map_or(false, &pred))
            .count()
    }

    #[test]
    fn test_size_accounts_for_cell_aspect() {
        let canvas = CharCanvas::new(80, 24);
        assert_eq!(canvas.size(), (80.0, 48.0));
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        let mut canvas = CharCanvas::new(20, 10);
        let color = Rgba::rgb(0, 255, 255);
        canvas.fill_triangle(Point2::new(0.0, 0.0), Point2::new(20.0, 0.0), Point2::new(0.0, 20.0), color);
        let filled = count(&canvas, |c| c != ' ');
        assert!(filled > 0);

        let mut reversed = CharCanvas::new(20, 10);
        reversed.fill_triangle(Point2::new(0.0, 0.0), Point2::new(0.0, 20.0), Point2::new(20.0, 0.0), color);
        assert_eq!(count(&reversed, |c| c != ' '), filled);
    }

    #[test]
    fn test_clear_blanks_cells() {
        let mut canvas = CharCanvas::new(10, 5);
        canvas.draw_text("hello", 0.0, 0.0, 10.0, Rgba::WHITE);
        assert_eq!(canvas.char_at(0, 0), Some('h'));
        let (w, h) = canvas.size();
        canvas.clear(0.0, 0.0, w, h);
        assert_eq!(count(&canvas, |c| c != ' '), 0);
    }

    #[test]
    fn test_text_is_clipped() {
        let mut canvas = CharCanvas::new(4, 2);
        canvas.draw_text("toolong", 1.0, 2.0, 10.0, Rgba::WHITE);
        assert_eq!(canvas.char_at(1, 1), Some('t'));
        assert_eq!(canvas.char_at(3, 1), Some('o'));
        canvas.draw_text("nan", f32::NAN, 0.0, 10.0, Rgba::WHITE);
        assert_eq!(canvas.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = CharCanvas::new(10, 3);
        canvas.draw_line(Point2::new(1.0, 2.0), Point2::new(8.0, 2.0), 1.0, Rgba::WHITE);
        assert_eq!(count(&canvas, |c| c == '-'), 8);
        assert_eq!(canvas.char_at(1, 1), Some('-'));
    }

    #[test]
    fn test_long_line_is_clipped() {
        let mut canvas = CharCanvas::new(80, 24);
        canvas.draw_line(Point2::new(0.0, 2.0), Point2::new(2e8, 2.0), 1.0, Rgba::WHITE);
        assert_eq!(count(&canvas, |c| c == '-'), 80);
        assert_eq!(canvas.char_at(79, 1), Some('-'));
        assert_eq!(canvas.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_off_canvas_line_draws_nothing() {
        let mut canvas = CharCanvas::new(80, 24);
        canvas.draw_line(Point2::new(-1e9, -10.0), Point2::new(1e9, -10.0), 1.0, Rgba::WHITE);
        canvas.draw_line(Point2::new(-1e9, -1e9), Point2::new(-1e8, 1e9), 1.0, Rgba::WHITE);
        assert_eq!(count(&canvas, |c| c != ' '), 0);
    }

    #[test]
    fn test_clip_segment() {
        let max = Vector2::new(10.0, 5.0);
        let (a, b) = clip_segment(Vector2::new(-10.0, 2.0), Vector2::new(20.0, 2.0), max).unwrap();
        assert!((a.x - 0.0).abs() < 1e-4 && (b.x - 10.0).abs() < 1e-4);
        assert_eq!(a.y, 2.0);
        assert!(clip_segment(Vector2::new(-5.0, 0.0), Vector2::new(-1.0, 5.0), max).is_none());
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_char(1.0, 0.0), '-');
        assert_eq!(line_char(0.0, 1.0), '|');
        assert_eq!(line_char(1.0, 1.0), '\\');
        assert_eq!(line_char(1.0, -1.0), '/');
    }

    #[test]
    fn test_shade_char_brightness() {
        assert_eq!(shade_char(&Rgba::WHITE), '@');
        assert_eq!(shade_char(&Rgba::BLACK), '.');
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut canvas = CharCanvas::new(3, 2);
        canvas.draw_text("abc", 0.0, 2.0, 10.0, Rgba::WHITE);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('a'));
        assert!(text.contains("\r\n"));
    }
}
