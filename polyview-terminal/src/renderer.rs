/// ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use polyview_core::Frame;
use std::io::Write;

/// Virtual pixels covered by one terminal cell horizontally
pub const CELL_WIDTH: u32 = 8;
/// Virtual pixels covered by one terminal cell vertically
pub const CELL_HEIGHT: u32 = 16;

const VERTEX_CHAR: char = 'o';

/// Draws projected frames into a character grid
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    /// Size of the virtual drawing surface the camera should project onto
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.width as u32 * CELL_WIDTH,
            self.height as u32 * CELL_HEIGHT,
        )
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Stroke every face outline in storage order, then mark the vertices.
    ///
    /// Later strokes overwrite earlier ones; there is no depth test.
    pub fn render_frame(&mut self, frame: &Frame<'_>) {
        for (a, b) in frame.segments() {
            self.draw_line(to_cell(a), to_cell(b));
        }
        for p in &frame.points {
            let (x, y) = to_cell(*p);
            self.plot(x.round(), y.round(), VERTEX_CHAR);
        }
    }

    fn draw_line(&mut self, a: (f64, f64), b: (f64, f64)) {
        let Some((a, b)) = clip_line(a, b, self.width as f64, self.height as f64) else {
            return;
        };
        let glyph = line_glyph(b.0 - a.0, b.1 - a.1);

        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0 as f64, y0 as f64, glyph);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: f64, y: f64, c: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.char_buffer[y * self.width + x] = c;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    VERTEX_CHAR => Color::Red,
                    _ => Color::Grey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_cell(p: Point2<f64>) -> (f64, f64) {
    (p.x / CELL_WIDTH as f64, p.y / CELL_HEIGHT as f64)
}

/// Pick a character that follows the direction of a segment in cell space
fn line_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay < ax * 0.4 {
        '-'
    } else if ax < ay * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of segment `a`-`b` to `[0, width) × [0, height)`
fn clip_line(
    a: (f64, f64),
    b: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let max_x = width - 1.0;
    let max_y = height - 1.0;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, a.0),
        (dx, max_x - a.0),
        (-dy, a.1),
        (dy, max_y - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}
