use crate::color::Color;
use crate::visualizer::CanvasRead;

/// A square grid of cells, indexed by `(x, y)` with the origin at the top
/// left. All drawing clips against the edges; painting with `Transparent`
/// leaves cells untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Canvas {
    size: i64,
    cells: Vec<Color>,
}

impl Canvas {
    pub fn new(size: i64) -> Self {
        debug_assert!(size > 0);
        Self { size, cells: vec![Color::Transparent; (size * size) as usize] }
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    fn index(&self, x: i64, y: i64) -> usize {
        (y * self.size + x) as usize
    }

    /// Paints the brush footprint centered on `(x, y)`. The brush is an odd
    /// `size` by `size` square.
    fn paint(&mut self, x: i64, y: i64, color: Color, size: i64) {
        if color == Color::Transparent {
            return;
        }
        let reach = size / 2;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (px, py) = (x + dx, y + dy);
                if self.in_bounds(px, py) {
                    let index = self.index(px, py);
                    self.cells[index] = color;
                }
            }
        }
    }

    /// Draws a straight line between two points that lie on a common axis or
    /// diagonal, stamping the brush at every cell from start to end
    /// inclusive.
    pub fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color, size: i64) {
        let steps = (x2 - x1).abs().max((y2 - y1).abs());
        let dx = (x2 - x1).signum();
        let dy = (y2 - y1).signum();
        for step in 0..=steps {
            self.paint(x1 + dx * step, y1 + dy * step, color, size);
        }
    }

    /// Midpoint circle outline around `(cx, cy)`.
    pub fn draw_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color, size: i64) {
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;
        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                self.paint(px, py, color, size);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Rectangle outline with its top-left corner at `(x, y)`.
    pub fn draw_rectangle(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color, size: i64) {
        for px in x..x + width {
            self.paint(px, y, color, size);
            self.paint(px, y + height - 1, color, size);
        }
        for py in y..y + height {
            self.paint(x, py, color, size);
            self.paint(x + width - 1, py, color, size);
        }
    }

    /// Flood-fills the 4-connected region of cells sharing the color under
    /// `(x, y)`.
    pub fn fill(&mut self, x: i64, y: i64, color: Color) {
        if !self.in_bounds(x, y) || color == Color::Transparent {
            return;
        }
        let target = self.cells[self.index(x, y)];
        if target == color {
            return;
        }
        let mut pending = vec![(x, y)];
        while let Some((px, py)) = pending.pop() {
            if !self.in_bounds(px, py) {
                continue;
            }
            let index = self.index(px, py);
            if self.cells[index] != target {
                continue;
            }
            self.cells[index] = color;
            pending.extend([(px + 1, py), (px - 1, py), (px, py + 1), (px, py - 1)]);
        }
    }
}

impl CanvasRead for Canvas {
    /// Reads outside the grid are `Transparent`.
    fn cell_color(&self, x: i64, y: i64) -> Color {
        if self.in_bounds(x, y) {
            self.cells[self.index(x, y)]
        } else {
            Color::Transparent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn count(canvas: &Canvas, color: Color) -> usize {
        let mut count = 0;
        for y in 0..canvas.size() {
            for x in 0..canvas.size() {
                if canvas.cell_color(x, y) == color {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn horizontal_line_paints_inclusive_endpoints() {
        let mut canvas = Canvas::new(10);
        canvas.draw_line(2, 5, 6, 5, Color::Red, 1);
        assert_eq!(5, count(&canvas, Color::Red));
        assert_eq!(Color::Red, canvas.cell_color(2, 5));
        assert_eq!(Color::Red, canvas.cell_color(6, 5));
        assert_eq!(Color::Transparent, canvas.cell_color(7, 5));
    }

    #[test]
    fn diagonal_line_paints_one_cell_per_step() {
        let mut canvas = Canvas::new(10);
        canvas.draw_line(0, 0, 4, 4, Color::Blue, 1);
        assert_eq!(5, count(&canvas, Color::Blue));
        assert_eq!(Color::Blue, canvas.cell_color(3, 3));
    }

    #[test]
    fn brush_thickens_the_stroke() {
        let mut canvas = Canvas::new(10);
        canvas.draw_line(2, 5, 6, 5, Color::Red, 3);
        // A 3-wide brush covers three rows and spills one cell past each end.
        assert_eq!(7 * 3, count(&canvas, Color::Red));
        assert_eq!(Color::Red, canvas.cell_color(2, 4));
        assert_eq!(Color::Red, canvas.cell_color(7, 6));
    }

    #[test]
    fn transparent_brush_paints_nothing() {
        let mut canvas = Canvas::new(10);
        canvas.draw_line(0, 0, 5, 0, Color::Transparent, 1);
        assert_eq!(0, count(&canvas, Color::Red));
        assert_eq!(Color::Transparent, canvas.cell_color(0, 0));
    }

    #[test]
    fn drawing_clips_at_the_edges() {
        let mut canvas = Canvas::new(5);
        canvas.draw_rectangle(0, 0, 5, 5, Color::Black, 3);
        // Nothing panics and the interior stays clear of the 3-wide border.
        assert_eq!(Color::Transparent, canvas.cell_color(2, 2));
    }

    #[test]
    fn rectangle_outline_leaves_interior_untouched() {
        let mut canvas = Canvas::new(10);
        canvas.draw_rectangle(1, 1, 5, 4, Color::Green, 1);
        // Perimeter of a 5x4 outline is 2 * (5 + 4) - 4 cells.
        assert_eq!(14, count(&canvas, Color::Green));
        assert_eq!(Color::Transparent, canvas.cell_color(2, 2));
        assert_eq!(Color::Green, canvas.cell_color(5, 4));
    }

    #[test]
    fn circle_outline_hits_the_axis_extremes() {
        let mut canvas = Canvas::new(21);
        canvas.draw_circle(10, 10, 5, Color::Purple, 1);
        assert_eq!(Color::Purple, canvas.cell_color(15, 10));
        assert_eq!(Color::Purple, canvas.cell_color(5, 10));
        assert_eq!(Color::Purple, canvas.cell_color(10, 15));
        assert_eq!(Color::Purple, canvas.cell_color(10, 5));
        assert_eq!(Color::Transparent, canvas.cell_color(10, 10));
    }

    #[test]
    fn fill_floods_the_enclosed_region() {
        let mut canvas = Canvas::new(10);
        canvas.draw_rectangle(0, 0, 10, 10, Color::Black, 1);
        canvas.fill(5, 5, Color::Yellow);
        assert_eq!(Color::Yellow, canvas.cell_color(5, 5));
        assert_eq!(Color::Yellow, canvas.cell_color(1, 1));
        assert_eq!(Color::Black, canvas.cell_color(0, 0));
        assert_eq!(8 * 8, count(&canvas, Color::Yellow));
    }

    #[test]
    fn fill_does_not_cross_a_border() {
        let mut canvas = Canvas::new(10);
        canvas.draw_line(0, 5, 9, 5, Color::Black, 1);
        canvas.fill(0, 0, Color::Red);
        assert_eq!(Color::Red, canvas.cell_color(9, 4));
        assert_eq!(Color::Transparent, canvas.cell_color(0, 6));
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let canvas = Canvas::new(5);
        assert_eq!(Color::Transparent, canvas.cell_color(-1, 0));
        assert_eq!(Color::Transparent, canvas.cell_color(0, 5));
    }
}
