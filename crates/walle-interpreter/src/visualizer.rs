use crate::canvas::Canvas;
use crate::color::Color;

use std::io::{self, Write};

/// The collaborator notified of every state change and drawing command, in
/// program order. Coordinates are canvas cells; colors and brush sizes are
/// the values in effect for the command.
pub trait Visualizer {
    fn spawn(&mut self, x: i64, y: i64) -> io::Result<()>;
    fn color_changed(&mut self, color: Color) -> io::Result<()>;
    fn brush_size_changed(&mut self, size: i64) -> io::Result<()>;
    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color, size: i64)
        -> io::Result<()>;
    fn draw_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color, size: i64)
        -> io::Result<()>;
    fn draw_rectangle(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color, size: i64)
        -> io::Result<()>;
    fn fill(&mut self, x: i64, y: i64, color: Color) -> io::Result<()>;
}

/// Read access to the pixels the visualizer has produced so far. The canvas
/// query functions go through this.
pub trait CanvasRead {
    fn cell_color(&self, x: i64, y: i64) -> Color;
}

/// A visualizer that writes one line per command and rasterizes into an
/// in-memory canvas, so canvas queries observe what was drawn.
#[derive(Debug)]
pub struct TraceVisualizer<W> {
    out: W,
    canvas: Canvas,
}

impl<W: Write> TraceVisualizer<W> {
    pub fn new(out: W, canvas_size: i64) -> Self {
        Self { out, canvas: Canvas::new(canvas_size) }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for TraceVisualizer<W> {
    fn spawn(&mut self, x: i64, y: i64) -> io::Result<()> {
        writeln!(self.out, "spawn {x} {y}")
    }

    fn color_changed(&mut self, color: Color) -> io::Result<()> {
        writeln!(self.out, "color {color}")
    }

    fn brush_size_changed(&mut self, size: i64) -> io::Result<()> {
        writeln!(self.out, "size {size}")
    }

    fn draw_line(
        &mut self,
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        color: Color,
        size: i64,
    ) -> io::Result<()> {
        self.canvas.draw_line(x1, y1, x2, y2, color, size);
        writeln!(self.out, "line {x1} {y1} {x2} {y2} {color} {size}")
    }

    fn draw_circle(
        &mut self,
        cx: i64,
        cy: i64,
        radius: i64,
        color: Color,
        size: i64,
    ) -> io::Result<()> {
        self.canvas.draw_circle(cx, cy, radius, color, size);
        writeln!(self.out, "circle {cx} {cy} {radius} {color} {size}")
    }

    fn draw_rectangle(
        &mut self,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        color: Color,
        size: i64,
    ) -> io::Result<()> {
        self.canvas.draw_rectangle(x, y, width, height, color, size);
        writeln!(self.out, "rect {x} {y} {width} {height} {color} {size}")
    }

    fn fill(&mut self, x: i64, y: i64, color: Color) -> io::Result<()> {
        self.canvas.fill(x, y, color);
        writeln!(self.out, "fill {x} {y} {color}")
    }
}

impl<W: Write> CanvasRead for TraceVisualizer<W> {
    fn cell_color(&self, x: i64, y: i64) -> Color {
        self.canvas.cell_color(x, y)
    }
}
