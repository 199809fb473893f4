pub mod canvas;
pub mod color;
pub mod interpreter;
pub mod value;
pub mod visualizer;

use crate::interpreter::Interpreter;
use crate::visualizer::{CanvasRead, Visualizer};

use walle_common::error::Result;

pub const DEFAULT_CANVAS_SIZE: i64 = 100;

/// Parses and executes a script against the given visualizer.
pub fn run<V>(source: &str, canvas_size: i64, visualizer: &mut V) -> Result<()>
where
    V: Visualizer + CanvasRead,
{
    let program = walle_syntax::parse(source)?;
    Interpreter::new(canvas_size, visualizer).run(&program)
}
