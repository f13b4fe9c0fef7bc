// Layout: static font metrics, greedy word wrap and box layout of visual trees.
// Pure CPU work; callers on the async runtime go through spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod wrap;

pub use engine::{layout_tree, PaintOp, Rect};
