//! Segment rendering: the engine contract, the driver, and terminal engines.

pub mod ansi;
pub mod engine;
pub mod prose;

pub use ansi::{AnsiFormula, PlainFormula};
pub use engine::{FormulaEngine, ProseEngine, SegmentRenderer};
pub use prose::{AnsiProse, PlainProse};
