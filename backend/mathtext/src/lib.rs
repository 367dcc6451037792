//! Math-aware text handling for model output.
//!
//! Model-emitted answer text mixes prose with LaTeX mathematics under
//! several delimiter conventions. This crate normalizes the delimiters into
//! one canonical form and splits the text into typed segments that a
//! renderer can dispatch on. Both passes are pure, linear scans; the
//! segmenter never fails, it only degrades ambiguous runs to prose.

pub mod delimiter;
pub mod segment;

pub use delimiter::normalize;
pub use segment::{segment, Segment, Segments};
