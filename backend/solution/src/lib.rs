//! Solution document schema and the resilient decoder.
//!
//! The model is asked for pure JSON but routinely wraps it in code fences,
//! under-escapes LaTeX backslashes, or truncates. Decoding here is a bounded
//! two-stage pipeline: strict parse, then on syntax failure one escape-repair
//! pass and a single retry. Nothing partial ever escapes this crate: the
//! caller gets a fully validated [`schema::SolutionDocument`] or a
//! [`decode::DecodeError`].

pub mod decode;
pub mod repair;
pub mod schema;

pub use decode::{decode, decode_lenient, DecodeError};
pub use repair::{repair_escape_sequences, strip_code_fences};
pub use schema::{
    DifficultyAssessment, Flashcard, IntegrityNotice, KeyFormula, QuestionUnderstanding,
    SimilarQuestion, SolutionDocument, SolutionStep, TeacherNotes, TheorySection,
};
