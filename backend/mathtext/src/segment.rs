//! Math/prose segmentation.
//!
//! Splits text into an ordered sequence of prose runs, inline formulas, and
//! block formulas. The scan is a hand-written byte walker with three
//! effective states (prose, seeking an inline close, seeking a block close),
//! linear in the input. It never fails: a dollar that cannot be matched into
//! a well-formed formula stays in the surrounding prose.

use serde::{Deserialize, Serialize};

/// A classified, contiguous span of input text.
///
/// `source` is the exact substring the segment was produced from, delimiters
/// included; concatenating the sources of all segments reconstructs the
/// input byte for byte. `formula` is the delimiter-stripped, trimmed text a
/// formula engine receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Prose { text: String },
    InlineMath { formula: String, source: String },
    BlockMath { formula: String, source: String },
}

impl Segment {
    /// The exact input substring this segment covers.
    pub fn source(&self) -> &str {
        match self {
            Segment::Prose { text } => text,
            Segment::InlineMath { source, .. } => source,
            Segment::BlockMath { source, .. } => source,
        }
    }

    /// The canonical formula text, if this is a math segment.
    pub fn formula(&self) -> Option<&str> {
        match self {
            Segment::Prose { .. } => None,
            Segment::InlineMath { formula, .. } => Some(formula),
            Segment::BlockMath { formula, .. } => Some(formula),
        }
    }

    pub fn is_math(&self) -> bool {
        !matches!(self, Segment::Prose { .. })
    }
}

/// Splits `text` into prose and math segments.
///
/// The returned iterator is lazy and restartable: calling `segment` twice on
/// the same input yields two independent, equal sequences. Empty input
/// yields an empty sequence. Consecutive prose is always coalesced into one
/// segment.
pub fn segment(text: &str) -> Segments<'_> {
    Segments {
        text,
        pos: 0,
        queued: None,
    }
}

/// Iterator over the segments of one input string. Created by [`segment`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    /// Byte offset the next scan starts from; everything before it has been
    /// emitted already.
    pos: usize,
    /// Math segment found behind a pending prose run, emitted on the next
    /// call.
    queued: Option<Segment>,
}

/// A math segment located by the scan, with the byte range it covers.
struct MathSpan {
    start: usize,
    end: usize,
    segment: Segment,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(queued) = self.queued.take() {
            return Some(queued);
        }
        if self.pos >= self.text.len() {
            return None;
        }
        match self.find_math() {
            Some(span) => {
                let prose_start = self.pos;
                self.pos = span.end;
                if span.start > prose_start {
                    self.queued = Some(span.segment);
                    Some(Segment::Prose {
                        text: self.text[prose_start..span.start].to_string(),
                    })
                } else {
                    Some(span.segment)
                }
            }
            None => {
                let rest = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Segment::Prose {
                    text: rest.to_string(),
                })
            }
        }
    }
}

impl<'a> Segments<'a> {
    /// Locates the next well-formed formula at or after `self.pos`.
    ///
    /// A dollar that fails to open a formula (escaped, empty, unterminated,
    /// or line-crossing inline) is left inside the running prose span and
    /// the scan resumes one byte later.
    fn find_math(&self) -> Option<MathSpan> {
        let bytes = self.text.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            if bytes[i] != b'$' || is_escaped(bytes, i) {
                i += 1;
                continue;
            }
            if bytes.get(i + 1) == Some(&b'$') {
                if let Some(span) = classify_block(self.text, i) {
                    return Some(span);
                }
            } else if let Some(span) = classify_inline(self.text, i) {
                return Some(span);
            }
            i += 1;
        }
        None
    }
}

/// A dollar is escaped when the byte immediately before it is a backslash.
/// Backslash runs are not parity-counted.
fn is_escaped(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'\\'
}

/// `$$` opens at `start`. The first following `$$` pair closes the formula
/// (leftmost-shortest); empty or unterminated runs are rejected so the
/// dollars fall back to prose.
fn classify_block(text: &str, start: usize) -> Option<MathSpan> {
    let bytes = text.as_bytes();
    let mut k = start + 2;
    while k + 1 < bytes.len() {
        if bytes[k] == b'$' && bytes[k + 1] == b'$' {
            let formula = text[start + 2..k].trim();
            if formula.is_empty() {
                return None;
            }
            let end = k + 2;
            return Some(MathSpan {
                start,
                end,
                segment: Segment::BlockMath {
                    formula: formula.to_string(),
                    source: text[start..end].to_string(),
                },
            });
        }
        k += 1;
    }
    None
}

/// Unescaped `$` opens at `start` and is not followed by another `$`. The
/// closing `$` must be unescaped and sit before the next newline; formulas
/// that trim to nothing are rejected so a formula engine never receives an
/// empty pattern.
fn classify_inline(text: &str, start: usize) -> Option<MathSpan> {
    let bytes = text.as_bytes();
    let mut m = start + 1;
    while m < bytes.len() && bytes[m] != b'\n' {
        if bytes[m] == b'$' && !is_escaped(bytes, m) {
            let formula = text[start + 1..m].trim();
            if formula.is_empty() {
                return None;
            }
            let end = m + 1;
            return Some(MathSpan {
                start,
                end,
                segment: Segment::InlineMath {
                    formula: formula.to_string(),
                    source: text[start..end].to_string(),
                },
            });
        }
        m += 1;
    }
    None
}
