//! Segment rendering contract and driver.
//!
//! The segmentation layer guarantees segment correctness, not visual output.
//! Presentation goes through two injected capabilities: a formula engine for
//! math segments and a prose engine for everything else. A formula engine
//! failure never aborts a render; the segment's canonical formula text is
//! shown verbatim instead.

use anyhow::Result;
use tracing::warn;
use tutorforge_mathtext::{normalize, segment, Segment};

/// Renders canonical formula text for a display surface.
///
/// May fail. The driver treats a failure as non-fatal and substitutes the
/// formula source.
pub trait FormulaEngine: Send + Sync {
    fn render_inline(&self, formula: &str) -> Result<String>;
    fn render_block(&self, formula: &str) -> Result<String>;
}

/// Renders a prose fragment. Total: prose has no failure mode.
pub trait ProseEngine: Send + Sync {
    fn render(&self, prose: &str) -> String;
}

/// Drives normalize, segment, dispatch over a pair of engines.
pub struct SegmentRenderer {
    formula: Box<dyn FormulaEngine>,
    prose: Box<dyn ProseEngine>,
}

impl SegmentRenderer {
    pub fn new(formula: Box<dyn FormulaEngine>, prose: Box<dyn ProseEngine>) -> Self {
        Self { formula, prose }
    }

    /// Normalizes and segments `text`, renders each segment, and joins the
    /// results in document order.
    pub fn render_text(&self, text: &str) -> String {
        let normalized = normalize(text);
        segment(&normalized)
            .map(|segment| self.render_segment(&segment))
            .collect()
    }

    /// Renders one segment. A math render failure degrades to the canonical
    /// formula text.
    pub fn render_segment(&self, segment: &Segment) -> String {
        match segment {
            Segment::Prose { text } => self.prose.render(text),
            Segment::InlineMath { formula, .. } => match self.formula.render_inline(formula) {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("[Render] Inline formula render failed: {}", e);
                    formula.clone()
                }
            },
            Segment::BlockMath { formula, .. } => match self.formula.render_block(formula) {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("[Render] Block formula render failed: {}", e);
                    formula.clone()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct TagFormula;

    impl FormulaEngine for TagFormula {
        fn render_inline(&self, formula: &str) -> Result<String> {
            Ok(format!("<{}>", formula))
        }

        fn render_block(&self, formula: &str) -> Result<String> {
            Ok(format!("[[{}]]", formula))
        }
    }

    struct BrokenFormula;

    impl FormulaEngine for BrokenFormula {
        fn render_inline(&self, _formula: &str) -> Result<String> {
            bail!("inline renderer unavailable")
        }

        fn render_block(&self, _formula: &str) -> Result<String> {
            bail!("block renderer unavailable")
        }
    }

    struct EchoProse;

    impl ProseEngine for EchoProse {
        fn render(&self, prose: &str) -> String {
            prose.to_string()
        }
    }

    fn renderer(formula: impl FormulaEngine + 'static) -> SegmentRenderer {
        SegmentRenderer::new(Box::new(formula), Box::new(EchoProse))
    }

    #[test]
    fn test_dispatches_prose_and_inline_math() {
        let r = renderer(TagFormula);
        assert_eq!(r.render_text("Solve $x^2$ now"), "Solve <x^2> now");
    }

    #[test]
    fn test_block_math_uses_block_renderer() {
        let r = renderer(TagFormula);
        assert_eq!(r.render_text("$$a+b$$"), "[[a+b]]");
    }

    #[test]
    fn test_legacy_delimiters_normalized_before_render() {
        let r = renderer(TagFormula);
        assert_eq!(r.render_text("\\(x\\) and \\[y\\]"), "<x> and [[y]]");
    }

    #[test]
    fn test_formula_failure_falls_back_to_formula_text() {
        let r = renderer(BrokenFormula);
        assert_eq!(r.render_text("Solve $x^2$ now"), "Solve x^2 now");
        assert_eq!(r.render_text("$$a+b$$"), "a+b");
    }

    #[test]
    fn test_degraded_dollars_render_as_prose() {
        let r = renderer(BrokenFormula);
        assert_eq!(r.render_text("Price is $5 today"), "Price is $5 today");
    }
}
