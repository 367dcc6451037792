//! Terminal formula engines.
//!
//! No LaTeX layout is attempted. Inline formulas are tinted so they stand
//! out from prose; block formulas are set off on their own indented lines.

use anyhow::Result;

use crate::engine::FormulaEngine;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";

/// Colored formula text for ANSI terminals.
pub struct AnsiFormula;

impl FormulaEngine for AnsiFormula {
    fn render_inline(&self, formula: &str) -> Result<String> {
        Ok(format!("{}{}{}", CYAN, formula, RESET))
    }

    fn render_block(&self, formula: &str) -> Result<String> {
        let mut out = String::from("\n");
        for line in formula.lines() {
            out.push_str("    ");
            out.push_str(BOLD);
            out.push_str(CYAN);
            out.push_str(line);
            out.push_str(RESET);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Unstyled formula text for plain surfaces.
pub struct PlainFormula;

impl FormulaEngine for PlainFormula {
    fn render_inline(&self, formula: &str) -> Result<String> {
        Ok(formula.to_string())
    }

    fn render_block(&self, formula: &str) -> Result<String> {
        let mut out = String::from("\n");
        for line in formula.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}
