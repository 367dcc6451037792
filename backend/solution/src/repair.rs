//! Pure string repairs applied to raw model output before parsing.

/// Escape characters JSON permits after a backslash.
const JSON_ESCAPES: &[u8] = b"\"\\/bfnrtu";

/// Strips a surrounding code fence the model sometimes wraps its JSON in.
///
/// Only the leading fence (with an optional `json` tag) and the trailing
/// fence are removed; fence markers inside the payload are content and stay
/// untouched. Returns a subslice of the input.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        s = rest.trim_start();
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Doubles every backslash that is not already followed by a JSON-legal
/// escape character.
///
/// Targets the model's most common defect: emitting `\sqrt` where JSON
/// requires `\\sqrt`. Consumes escape pairs left to right so an already
/// doubled backslash is never touched again. Note the legal set includes
/// `b`, `f`, and `t`, so control words like `\frac` slip through as JSON
/// control escapes; the repair is a bounded heuristic, not a LaTeX parser.
pub fn repair_escape_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if next.is_ascii() && JSON_ESCAPES.contains(&(next as u8)) => {
                out.push('\\');
                out.push(next);
                chars.next();
            }
            _ => out.push_str("\\\\"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fence_with_language_tag() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strips_fence_without_newlines() {
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_unfenced_input_unchanged() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_inner_fences_are_payload() {
        let raw = "```json\n{\"code\":\"```py```\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"code\":\"```py```\"}");
    }

    #[test]
    fn test_fence_only_input_becomes_empty() {
        assert_eq!(strip_code_fences("```json"), "");
    }

    #[test]
    fn test_repairs_illegal_latex_escapes() {
        assert_eq!(repair_escape_sequences("\\sqrt{2}"), "\\\\sqrt{2}");
        assert_eq!(repair_escape_sequences("\\alpha + \\Delta"), "\\\\alpha + \\\\Delta");
        assert_eq!(repair_escape_sequences("\\int_0^1"), "\\\\int_0^1");
    }

    #[test]
    fn test_legal_escapes_preserved() {
        assert_eq!(repair_escape_sequences("line\\nbreak"), "line\\nbreak");
        assert_eq!(repair_escape_sequences("say \\\"hi\\\""), "say \\\"hi\\\"");
        assert_eq!(repair_escape_sequences("\\u0041"), "\\u0041");
        // `\f` is the form-feed escape, so `\frac` is left alone.
        assert_eq!(repair_escape_sequences("\\frac{1}{2}"), "\\frac{1}{2}");
    }

    #[test]
    fn test_doubled_backslash_not_doubled_again() {
        assert_eq!(repair_escape_sequences("\\\\sqrt{2}"), "\\\\sqrt{2}");
        assert_eq!(
            repair_escape_sequences(repair_escape_sequences("\\sqrt").as_str()),
            "\\\\sqrt"
        );
    }

    #[test]
    fn test_trailing_backslash_doubled() {
        assert_eq!(repair_escape_sequences("end\\"), "end\\\\");
    }

    #[test]
    fn test_non_ascii_after_backslash_doubled() {
        assert_eq!(repair_escape_sequences("\\λ"), "\\\\λ");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(repair_escape_sequences("no escapes at all"), "no escapes at all");
        assert_eq!(repair_escape_sequences(""), "");
    }
}
