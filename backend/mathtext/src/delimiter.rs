//! Delimiter normalization.
//!
//! The model emits math under three historical spellings: `\[ … \]` blocks,
//! `\( … \)` inlines, and double-escaped dollars (`\$\$ … \$\$`). Everything
//! is rewritten into the canonical `$ … $` / `$$ … $$` pair so the segmenter
//! only ever has to recognize dollars.

/// Rewrites legacy math delimiters into canonical dollar form.
///
/// Pure and total. Block markers are rewritten before inline ones so a `\[`
/// is never misread by the inline pass. Idempotent: normalizing already
/// canonical text is a no-op.
pub fn normalize(text: &str) -> String {
    let block = text.replace("\\[", "$$").replace("\\]", "$$");
    let inline = block.replace("\\(", "$").replace("\\)", "$");
    collapse_escaped_dollars(&inline)
}

/// Collapses double-escaping artifacts: a `\$` sitting immediately next to
/// another dollar loses its backslash, so `\$\$x\$\$` becomes `$$x$$`.
///
/// A lone `\$` with no dollar neighbor is an intentionally escaped currency
/// dollar and is preserved. `\\` is an escaped backslash and opaque, so the
/// dollar in `\\$` is a plain dollar, not an escaped one. Works on maximal
/// runs of `$` / `\$` units: a run of two or more units re-emits every unit
/// as a plain `$`.
pub(crate) fn collapse_escaped_dollars(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'\\') {
            out.push_str("\\\\");
            i += 2;
            continue;
        }
        let (units, run_end) = measure_dollar_run(bytes, i);
        if units >= 2 {
            for _ in 0..units {
                out.push('$');
            }
            i = run_end;
        } else if units == 1 {
            out.push_str(&text[i..run_end]);
            i = run_end;
        } else {
            // Ordinary text: copy through to the next possible unit start.
            // `$` and `\` are ASCII, so stopping on them never splits a
            // multi-byte character.
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != b'$' && bytes[j] != b'\\' {
                j += 1;
            }
            out.push_str(&text[i..j]);
            i = j;
        }
    }
    out
}

/// Counts consecutive `$` / `\$` units starting at `start`. Returns the unit
/// count and the byte offset just past the run.
fn measure_dollar_run(bytes: &[u8], start: usize) -> (usize, usize) {
    let mut units = 0;
    let mut end = start;
    loop {
        if end < bytes.len() && bytes[end] == b'$' {
            units += 1;
            end += 1;
        } else if end + 1 < bytes.len() && bytes[end] == b'\\' && bytes[end + 1] == b'$' {
            units += 1;
            end += 2;
        } else {
            return (units, end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_brackets_rewritten() {
        assert_eq!(normalize("\\[x^2\\]"), "$$x^2$$");
    }

    #[test]
    fn test_inline_parens_rewritten() {
        assert_eq!(normalize("\\(a+b\\)"), "$a+b$");
    }

    #[test]
    fn test_mixed_delimiters_in_prose() {
        assert_eq!(
            normalize("First \\(a\\), then \\[b = 2\\]."),
            "First $a$, then $$b = 2$$."
        );
    }

    #[test]
    fn test_double_escaped_dollars_collapse() {
        assert_eq!(normalize("\\$\\$E=mc^2\\$\\$"), "$$E=mc^2$$");
        assert_eq!(normalize("\\$$"), "$$");
        assert_eq!(normalize("$\\$"), "$$");
    }

    #[test]
    fn test_lone_escaped_dollar_preserved() {
        assert_eq!(normalize("Price \\$5 today"), "Price \\$5 today");
        assert_eq!(normalize("\\$x\\$"), "\\$x\\$");
    }

    #[test]
    fn test_escaped_backslash_is_opaque() {
        // `\\$` is an escaped backslash then a plain dollar, so the run
        // collapse leaves the pair alone.
        assert_eq!(normalize("\\\\$$x$$"), "\\\\$$x$$");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(normalize("no math here"), "no math here");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_canonical_text_is_fixed_point() {
        let canonical = "Solve $x^2$ and $$\\int x dx$$";
        assert_eq!(normalize(canonical), canonical);
    }

    #[test]
    fn test_idempotent_on_legacy_input() {
        let once = normalize("\\[x\\] and \\(y\\) and \\$\\$z\\$\\$");
        assert_eq!(normalize(&once), once);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalize_is_idempotent(s in "[a-z0-9 \\\\$\\[\\]()^]{0,48}") {
                let once = normalize(&s);
                prop_assert_eq!(normalize(&once), once);
            }

            #[test]
            fn prop_normalize_total_on_arbitrary_input(s in any::<String>()) {
                let once = normalize(&s);
                prop_assert_eq!(normalize(&once), once);
            }
        }
    }
}
