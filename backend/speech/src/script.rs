//! Builds a spoken-explanation script from a solved document.
//!
//! Formula and markdown markup is flattened to plain words so the voice
//! does not read delimiters aloud.

use tutorforge_render::{PlainFormula, PlainProse, SegmentRenderer};
use tutorforge_solution::SolutionDocument;

const EMPTY_SCRIPT: &str = "Here is the solution summary.";

/// Assembles answer, theory summary, and numbered steps into one script.
pub fn explanation_script(document: &SolutionDocument) -> String {
    let renderer = SegmentRenderer::new(Box::new(PlainFormula), Box::new(PlainProse));
    let mut parts: Vec<String> = Vec::new();

    let answer = speakable(&renderer, &document.short_answer);
    if !answer.is_empty() {
        parts.push(sentence(&format!("The answer is {}", answer)));
    }

    let summary = speakable(&renderer, &document.theory.summary);
    if !summary.is_empty() {
        parts.push(sentence(&summary));
    }

    for step in &document.step_by_step_solution {
        let mut line = format!("Step {}.", step.step_number);
        let title = speakable(&renderer, &step.title);
        if !title.is_empty() {
            line.push(' ');
            line.push_str(&sentence(&title));
        }
        let content = speakable(&renderer, &step.content);
        if !content.is_empty() {
            line.push(' ');
            line.push_str(&sentence(&content));
        }
        parts.push(line);
    }

    if parts.is_empty() {
        return EMPTY_SCRIPT.to_string();
    }
    parts.join(" ")
}

fn speakable(renderer: &SegmentRenderer, text: &str) -> String {
    normalize_whitespace(&renderer.render_text(text))
}

/// Collapses newlines and indentation left over from block rendering.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sentence(text: &str) -> String {
    let trimmed = text.trim_end();
    match trimmed.chars().last() {
        Some('.') | Some('!') | Some('?') => trimmed.to_string(),
        _ => format!("{}.", trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = r#"{
      "question_understanding": {
        "clean_question": "A 2 kg mass accelerates at $3$ metres per second squared. Find the net force.",
        "detected_subject": "Physics",
        "topic_tags": ["newton", "dynamics"]
      },
      "difficulty": {
        "level": "easy",
        "estimated_student_time_minutes": 2,
        "confidence_score": 97.0
      },
      "short_answer": "$F = 6$ N",
      "step_by_step_solution": [
        {
          "step_number": 1,
          "title": "Apply **Newton's second law**",
          "content": "With $m = 2$ and $a = 3$, $F = ma = 6$.",
          "concepts_applied": ["Newton's second law"]
        }
      ],
      "hints_only": [],
      "common_mistakes": [],
      "theory": {
        "summary": "Net force equals mass times acceleration, $F = ma$.",
        "key_formulas": []
      },
      "flashcards": [],
      "similar_questions": [],
      "teacher_notes": {
        "where_student_may_struggle": [],
        "progression_level": "beginner"
      },
      "language_used": "English"
    }"#;

    fn solved() -> SolutionDocument {
        serde_json::from_str(SOLVED).expect("fixture must parse")
    }

    #[test]
    fn test_script_reads_answer_summary_and_steps() {
        let script = explanation_script(&solved());
        assert!(script.starts_with("The answer is F = 6 N."));
        assert!(script.contains("Net force equals mass times acceleration, F = ma."));
        assert!(script.contains("Step 1. Apply Newton's second law."));
        assert!(script.contains("With m = 2 and a = 3, F = ma = 6."));
    }

    #[test]
    fn test_script_contains_no_markup() {
        let script = explanation_script(&solved());
        assert!(!script.contains('$'));
        assert!(!script.contains("**"));
        assert!(!script.contains('\n'));
    }

    #[test]
    fn test_empty_document_falls_back() {
        let mut document = solved();
        document.short_answer.clear();
        document.theory.summary.clear();
        document.step_by_step_solution.clear();
        assert_eq!(explanation_script(&document), EMPTY_SCRIPT);
    }

    #[test]
    fn test_sentence_punctuation() {
        assert_eq!(sentence("Done"), "Done.");
        assert_eq!(sentence("Done!"), "Done!");
        assert_eq!(sentence("Really?"), "Really?");
    }
}
