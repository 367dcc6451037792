//! The solution document the model is contracted to return.
//!
//! Field names match the JSON schema pinned in the solver prompt. Fields the
//! model sometimes omits on terse modes carry `#[serde(default)]`; everything
//! else is required, so a missing field fails the decode instead of leaking a
//! half-populated document. Unknown extra keys are ignored.

use serde::{Deserialize, Serialize};
use tutorforge_core::DifficultyLevel;

/// A fully validated answer to one submitted question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionDocument {
    pub question_understanding: QuestionUnderstanding,
    pub difficulty: DifficultyAssessment,
    pub short_answer: String,
    pub step_by_step_solution: Vec<SolutionStep>,
    pub hints_only: Vec<String>,
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub prerequisite_concepts: Vec<String>,
    #[serde(default)]
    pub skills_tested: Vec<String>,
    pub theory: TheorySection,
    pub flashcards: Vec<Flashcard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_latex: Option<String>,
    pub similar_questions: Vec<SimilarQuestion>,
    pub teacher_notes: TeacherNotes,
    pub language_used: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_and_integrity: Option<IntegrityNotice>,
}

/// What the model read off the submitted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionUnderstanding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ocr_text: Option<String>,
    pub clean_question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_reconstruction: Option<String>,
    pub detected_subject: String,
    pub topic_tags: Vec<String>,
}

/// The model's difficulty estimate for the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAssessment {
    pub level: DifficultyLevel,
    pub estimated_student_time_minutes: f64,
    /// 0–100 self-reported confidence.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_notes: Option<String>,
}

/// One worked step. `content` mixes prose with math delimiters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step_number: u32,
    pub title: String,
    pub content: String,
    pub concepts_applied: Vec<String>,
}

/// Background theory attached to the solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheorySection {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub key_formulas: Vec<KeyFormula>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFormula {
    pub name: String,
    pub formula_latex: String,
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub tag: String,
}

/// A related question for further practice. `difficulty` is the model's
/// free-form wording ("slightly harder"), not the structured level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarQuestion {
    pub difficulty: String,
    pub question: String,
    pub hint: String,
    pub answer: String,
}

/// Guidance aimed at a human tutor reviewing the solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherNotes {
    pub where_student_may_struggle: Vec<String>,
    #[serde(default)]
    pub recommended_followup_topics: Vec<String>,
    pub progression_level: String,
}

/// Academic-integrity note the model attaches when the image looks like
/// graded homework. `mode_used` echoes the solver mode as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityNotice {
    pub is_homework_like: bool,
    pub mode_used: String,
    pub message_to_student: String,
}

/// Fully populated fixture shared by decoder tests.
#[cfg(test)]
pub(crate) fn sample_document() -> SolutionDocument {
    SolutionDocument {
        question_understanding: QuestionUnderstanding {
            raw_ocr_text: Some("Solve x^2 = 2".to_string()),
            clean_question: "Solve $x^2 = 2$ for $x$.".to_string(),
            diagram_reconstruction: None,
            detected_subject: "Mathematics".to_string(),
            topic_tags: vec!["algebra".to_string(), "roots".to_string()],
        },
        difficulty: DifficultyAssessment {
            level: DifficultyLevel::Easy,
            estimated_student_time_minutes: 4.0,
            confidence_score: 92.0,
            uncertainty_notes: None,
        },
        short_answer: "$x = \\pm\\sqrt{2}$".to_string(),
        step_by_step_solution: vec![SolutionStep {
            step_number: 1,
            title: "Take the square root".to_string(),
            content: "Apply the root to both sides: $x = \\pm\\sqrt{2}$.".to_string(),
            concepts_applied: vec!["square roots".to_string()],
        }],
        hints_only: vec!["What operation undoes squaring?".to_string()],
        common_mistakes: vec!["Forgetting the negative root.".to_string()],
        prerequisite_concepts: vec![],
        skills_tested: vec!["root extraction".to_string()],
        theory: TheorySection {
            summary: "A quadratic $x^2 = a$ has two real roots when $a > 0$.".to_string(),
            key_points: vec!["Squaring loses sign information.".to_string()],
            key_formulas: vec![KeyFormula {
                name: "Square root property".to_string(),
                formula_latex: "x = \\pm\\sqrt{a}".to_string(),
                usage: "Isolate x squared first.".to_string(),
            }],
        },
        flashcards: vec![Flashcard {
            front: "Roots of $x^2 = a$, $a > 0$?".to_string(),
            back: "$x = \\pm\\sqrt{a}$".to_string(),
            tag: "algebra".to_string(),
        }],
        solution_latex: None,
        similar_questions: vec![SimilarQuestion {
            difficulty: "same".to_string(),
            question: "Solve $x^2 = 9$.".to_string(),
            hint: "Same property.".to_string(),
            answer: "$x = \\pm 3$".to_string(),
        }],
        teacher_notes: TeacherNotes {
            where_student_may_struggle: vec!["Sign handling".to_string()],
            recommended_followup_topics: vec!["quadratic formula".to_string()],
            progression_level: "on track".to_string(),
        },
        language_used: "English".to_string(),
        safety_and_integrity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_roundtrip() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: SolutionDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_optional_fields_default() {
        let doc = sample_document();
        let mut value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("prerequisite_concepts");
        obj.remove("skills_tested");
        let back: SolutionDocument = serde_json::from_value(value).unwrap();
        assert!(back.prerequisite_concepts.is_empty());
        assert!(back.skills_tested.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let doc = sample_document();
        let mut value = serde_json::to_value(&doc).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .insert("novel_field".to_string(), serde_json::json!("ignored"));
        assert!(serde_json::from_value::<SolutionDocument>(value).is_ok());
    }

    #[test]
    fn test_integrity_notice_roundtrip() {
        let notice = IntegrityNotice {
            is_homework_like: true,
            mode_used: "hint".to_string(),
            message_to_student: "Try it yourself first.".to_string(),
        };
        let json = serde_json::to_string(&notice).unwrap();
        let back: IntegrityNotice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notice);
    }
}
