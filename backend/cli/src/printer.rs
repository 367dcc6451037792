//! Renders a solved document for the terminal.
//!
//! Every mixed math/prose field goes through the segment renderer; which
//! sections appear simply follows from which fields the mode filled in.

use tutorforge_render::{AnsiFormula, AnsiProse, PlainFormula, PlainProse, SegmentRenderer};
use tutorforge_solution::SolutionDocument;

use crate::terminal::{BOLD, DIM, RESET, UNDERLINE, YELLOW};

pub struct DocumentPrinter {
    renderer: SegmentRenderer,
    color: bool,
}

impl DocumentPrinter {
    pub fn new(color: bool) -> Self {
        let renderer = if color {
            SegmentRenderer::new(Box::new(AnsiFormula), Box::new(AnsiProse))
        } else {
            SegmentRenderer::new(Box::new(PlainFormula), Box::new(PlainProse))
        };
        Self { renderer, color }
    }

    pub fn print(&self, document: &SolutionDocument) {
        println!("{}", self.render(document));
    }

    pub fn render(&self, document: &SolutionDocument) -> String {
        let mut sections: Vec<String> = Vec::new();

        if let Some(notice) = &document.safety_and_integrity {
            if !notice.message_to_student.is_empty() {
                let message = self.renderer.render_text(&notice.message_to_student);
                sections.push(if self.color {
                    format!("{YELLOW}{message}{RESET}")
                } else {
                    message
                });
            }
        }

        sections.push(self.question_section(document));

        if !document.short_answer.is_empty() {
            sections.push(format!(
                "{}\n{}",
                self.heading("Answer"),
                self.renderer.render_text(&document.short_answer)
            ));
        }

        if !document.step_by_step_solution.is_empty() {
            sections.push(self.steps_section(document));
        }

        if !document.hints_only.is_empty() {
            let mut lines = vec![self.heading("Hints")];
            for (i, hint) in document.hints_only.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, self.renderer.render_text(hint)));
            }
            sections.push(lines.join("\n"));
        }

        if !document.common_mistakes.is_empty() {
            let mut lines = vec![self.heading("Common mistakes")];
            for mistake in &document.common_mistakes {
                lines.push(format!("- {}", self.renderer.render_text(mistake)));
            }
            sections.push(lines.join("\n"));
        }

        if let Some(theory) = self.theory_section(document) {
            sections.push(theory);
        }

        if !document.flashcards.is_empty() {
            sections.push(self.flashcards_section(document));
        }

        if !document.similar_questions.is_empty() {
            sections.push(self.similar_section(document));
        }

        if let Some(notes) = self.teacher_notes_section(document) {
            sections.push(notes);
        }

        sections.join("\n\n")
    }

    fn question_section(&self, document: &SolutionDocument) -> String {
        let understanding = &document.question_understanding;
        let mut lines = vec![self.heading("Question")];
        lines.push(self.renderer.render_text(&understanding.clean_question));
        if let Some(diagram) = &understanding.diagram_reconstruction {
            if !diagram.is_empty() {
                lines.push(self.dim(diagram));
            }
        }

        let meta = format!(
            "{} | {} | ~{:.0} min | confidence {:.0}%",
            understanding.detected_subject,
            document.difficulty.level,
            document.difficulty.estimated_student_time_minutes,
            document.difficulty.confidence_score
        );
        lines.push(self.dim(&meta));
        if !understanding.topic_tags.is_empty() {
            lines.push(self.dim(&format!("tags: {}", understanding.topic_tags.join(", "))));
        }
        if let Some(uncertainty) = &document.difficulty.uncertainty_notes {
            if !uncertainty.is_empty() {
                lines.push(self.dim(uncertainty));
            }
        }
        lines.join("\n")
    }

    fn steps_section(&self, document: &SolutionDocument) -> String {
        let mut lines = vec![self.heading("Solution")];
        for step in &document.step_by_step_solution {
            let title = self.renderer.render_text(&step.title);
            lines.push(if self.color {
                format!("{BOLD}Step {}:{RESET} {}", step.step_number, title)
            } else {
                format!("Step {}: {}", step.step_number, title)
            });
            lines.push(indent(&self.renderer.render_text(&step.content), "  "));
            if !step.concepts_applied.is_empty() {
                let concepts = format!("concepts: {}", step.concepts_applied.join(", "));
                lines.push(indent(&self.dim(&concepts), "  "));
            }
        }
        lines.join("\n")
    }

    fn theory_section(&self, document: &SolutionDocument) -> Option<String> {
        let theory = &document.theory;
        if theory.summary.is_empty()
            && theory.key_points.is_empty()
            && theory.key_formulas.is_empty()
        {
            return None;
        }

        let mut lines = vec![self.heading("Theory")];
        if !theory.summary.is_empty() {
            lines.push(self.renderer.render_text(&theory.summary));
        }
        for point in &theory.key_points {
            lines.push(format!("- {}", self.renderer.render_text(point)));
        }
        for formula in &theory.key_formulas {
            lines.push(format!(
                "{}: {}",
                formula.name,
                self.renderer.render_text(&formula.formula_latex)
            ));
            if !formula.usage.is_empty() {
                lines.push(indent(
                    &format!(
                        "{} {}",
                        self.dim("used for:"),
                        self.renderer.render_text(&formula.usage)
                    ),
                    "  ",
                ));
            }
        }

        let mut trailer = Vec::new();
        if !document.prerequisite_concepts.is_empty() {
            trailer.push(self.dim(&format!(
                "prerequisites: {}",
                document.prerequisite_concepts.join(", ")
            )));
        }
        if !document.skills_tested.is_empty() {
            trailer.push(self.dim(&format!(
                "skills tested: {}",
                document.skills_tested.join(", ")
            )));
        }
        lines.extend(trailer);

        Some(lines.join("\n"))
    }

    fn flashcards_section(&self, document: &SolutionDocument) -> String {
        let mut lines = vec![self.heading("Flashcards")];
        for card in &document.flashcards {
            let front = self.renderer.render_text(&card.front);
            lines.push(if self.color {
                format!("{BOLD}Q:{RESET} {front}")
            } else {
                format!("Q: {front}")
            });
            lines.push(format!("A: {}", self.renderer.render_text(&card.back)));
            if !card.tag.is_empty() {
                lines.push(self.dim(&format!("[{}]", card.tag)));
            }
        }
        lines.join("\n")
    }

    fn similar_section(&self, document: &SolutionDocument) -> String {
        let mut lines = vec![self.heading("Practice next")];
        for (i, question) in document.similar_questions.iter().enumerate() {
            lines.push(format!(
                "{}. [{}] {}",
                i + 1,
                question.difficulty,
                self.renderer.render_text(&question.question)
            ));
            lines.push(indent(
                &format!(
                    "{} {}",
                    self.dim("hint:"),
                    self.renderer.render_text(&question.hint)
                ),
                "   ",
            ));
            lines.push(indent(
                &format!(
                    "{} {}",
                    self.dim("answer:"),
                    self.renderer.render_text(&question.answer)
                ),
                "   ",
            ));
        }
        lines.join("\n")
    }

    fn teacher_notes_section(&self, document: &SolutionDocument) -> Option<String> {
        let notes = &document.teacher_notes;
        if notes.where_student_may_struggle.is_empty()
            && notes.recommended_followup_topics.is_empty()
        {
            return None;
        }

        let mut lines = vec![self.heading("Teacher notes")];
        for item in &notes.where_student_may_struggle {
            lines.push(format!("- {}", self.renderer.render_text(item)));
        }
        if !notes.recommended_followup_topics.is_empty() {
            lines.push(self.dim(&format!(
                "next: {}",
                notes.recommended_followup_topics.join(", ")
            )));
        }
        Some(lines.join("\n"))
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{UNDERLINE}{text}{RESET}")
        } else {
            text.to_uppercase()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
