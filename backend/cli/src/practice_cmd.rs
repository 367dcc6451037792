//! `practice` and `check` commands: exam generation and attempt review.

use std::path::Path;

use anyhow::{Context, Result};
use tutorforge_core::SolverProvider;
use tutorforge_solver::{check_attempt, generate_exam};

use crate::terminal::{BOLD, DIM, GREEN, RED, RESET};

pub async fn run_practice(
    provider: &dyn SolverProvider,
    solution: &Path,
    count: u32,
    color: bool,
) -> Result<()> {
    let document = crate::read_document(solution).await?;
    let exam = generate_exam(provider, &document, count).await?;
    let renderer = crate::make_renderer(color);

    if color {
        println!("{}{}{}", BOLD, exam.title, RESET);
    } else {
        println!("{}", exam.title);
    }
    for question in &exam.questions {
        println!(
            "\n{}. [{}] {}",
            question.id,
            question.difficulty,
            renderer.render_text(&question.text)
        );
    }

    if color {
        println!("\n{}Answer key{}", DIM, RESET);
    } else {
        println!("\nAnswer key");
    }
    for question in &exam.questions {
        println!("{}. {}", question.id, renderer.render_text(&question.answer));
    }
    Ok(())
}

pub async fn run_check(
    provider: &dyn SolverProvider,
    solution: &Path,
    question: u32,
    answer: &str,
    color: bool,
) -> Result<()> {
    let document = crate::read_document(solution).await?;
    let index = question.checked_sub(1).context("Question numbers start at 1")? as usize;
    let similar = document.similar_questions.get(index).with_context(|| {
        format!(
            "This solution has {} practice question(s)",
            document.similar_questions.len()
        )
    })?;

    let review = check_attempt(provider, &similar.question, &similar.answer, answer).await?;
    let renderer = crate::make_renderer(color);
    let feedback = renderer.render_text(&review.feedback);
    if review.correct {
        let mark = if color {
            format!("{}{}✓{}", BOLD, GREEN, RESET)
        } else {
            "OK:".to_string()
        };
        println!("{} {}", mark, feedback);
    } else {
        let mark = if color {
            format!("{}{}✗{}", BOLD, RED, RESET)
        } else {
            "INCORRECT:".to_string()
        };
        println!("{} {}", mark, feedback);
        if let Some(correction) = &review.correction {
            println!("{}", renderer.render_text(correction));
        }
    }
    Ok(())
}
