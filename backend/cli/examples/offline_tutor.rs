use anyhow::Result;
use chrono::Local;
use tracing::{info, Level};

use tutorforge_core::{SolveRequest, SolverMode, SolverProvider};
use tutorforge_progress::{record_solution, InMemoryStatsStore, StatsStore};
use tutorforge_render::{AnsiFormula, AnsiProse, SegmentRenderer};
use tutorforge_solution::decode;
use tutorforge_solver::{ChatSession, MockSolver};

/// The kind of reply the live model actually produces: wrapped in a code
/// fence, with the LaTeX backslashes escaped once instead of twice. The
/// decoder strips the fence and repairs the escapes.
const CANNED_REPLY: &str = r#"```json
{
  "question_understanding": {
    "clean_question": "Solve $x^2 = 9$.",
    "detected_subject": "Algebra",
    "topic_tags": ["quadratics", "roots"]
  },
  "difficulty": {
    "level": "easy",
    "estimated_student_time_minutes": 3,
    "confidence_score": 97.0
  },
  "short_answer": "$x = \pm 3$",
  "step_by_step_solution": [
    {
      "step_number": 1,
      "title": "Take the square root",
      "content": "Apply the root to both sides: $x = \pm\sqrt{9} = \pm 3$.",
      "concepts_applied": ["square roots"]
    }
  ],
  "hints_only": [],
  "common_mistakes": ["Dropping the negative root"],
  "theory": {
    "summary": "An equation $x^2 = a$ with $a > 0$ has two real roots.",
    "key_formulas": [
      {
        "name": "Square root property",
        "formula_latex": "$x = \pm\sqrt{a}$",
        "usage": "Isolate the squared term first"
      }
    ]
  },
  "flashcards": [
    { "front": "Roots of $x^2 = 9$?", "back": "$\pm 3$", "tag": "algebra" }
  ],
  "similar_questions": [
    {
      "difficulty": "same",
      "question": "Solve $x^2 = 25$.",
      "hint": "Same property.",
      "answer": "$x = \pm 5$"
    }
  ],
  "teacher_notes": {
    "where_student_may_struggle": ["Sign handling"],
    "progression_level": "beginner"
  },
  "language_used": "English"
}
```"#;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    info!("Starting offline tutor demo");

    // 2. Canned providers, no API key needed
    let solver = MockSolver::new().with_response(CANNED_REPLY);
    let tutor = MockSolver::new()
        .with_response("Good question! What does squaring do to the sign of $-3$?");

    // 3. Submit a stand-in capture and decode the reply
    let request = SolveRequest {
        mime_type: "image/png".to_string(),
        image_base64: "aW1hZ2UgYnl0ZXM=".to_string(),
        mode: SolverMode::Learning,
        user_language: "English".to_string(),
        instruction: None,
    };
    let raw = solver.solve(&request).await?;
    let document = decode(&raw)?;
    info!("Decoded: {}", document.question_understanding.clean_question);

    // 4. Render the answer for the terminal
    let renderer = SegmentRenderer::new(Box::new(AnsiFormula), Box::new(AnsiProse));
    println!("\nAnswer: {}", renderer.render_text(&document.short_answer));
    for step in &document.step_by_step_solution {
        println!(
            "  {}. {}: {}",
            step.step_number,
            step.title,
            renderer.render_text(&step.content)
        );
    }

    // 5. Record the solve
    let store = InMemoryStatsStore::new();
    let mut stats = store.load().await?;
    let unlocked = record_solution(
        &mut stats,
        &document.question_understanding.detected_subject,
        document.difficulty.level,
        Local::now().date_naive(),
    );
    store.save(&stats).await?;
    for achievement in &unlocked {
        info!("Achievement unlocked: {}", achievement);
    }

    // 6. One follow-up turn
    let mut session = ChatSession::for_solution(&document);
    let reply = session.ask(&tutor, "Why are there two answers?").await?;
    println!("\nTutor: {}", renderer.render_text(&reply));

    // 7. Verify the run was kept
    let stats = store.load().await?;
    info!(
        "Stats: {} XP, streak {}, {} solved",
        stats.xp, stats.streak.current, stats.total_solved
    );

    Ok(())
}
