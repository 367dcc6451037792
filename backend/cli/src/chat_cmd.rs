//! `chat` command: interactive follow-up tutoring on a solved question.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tutorforge_core::SolverProvider;
use tutorforge_solver::{ChatSession, GREETING};

pub async fn run(provider: &dyn SolverProvider, solution: &Path, color: bool) -> Result<()> {
    let document = crate::read_document(solution).await?;
    let mut session = ChatSession::for_solution(&document);
    let renderer = crate::make_renderer(color);

    println!("{}", GREETING);
    println!("(type \"exit\" to finish)");

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }
        let reply = session.ask(provider, question).await?;
        println!("\n{}\n", renderer.render_text(&reply));
    }
    Ok(())
}
