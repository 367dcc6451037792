//! `solve` command: submit a question image and print the worked solution.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tutorforge_core::{SolveRequest, SolverMode, SolverProvider};
use tutorforge_progress::{record_solution, JsonFileStore, StatsStore};
use tutorforge_solution::{decode, SolutionDocument};
use tutorforge_solver::load_image;

use crate::printer::DocumentPrinter;
use crate::terminal;

pub struct SolveArgs {
    pub image: PathBuf,
    pub mode: SolverMode,
    pub language: String,
    pub instruction: Option<String>,
    pub raw: bool,
}

pub async fn run(
    provider: &dyn SolverProvider,
    args: SolveArgs,
    color: bool,
    stats_path: PathBuf,
) -> Result<()> {
    let (mime_type, image_base64) = load_image(&args.image)?;
    let request = SolveRequest {
        mime_type,
        image_base64,
        mode: args.mode,
        user_language: args.language,
        instruction: args.instruction,
    };

    let response = provider.solve(&request).await?;
    if args.raw {
        println!("{}", response);
        return Ok(());
    }

    let document = decode(&response)?;
    DocumentPrinter::new(color).print(&document);

    // The solution is already on screen; stats trouble is not worth failing
    // the command over.
    if let Err(error) = record_progress(&document, stats_path).await {
        terminal::note_warn(&format!("Could not update progress: {:#}", error));
    }
    Ok(())
}

async fn record_progress(document: &SolutionDocument, stats_path: PathBuf) -> Result<()> {
    let store = JsonFileStore::new(stats_path);
    let mut stats = store.load().await?;
    let unlocked = record_solution(
        &mut stats,
        &document.question_understanding.detected_subject,
        document.difficulty.level,
        Local::now().date_naive(),
    );
    store.save(&stats).await?;
    for achievement in unlocked {
        terminal::note_success(&format!("Achievement unlocked: {}", achievement));
    }
    Ok(())
}
