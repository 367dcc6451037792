mod chat_cmd;
mod config_cmd;
mod decode_cmd;
mod practice_cmd;
mod printer;
mod progress_cmd;
mod segment_cmd;
mod solve_cmd;
mod speak_cmd;
mod terminal;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tutorforge_config::{config_dir, config_file_path, load_config, TutorConfig};
use tutorforge_core::SolverMode;
use tutorforge_logging::{init_logger, redact_sensitive};
use tutorforge_render::{AnsiFormula, AnsiProse, PlainFormula, PlainProse, SegmentRenderer};
use tutorforge_solution::{decode, SolutionDocument};
use tutorforge_solver::GeminiSolver;
use tutorforge_speech::GeminiSpeech;

use config_cmd::ConfigCommands;
use solve_cmd::SolveArgs;

#[derive(Parser)]
#[command(name = "tutorforge")]
#[command(about = "TutorForge — AI homework tutor in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a photographed question
    Solve {
        /// Path to the question image
        image: PathBuf,
        /// Solver mode: learning, exam, hint, or revision
        #[arg(short, long)]
        mode: Option<String>,
        /// Language the explanation should be written in
        #[arg(short, long)]
        language: Option<String>,
        /// Extra instruction passed to the solver
        #[arg(short, long)]
        instruction: Option<String>,
        /// Print the raw model response instead of the rendered solution
        #[arg(long)]
        raw: bool,
    },
    /// Decode a raw model response into a validated solution document
    Decode {
        /// File holding the raw response (stdin when omitted)
        file: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Split text into prose and math segments
    Segment {
        /// Text to segment (stdin when neither this nor --file is given)
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Emit segments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask follow-up questions about a solved problem
    Chat {
        /// Path to a saved solution document
        #[arg(short, long)]
        solution: PathBuf,
    },
    /// Generate a practice exam from a solved problem
    Practice {
        /// Path to a saved solution document
        #[arg(short, long)]
        solution: PathBuf,
        /// Number of questions to generate
        #[arg(short, long, default_value_t = 3)]
        count: u32,
    },
    /// Review an attempt at one of the solution's practice questions
    Check {
        /// Path to a saved solution document
        #[arg(short, long)]
        solution: PathBuf,
        /// Practice question number, starting at 1
        #[arg(short, long)]
        question: u32,
        /// The student's attempt
        #[arg(short, long)]
        answer: String,
    },
    /// Narrate a solution to a WAV file
    Speak {
        /// Path to a saved solution document
        #[arg(short, long)]
        solution: PathBuf,
        /// Output WAV path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Show study stats
    Progress {
        /// Reset all stats to zero
        #[arg(long)]
        reset: bool,
    },
    /// Inspect or edit the configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        terminal::note_error(&redact_sensitive(&format!("{:#}", error)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dir = config_dir();
    let config_path = config_file_path(&dir);

    match cli.command {
        // Handled before config resolution so an unset ${VAR} reference
        // cannot lock the user out of editing the file that contains it.
        Commands::Config { cmd } => config_cmd::run(cmd, &config_path).await,
        Commands::Decode { file, pretty } => decode_cmd::run(file, pretty).await,
        Commands::Segment { text, file, json } => {
            segment_cmd::run(text, file, json, terminal::supports_color()).await
        }
        Commands::Progress { reset } => progress_cmd::run(dir.join("stats.json"), reset).await,
        Commands::Solve {
            image,
            mode,
            language,
            instruction,
            raw,
        } => {
            let app = prepare(&dir, &config_path).await?;
            let provider = build_solver(&app.config)?;
            let args = SolveArgs {
                image,
                mode: resolve_mode(mode, &app.config)?,
                language: resolve_language(language, &app.config),
                instruction,
                raw,
            };
            solve_cmd::run(&provider, args, app.color, app.stats_path).await
        }
        Commands::Chat { solution } => {
            let app = prepare(&dir, &config_path).await?;
            let provider = build_solver(&app.config)?;
            chat_cmd::run(&provider, &solution, app.color).await
        }
        Commands::Practice { solution, count } => {
            let app = prepare(&dir, &config_path).await?;
            let provider = build_solver(&app.config)?;
            practice_cmd::run_practice(&provider, &solution, count, app.color).await
        }
        Commands::Check {
            solution,
            question,
            answer,
        } => {
            let app = prepare(&dir, &config_path).await?;
            let provider = build_solver(&app.config)?;
            practice_cmd::run_check(&provider, &solution, question, &answer, app.color).await
        }
        Commands::Speak { solution, out } => {
            let app = prepare(&dir, &config_path).await?;
            let provider = build_speech(&app.config)?;
            speak_cmd::run(&provider, &solution, &out).await
        }
    }
}

/// Resolved runtime state shared by the commands that talk to providers.
struct App {
    config: TutorConfig,
    color: bool,
    stats_path: PathBuf,
}

async fn prepare(dir: &Path, config_path: &Path) -> Result<App> {
    let config = load_config(config_path).await?;

    let logging = config.logging.clone().unwrap_or_default();
    let level = logging.level.as_deref().unwrap_or("info").to_string();
    let log_dir = logging
        .dir
        .map(PathBuf::from)
        .unwrap_or_else(|| dir.join("logs"));
    init_logger(&log_dir, &level);

    let color = config
        .render
        .as_ref()
        .and_then(|render| render.color)
        .unwrap_or_else(terminal::supports_color);

    Ok(App {
        color,
        stats_path: dir.join("stats.json"),
        config,
    })
}

fn build_solver(config: &TutorConfig) -> Result<GeminiSolver> {
    let api = config.api.clone().unwrap_or_default();
    let api_key = resolve_api_key(api.gemini_api_key)?;
    let mut solver = GeminiSolver::new(api_key);
    if let Some(model) = api.model {
        solver = solver.with_model(model);
    }
    if let Some(base_url) = api.base_url {
        solver = solver.with_base_url(base_url);
    }
    Ok(solver)
}

fn build_speech(config: &TutorConfig) -> Result<GeminiSpeech> {
    let api = config.api.clone().unwrap_or_default();
    let api_key = resolve_api_key(api.gemini_api_key)?;
    let mut speech = GeminiSpeech::new(api_key);
    if let Some(model) = api.speech_model {
        speech = speech.with_model(model);
    }
    if let Some(voice) = api.speech_voice {
        speech = speech.with_voice(voice);
    }
    if let Some(base_url) = api.base_url {
        speech = speech.with_base_url(base_url);
    }
    Ok(speech)
}

fn resolve_api_key(configured: Option<String>) -> Result<String> {
    configured
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .context(
            "No Gemini API key: set api.geminiApiKey in the config or GEMINI_API_KEY in the environment",
        )
}

fn resolve_mode(flag: Option<String>, config: &TutorConfig) -> Result<SolverMode> {
    let name = flag.or_else(|| {
        config
            .defaults
            .as_ref()
            .and_then(|defaults| defaults.mode.clone())
    });
    match name {
        Some(name) => name.parse::<SolverMode>().map_err(anyhow::Error::msg),
        None => Ok(SolverMode::default()),
    }
}

fn resolve_language(flag: Option<String>, config: &TutorConfig) -> String {
    flag.or_else(|| {
        config
            .defaults
            .as_ref()
            .and_then(|defaults| defaults.language.clone())
    })
    .unwrap_or_else(|| "English".to_string())
}

pub(crate) fn make_renderer(color: bool) -> SegmentRenderer {
    if color {
        SegmentRenderer::new(Box::new(AnsiFormula), Box::new(AnsiProse))
    } else {
        SegmentRenderer::new(Box::new(PlainFormula), Box::new(PlainProse))
    }
}

pub(crate) async fn read_document(path: &Path) -> Result<SolutionDocument> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read solution file: {}", path.display()))?;
    Ok(decode(&raw)?)
}
