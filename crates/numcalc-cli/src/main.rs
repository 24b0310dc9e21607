use anyhow::Result;
use clap::Parser;
use numcalc_core::{Catalog, Settings};

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "numcalc")]
#[command(about = "NumCalc Master - numerical analysis exam prep with an AI tutor")]
#[command(version)]
struct Cli {
    /// Chapter to open (e.g. "errors"); see --list
    #[arg(short, long)]
    chapter: Option<String>,

    /// Ask a single question and exit
    #[arg(short, long, requires = "chapter")]
    question: Option<String>,

    /// List all course chapters
    #[arg(long)]
    list: bool,

    /// List chapters with saved conversations
    #[arg(long)]
    history: bool,

    /// Export a chapter's transcript to a markdown file
    #[arg(long, value_name = "CHAPTER")]
    export: Option<String>,

    /// Delete a chapter's saved conversation
    #[arg(long, value_name = "CHAPTER")]
    clear: Option<String>,

    /// Override the tutoring model
    #[arg(short, long)]
    model: Option<String>,

    /// Write the current settings to the config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }

    if cli.init_config {
        settings.save()?;
        println!("Wrote {}", Settings::config_path().display());
        return Ok(());
    }

    let catalog = Catalog::builtin();

    if cli.list {
        app::print_chapter_list(&catalog);
        return Ok(());
    }
    if cli.history {
        return app::print_history(&settings, &catalog);
    }
    if let Some(ref chapter_id) = cli.export {
        return app::export_chapter(&settings, &catalog, chapter_id);
    }
    if let Some(ref chapter_id) = cli.clear {
        return app::clear_chapter(&settings, &catalog, chapter_id);
    }

    if let (Some(question), Some(chapter_id)) = (cli.question.as_deref(), cli.chapter.as_deref()) {
        return app::run_one_shot(&settings, &catalog, chapter_id, question).await;
    }

    app::run_repl(&settings, &catalog, cli.chapter).await
}
