use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, Utc};
use crossterm::style::Stylize;
use numcalc_core::{Catalog, ChatSession, Chapter, Reply, Settings};

use crate::commands::{handle_command, CommandResult};
use crate::render;

fn format_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Read one line from stdin after printing a prompt. `None` on EOF.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn confirm(question: &str) -> io::Result<bool> {
    match read_line(&format!("{question} [y/N] "))? {
        Some(answer) => Ok(answer.trim().eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

pub fn print_chapter_list(catalog: &Catalog) {
    println!("{}", "Course chapters".bold());
    for chapter in catalog.chapters() {
        println!(
            "  {} {}",
            format!("{:<16}", chapter.id).dark_cyan(),
            chapter.title
        );
    }
    println!("\nOpen one with: numcalc --chapter <id>");
}

pub fn print_history(settings: &Settings, catalog: &Catalog) -> Result<()> {
    let store = settings.build_store()?;
    let summaries = store.summarize(catalog);

    if summaries.is_empty() {
        println!("No saved conversations yet. Open a chapter and ask something!");
        return Ok(());
    }

    println!("{}", "Saved conversations".bold());
    for summary in summaries {
        println!(
            "  {} {} messages, last active {}",
            format!("{:<16}", summary.topic_id).dark_cyan(),
            summary.message_count,
            format_time(summary.last_updated),
        );
        if let Some(question) = summary.last_question {
            println!("  {:<16} last question: {}", "", question);
        }
    }
    Ok(())
}

pub fn export_chapter(settings: &Settings, catalog: &Catalog, chapter_id: &str) -> Result<()> {
    let Some(chapter) = catalog.get(chapter_id) else {
        bail!("unknown chapter: {chapter_id}");
    };

    let store = settings.build_store()?;
    let messages = store.load(chapter_id);
    let dir = settings
        .storage
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let path = numcalc_core::export::export_to_file(&dir, chapter.id, chapter.title, &messages)?;
    println!("Exported to {}", path.display());
    Ok(())
}

pub fn clear_chapter(settings: &Settings, catalog: &Catalog, chapter_id: &str) -> Result<()> {
    if !catalog.contains(chapter_id) {
        bail!("unknown chapter: {chapter_id}");
    }

    if !confirm(&format!(
        "Delete the whole conversation for '{chapter_id}'? This cannot be undone."
    ))? {
        println!("Nothing deleted.");
        return Ok(());
    }

    let store = settings.build_store()?;
    store.clear(chapter_id);
    println!("Conversation for '{chapter_id}' deleted.");
    Ok(())
}

/// Ask one question against a chapter and print the answer.
pub async fn run_one_shot(
    settings: &Settings,
    catalog: &Catalog,
    chapter_id: &str,
    question: &str,
) -> Result<()> {
    let Some(chapter) = catalog.get(chapter_id) else {
        bail!("unknown chapter: {chapter_id}");
    };

    let store = settings.build_store()?;
    let tutor = settings.build_tutor();
    if !tutor.is_enabled() {
        bail!(
            "no API key found: set {} to talk to the tutor",
            settings.llm.api_key_env
        );
    }

    let session = ChatSession::new(&store, &tutor, chapter.id, chapter.content);
    match session.ask(question).await {
        Reply::Answer(message) => {
            println!("{}", render::render(&message.content));
            Ok(())
        }
        Reply::Failed => bail!("the tutor did not answer; please try again"),
        Reply::Ignored => bail!("empty question"),
        Reply::Busy => unreachable!("one-shot session has no concurrent asks"),
    }
}

fn print_chapter_banner(chapter: &Chapter, message_count: usize) {
    println!();
    println!("{}", chapter.title.bold());
    println!("{}", chapter.description);
    if message_count > 0 {
        println!("(resuming a conversation with {message_count} saved messages)");
    }
    println!("Type a question, or /help for commands.\n");
}

fn choose_chapter<'a>(catalog: &'a Catalog) -> Result<Option<&'a Chapter>> {
    print_chapter_list(catalog);
    loop {
        let Some(input) = read_line("\nchapter id> ")? else {
            return Ok(None);
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        match catalog.get(input) {
            Some(chapter) => return Ok(Some(chapter)),
            None => println!("Unknown chapter '{input}'. Pick an id from the list."),
        }
    }
}

/// Interactive chapter chat. Input is read line by line and each question is
/// awaited to completion before the next prompt appears, so there is never
/// more than one request in flight.
pub async fn run_repl(
    settings: &Settings,
    catalog: &Catalog,
    chapter_id: Option<String>,
) -> Result<()> {
    let store = settings.build_store()?;
    let tutor = settings.build_tutor();

    if !tutor.is_enabled() {
        println!(
            "{} {} is not set; the tutor is disabled. You can still read the notes.",
            "note:".yellow(),
            settings.llm.api_key_env,
        );
    }

    let mut chapter = match chapter_id {
        Some(id) => match catalog.get(&id) {
            Some(chapter) => chapter,
            None => bail!("unknown chapter: {id}"),
        },
        None => match choose_chapter(catalog)? {
            Some(chapter) => chapter,
            None => return Ok(()),
        },
    };

    let mut session = ChatSession::new(&store, &tutor, chapter.id, chapter.content);
    print_chapter_banner(chapter, session.messages().len());

    loop {
        let Some(input) = read_line("you> ")? else {
            break;
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match handle_command(input) {
            CommandResult::Message(msg) => println!("{msg}"),
            CommandResult::Quit => break,
            CommandResult::ListChapters => print_chapter_list(catalog),
            CommandResult::ShowNotes => {
                println!("{}\n", render::render(chapter.content));
            }
            CommandResult::ShowKeyPoints => {
                for point in chapter.key_points {
                    println!("  • {point}");
                }
            }
            CommandResult::ShowHistory => print_history(settings, catalog)?,
            CommandResult::Export => {
                if let Err(e) = export_chapter(settings, catalog, chapter.id) {
                    tracing::warn!(error = %e, "transcript export failed");
                    println!("Export failed: {e}");
                }
            }
            CommandResult::Clear => {
                if confirm("Delete this chapter's conversation? This cannot be undone.")? {
                    session.clear();
                    println!("Conversation deleted.");
                } else {
                    println!("Kept.");
                }
            }
            CommandResult::ShowStatus => {
                println!(
                    "chapter: {} | model: {} | tutor: {} | messages: {}",
                    chapter.id,
                    settings.llm.model,
                    if tutor.is_enabled() { "ready" } else { "disabled" },
                    session.messages().len(),
                );
            }
            CommandResult::SwitchChapter(id) => match catalog.get(&id) {
                Some(next) => {
                    chapter = next;
                    session = ChatSession::new(&store, &tutor, chapter.id, chapter.content);
                    print_chapter_banner(chapter, session.messages().len());
                }
                None => println!("Unknown chapter '{id}'. Use /chapters to list ids."),
            },
            CommandResult::NotACommand => {
                println!("{}", "thinking...".dark_grey());
                match session.ask(input).await {
                    Reply::Answer(message) => {
                        println!("\n{}\n", render::render(&message.content));
                    }
                    Reply::Failed => {
                        println!(
                            "The tutor did not answer (network or configuration problem). \
                             Your question was kept; try again in a moment."
                        );
                    }
                    Reply::Ignored => {}
                    Reply::Busy => {
                        println!("Still waiting on the previous question.");
                    }
                }
            }
        }
    }

    Ok(())
}
