//! Read-only transform of a transcript into a markdown study note.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};

use crate::conversation::Message;
use crate::error::{Result, TutorError};

fn format_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Render a transcript as a human-readable markdown document: one heading
/// for the chapter, one `###` section per message in stored order, each
/// tagged with the author's role label and timestamp.
pub fn render_transcript(
    chapter_title: &str,
    messages: &[Message],
    exported_at: DateTime<Local>,
) -> String {
    let mut doc = format!(
        "# {} — Study Chat Transcript\n\n\
         Exported: {}\n\n\
         =============================================\n\n",
        chapter_title,
        exported_at.format("%Y-%m-%d %H:%M:%S"),
    );

    for msg in messages {
        doc.push_str(&format!(
            "### {} ({})\n\n{}\n\n---\n\n",
            msg.role.label(),
            format_time(msg.timestamp),
            msg.content,
        ));
    }

    doc
}

/// `NumCalc_History_<chapter>_<date>.md` inside `dir`, mirroring the export
/// naming users already have on disk.
pub fn export_path(dir: &Path, chapter_id: &str, exported_at: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "NumCalc_History_{}_{}.md",
        chapter_id,
        exported_at.format("%Y-%m-%d"),
    ))
}

/// Render and write a transcript; returns the written path. Refuses to
/// export an empty transcript.
pub fn export_to_file(
    dir: &Path,
    chapter_id: &str,
    chapter_title: &str,
    messages: &[Message],
) -> Result<PathBuf> {
    if messages.is_empty() {
        return Err(TutorError::Config(
            "nothing to export: the transcript is empty".to_string(),
        ));
    }

    let now = Local::now();
    let path = export_path(dir, chapter_id, now);
    fs::create_dir_all(dir)?;
    fs::write(&path, render_transcript(chapter_title, messages, now))?;
    Ok(path)
}
