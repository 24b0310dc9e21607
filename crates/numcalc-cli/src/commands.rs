/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Clear this chapter's chat history (after confirmation).
    Clear,
    /// Quit the application.
    Quit,
    /// Print the current chapter's notes.
    ShowNotes,
    /// Print the current chapter's key points.
    ShowKeyPoints,
    /// List chapters with saved conversations.
    ShowHistory,
    /// Export this chapter's transcript to a markdown file.
    Export,
    /// Switch to another chapter.
    SwitchChapter(String),
    /// List all chapters.
    ListChapters,
    /// Show status (model, chapter, message count).
    ShowStatus,
    /// Not a command - treat as a question for the tutor.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/clear" => CommandResult::Clear,

        "/chapters" => CommandResult::ListChapters,
        "/chapter" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /chapter <id>. Use /chapters to list ids.".into())
            } else {
                CommandResult::SwitchChapter(arg.to_string())
            }
        }
        "/notes" => CommandResult::ShowNotes,
        "/points" => CommandResult::ShowKeyPoints,

        "/history" => CommandResult::ShowHistory,
        "/export" => CommandResult::Export,
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("NumCalc v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ NumCalc Tutor Commands ───────────────────────────────────────╮

  STUDYING
    /chapters                 List all course chapters
    /chapter <id>             Switch to another chapter
    /notes                    Show this chapter's notes
    /points                   Show this chapter's key points

  CHAT
    /history                  List chapters with saved conversations
    /export                   Export this chat as a markdown file
    /clear                    Delete this chapter's chat history
    /status                   Show model, chapter and message count

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit

  Anything else you type is sent to the tutor as a question.

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
