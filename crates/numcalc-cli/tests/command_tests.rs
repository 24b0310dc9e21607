use numcalc_cli::commands::{handle_command, CommandResult};

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

// --- BASIC SLASH COMMANDS ---

#[test]
fn test_help_command() {
    let result = handle_command("/help");

    if let CommandResult::Message(msg) = result {
        assert!(msg.contains("NumCalc Tutor Commands"));
        assert!(msg.contains("/help"));
        assert!(msg.contains("/export"));
    } else {
        panic!("Expected Message, got {:?}", result);
    }
}

#[test]
fn test_help_command_short_alias() {
    let result = handle_command("/h");
    assert!(matches!(result, CommandResult::Message(_)));
}

#[test]
fn test_exit_command() {
    assert!(matches!(handle_command("/exit"), CommandResult::Quit));
}

#[test]
fn test_quit_command() {
    assert!(matches!(handle_command("/quit"), CommandResult::Quit));
}

#[test]
fn test_quit_short_alias() {
    assert!(matches!(handle_command("/q"), CommandResult::Quit));
}

#[test]
fn test_clear_command() {
    assert!(matches!(handle_command("/clear"), CommandResult::Clear));
}

#[test]
fn test_chapters_command() {
    assert!(matches!(
        handle_command("/chapters"),
        CommandResult::ListChapters
    ));
}

#[test]
fn test_notes_command() {
    assert!(matches!(handle_command("/notes"), CommandResult::ShowNotes));
}

#[test]
fn test_points_command() {
    assert!(matches!(
        handle_command("/points"),
        CommandResult::ShowKeyPoints
    ));
}

#[test]
fn test_history_command() {
    assert!(matches!(
        handle_command("/history"),
        CommandResult::ShowHistory
    ));
}

#[test]
fn test_export_command() {
    assert!(matches!(handle_command("/export"), CommandResult::Export));
}

#[test]
fn test_status_command() {
    assert!(matches!(
        handle_command("/status"),
        CommandResult::ShowStatus
    ));
}

#[test]
fn test_version_command() {
    let result = handle_command("/version");

    if let CommandResult::Message(msg) = result {
        assert!(msg.contains("NumCalc"));
        assert!(msg.contains('v'));
    } else {
        panic!("Expected Message, got {:?}", result);
    }
}

// --- COMMANDS WITH ARGUMENTS ---

#[test]
fn test_chapter_command_with_id() {
    let result = handle_command("/chapter interpolation");

    match result {
        CommandResult::SwitchChapter(id) => assert_eq!(id, "interpolation"),
        _ => panic!("Expected SwitchChapter, got {:?}", result),
    }
}

#[test]
fn test_chapter_command_without_id() {
    let result = handle_command("/chapter");

    match result {
        CommandResult::Message(msg) => assert!(msg.contains("Usage: /chapter <id>")),
        _ => panic!("Expected Message (usage hint), got {:?}", result),
    }
}

#[test]
fn test_chapter_command_trims_whitespace() {
    let result = handle_command("/chapter   ode  ");

    match result {
        CommandResult::SwitchChapter(id) => assert_eq!(id, "ode"),
        _ => panic!("Expected SwitchChapter, got {:?}", result),
    }
}

// --- EDGE CASES ---

#[test]
fn test_empty_input_is_not_a_command() {
    assert!(matches!(handle_command(""), CommandResult::NotACommand));
}

#[test]
fn test_regular_question_is_not_a_command() {
    assert!(matches!(
        handle_command("What is truncation error?"),
        CommandResult::NotACommand
    ));
}

#[test]
fn test_unknown_slash_command_shows_error() {
    let result = handle_command("/foobar");

    match result {
        CommandResult::Message(msg) => {
            assert!(msg.contains("Unknown command"));
            assert!(msg.contains("/foobar"));
            assert!(msg.contains("/help"));
        }
        _ => panic!("Expected Message (unknown command error), got {:?}", result),
    }
}

#[test]
fn test_slash_only_is_unknown_command() {
    let result = handle_command("/");

    match result {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown command")),
        _ => panic!("Expected Message, got {:?}", result),
    }
}

#[test]
fn test_leading_whitespace_makes_it_a_question() {
    assert!(matches!(
        handle_command("  /help"),
        CommandResult::NotACommand
    ));
}
