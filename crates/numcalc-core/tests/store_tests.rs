use numcalc_core::{Catalog, FileStore, Message, Role, TranscriptStore};

fn store_in(dir: &std::path::Path) -> TranscriptStore<FileStore> {
    TranscriptStore::new(FileStore::with_dir(dir.to_path_buf()).unwrap())
}

#[test]
fn append_is_durable_and_order_preserving() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let m1 = Message::new(Role::User, "What is truncation error?", 100);
    let m2 = Message::new(Role::Model, "Truncation error is...", 200);

    store.append("errors", m1.clone());
    store.append("errors", m2.clone());

    // Re-open against the same directory: everything survived.
    let reopened = store_in(dir.path());
    let messages = reopened.load("errors");
    assert_eq!(messages, vec![m1, m2.clone()]);
    assert_eq!(messages.last(), Some(&m2));
}

#[test]
fn load_of_unknown_topic_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    assert!(store.load("errors").is_empty());
}

#[test]
fn clear_then_load_yields_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.append("ode", Message::new(Role::User, "RK4?", 1));
    assert_eq!(store.load("ode").len(), 1);

    store.clear("ode");
    assert!(store.load("ode").is_empty());

    // Clearing an already-empty topic is fine too.
    store.clear("ode");
    assert!(store.load("ode").is_empty());
}

#[test]
fn corrupted_record_behaves_like_absent_record() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("chat_history_errors.json"), "{{{ nope").unwrap();

    let store = store_in(dir.path());
    assert!(store.load("errors").is_empty());

    // A corrupt topic does not block writing to it again.
    store.append("errors", Message::new(Role::User, "still works?", 1));
    assert_eq!(store.load("errors").len(), 1);
}

#[test]
fn summaries_skip_empty_topics_and_sort_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let catalog = Catalog::builtin();

    // "interpolation" stays empty and must not appear.
    store.append("errors", Message::new(Role::User, "q-errors", 100));
    store.append("errors", Message::new(Role::Model, "a-errors", 150));
    store.append("ode", Message::new(Role::User, "q-ode", 900));
    store.append("nonlinear", Message::new(Role::User, "q-nonlinear", 500));

    let summaries = store.summarize(&catalog);
    let ids: Vec<&str> = summaries.iter().map(|s| s.topic_id.as_str()).collect();
    assert_eq!(ids, vec!["ode", "nonlinear", "errors"]);

    let errors = &summaries[2];
    assert_eq!(errors.message_count, 2);
    assert_eq!(errors.last_updated, 150);
    assert_eq!(errors.last_question.as_deref(), Some("q-errors"));
    assert!(errors.title.contains("Errors"));
}

#[test]
fn summary_last_question_is_most_recent_user_turn() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let catalog = Catalog::builtin();

    store.append("integration", Message::new(Role::User, "first q", 1));
    store.append("integration", Message::new(Role::Model, "first a", 2));
    store.append("integration", Message::new(Role::User, "second q", 3));
    store.append("integration", Message::new(Role::Model, "second a", 4));

    let summaries = store.summarize(&catalog);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].last_question.as_deref(), Some("second q"));
}
