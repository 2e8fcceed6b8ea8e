use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use codedoc_editor::{
    EditorSession, FileStorage, HiddenContent, Position, RecordingNotifier, Selection,
    SessionError, SourceFile, StorageError,
};
use codedoc_ide::DeclarationKind;

/// In-memory storage: originals and working copies keyed by name.
#[derive(Default)]
struct MemoryStorage {
    originals: Mutex<HashMap<String, String>>,
    working: Mutex<HashMap<String, (u64, String)>>,
    fetches: AtomicUsize,
}

impl MemoryStorage {
    fn with_original(self, name: &str, content: &str) -> Self {
        self.originals
            .lock()
            .unwrap()
            .insert(name.to_string(), content.to_string());
        self
    }

    fn with_working(self, name: &str, version: u64, content: &str) -> Self {
        self.working
            .lock()
            .unwrap()
            .insert(name.to_string(), (version, content.to_string()));
        self
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FileStorage for MemoryStorage {
    async fn fetch_content(&self, path: &str, editable: bool) -> Result<SourceFile, StorageError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if path == "broken.js" {
            return Err(StorageError::Transport {
                status: 500,
                message: "backend down".into(),
            });
        }
        let not_found = || StorageError::NotFound {
            path: path.to_string(),
        };
        if editable {
            let working = self.working.lock().unwrap();
            let (version, content) = working.get(path).ok_or_else(not_found)?;
            Ok(SourceFile::new(path, content.clone()).with_version(*version))
        } else {
            let originals = self.originals.lock().unwrap();
            let content = originals.get(path).ok_or_else(not_found)?;
            Ok(SourceFile::new(path, content.clone()))
        }
    }

    async fn save(&self, file: &SourceFile) -> Result<SourceFile, StorageError> {
        let mut working = self.working.lock().unwrap();
        let version = working.get(&file.name).map_or(1, |(version, _)| version + 1);
        working.insert(file.name.clone(), (version, file.content.clone()));
        Ok(SourceFile::new(file.name.clone(), "").with_version(version))
    }
}

fn session(storage: MemoryStorage) -> (EditorSession<MemoryStorage, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    (EditorSession::new(storage, notifier.clone()), notifier)
}

fn storage() -> MemoryStorage {
    MemoryStorage::default()
        .with_original("a.js", "function a() {}\n")
        .with_original("b.js", "function b() {}\n")
}

#[tokio::test]
async fn reloading_unchanged_file_fetches_again() {
    let (mut session, notifier) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.load_file("a.js", false, false).await.unwrap();

    assert_eq!(session.storage().fetches(), 2);
    assert_eq!(session.file_name(), Some("a.js"));
    assert!(notifier.messages().is_empty());
    assert_eq!(session.generation(), 2);
}

#[tokio::test]
async fn announces_loaded_version() {
    let (mut session, notifier) = session(storage().with_working("a.js", 3, "let a;\n"));
    session.load_file("a.js", true, true).await.unwrap();

    assert_eq!(session.file_version(), Some(3));
    assert_eq!(session.text(), "let a;\n");
    assert_eq!(
        notifier.last().as_deref(),
        Some("Version [3] of file [a.js] is in the editor")
    );
}

#[tokio::test]
async fn dirty_session_refuses_other_file() {
    let (mut session, notifier) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.append_text("// edit").unwrap();
    let before = session.text().to_string();

    let err = session.load_file("b.js", false, false).await.unwrap_err();
    assert_eq!(err, SessionError::Conflict);
    assert_eq!(err.status_code(), 409);
    assert_eq!(session.file_name(), Some("a.js"));
    assert_eq!(session.text(), before);
    assert_eq!(session.storage().fetches(), 1);
    assert_eq!(notifier.last(), Some(err.to_string()));

    session.discard_changes().unwrap();
    assert!(!session.is_dirty());
    session.load_file("b.js", false, false).await.unwrap();
    assert_eq!(session.file_name(), Some("b.js"));
}

#[tokio::test]
async fn locked_session_refuses_everything_that_mutates() {
    let (mut session, _) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    assert!(session.toggle_locked());

    let locked = SessionError::Locked {
        name: "a.js".into(),
    };
    assert_eq!(session.load_file("b.js", false, false).await, Err(locked.clone()));
    assert_eq!(
        session.set_new_file(SourceFile::new("c.js", "")),
        Err(locked.clone())
    );
    assert_eq!(session.set_text("x"), Err(locked.clone()));
    assert_eq!(session.append_text("x"), Err(locked.clone()));
    assert_eq!(session.toggle_hidden_content(), Err(locked.clone()));
    assert_eq!(session.discard_changes(), Err(locked.clone()));
    assert_eq!(locked.status_code(), 423);
    assert_eq!(session.text(), "function a() {}\n");

    assert!(!session.toggle_locked());
    session.set_text("x").unwrap();
}

#[tokio::test]
async fn lock_is_checked_before_dirty_state() {
    let (mut session, _) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.set_text("changed").unwrap();
    session.toggle_locked();

    let err = session.load_file("b.js", false, false).await.unwrap_err();
    assert!(matches!(err, SessionError::Locked { .. }));
}

#[test]
fn new_file_names_are_validated() {
    let (mut session, notifier) = session(storage());
    let err = session
        .set_new_file(SourceFile::new("bad name", "x"))
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Validation {
            name: "bad name".into()
        }
    );
    assert_eq!(err.status_code(), 400);
    assert_eq!(session.current(), None);
    assert_eq!(
        notifier.last().as_deref(),
        Some("invalid file name [bad name], empty or has spaces")
    );

    assert!(session.set_new_file(SourceFile::new("", "x")).is_err());
    session
        .set_new_file(SourceFile::new("fresh.js", "let x;").with_version(9))
        .unwrap();
    assert_eq!(session.file_version(), Some(0));
    assert_eq!(session.text(), "let x;");
    assert!(!session.is_dirty());
}

#[test]
fn new_file_is_refused_while_dirty() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("one.js", "")).unwrap();
    session.set_text("edited").unwrap();
    assert_eq!(
        session.set_new_file(SourceFile::new("two.js", "")),
        Err(SessionError::Conflict)
    );
    assert_eq!(session.file_name(), Some("one.js"));
}

#[tokio::test]
async fn editable_load_falls_back_to_original() {
    let (mut session, _) = session(storage());
    session.load_file("a.js", true, false).await.unwrap();
    assert_eq!(session.file_version(), Some(0));
    assert_eq!(session.text(), "function a() {}\n");
    assert_eq!(session.storage().fetches(), 2);
}

#[tokio::test]
async fn failed_load_leaves_session_untouched() {
    let (mut session, notifier) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.toggle_folding();
    let generation = session.generation();

    let err = session.load_file("broken.js", true, false).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Storage(StorageError::Transport {
            status: 500,
            message: "backend down".into()
        })
    );
    assert_eq!(session.file_name(), Some("a.js"));
    assert!(session.is_folded());
    assert_eq!(session.generation(), generation);
    assert_eq!(notifier.last().as_deref(), Some("storage error 500: backend down"));

    let err = session.load_file("missing.js", true, false).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(session.file_name(), Some("a.js"));
}

#[tokio::test]
async fn load_unfolds() {
    let (mut session, _) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.toggle_folding();
    session.load_file("b.js", false, false).await.unwrap();
    assert!(!session.is_folded());
    assert!(session.collapsed_regions().is_empty());
}

#[tokio::test]
async fn saving_keeps_text_and_bumps_version() {
    let (mut session, notifier) = session(storage());
    session.load_file("a.js", false, false).await.unwrap();
    session.append_text("// saved").unwrap();
    assert!(session.is_dirty());

    session.save_current().await.unwrap();
    assert_eq!(session.file_version(), Some(1));
    assert_eq!(session.text(), "function a() {}\n\n// saved");
    assert!(!session.is_dirty());
    assert_eq!(
        notifier.last().as_deref(),
        Some("Version [1] of file [a.js] is saved")
    );

    session.load_file("a.js", true, false).await.unwrap();
    assert_eq!(session.text(), "function a() {}\n\n// saved");
}

#[tokio::test]
async fn save_without_file_is_refused() {
    let (mut session, _) = session(storage());
    assert_eq!(session.save_current().await, Err(SessionError::NoFileLoaded));
}

#[test]
fn hidden_text_round_trips() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("a.js", "shown")).unwrap();
    session.set_hidden_content(HiddenContent::Text("behind".into()));

    session.toggle_hidden_content().unwrap();
    assert_eq!(session.text(), "behind");
    session.toggle_hidden_content().unwrap();
    assert_eq!(session.text(), "shown");
    assert_eq!(
        session.hidden_content(),
        &HiddenContent::Text("behind".into())
    );
}

#[test]
fn structured_hidden_content_is_shown_as_json() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("a.js", "shown")).unwrap();
    session.set_hidden_content(HiddenContent::Structured(serde_json::json!({ "a": [1, 2] })));

    session.toggle_hidden_content().unwrap();
    assert_eq!(session.text(), r#"{"a":[1,2]}"#);
    session.toggle_hidden_content().unwrap();
    assert_eq!(session.text(), "shown");
}

#[test]
fn new_file_clears_hidden_content() {
    let (mut session, _) = session(storage());
    session.set_hidden_content(HiddenContent::Text("old".into()));
    session.set_new_file(SourceFile::new("a.js", "")).unwrap();
    assert_eq!(session.hidden_content(), &HiddenContent::default());
}

const SOURCE: &str = "\
var x = 1;
// adds numbers
function add(a, b) {
  return a + b; // sum
}
exports.sub = function (a, b) {
  return a - b;
};
";

#[test]
fn extracts_from_whole_buffer() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("math.js", SOURCE)).unwrap();

    let declarations = session.extract_top_level_declarations(false, false, false);
    let names: Vec<_> = declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["add", "exports.sub"]);
    assert_eq!(declarations[1].kind, DeclarationKind::AssignedFunction);
    assert_eq!(declarations[0].code, "function add(a, b) {\n  return a + b;\n}");
    assert_eq!(
        session.function_code(&declarations[0]),
        "function add(a, b) {\n  return a + b; // sum\n}"
    );
    assert_eq!(
        session.top_level_function_code("sub", false).as_deref(),
        Some("exports.sub = function (a, b) {\n  return a - b;\n};")
    );
}

#[test]
fn extracts_from_selection_with_header() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("math.js", SOURCE)).unwrap();
    session.set_selection(Some(Selection::new(Position::new(1, 0), Position::new(5, 0))));

    let declarations = session.extract_top_level_declarations(true, true, true);
    assert_eq!(declarations.len(), 1);
    let add = &declarations[0];
    assert_eq!(add.name, "add");
    assert!(add.header.is_some());
    assert_eq!(
        session.function_code(add),
        "// adds numbers\nfunction add(a, b) {\n  return a + b; // sum\n}"
    );
}

#[test]
fn empty_selection_means_whole_buffer() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("math.js", SOURCE)).unwrap();
    session.set_selection(Some(Selection::new(Position::new(3, 2), Position::new(3, 2))));
    assert_eq!(session.extract_top_level_declarations(true, false, false).len(), 2);
}

#[test]
fn extraction_failures_are_reported() {
    let (mut session, notifier) = session(storage());
    assert!(session.extract_top_level_declarations(false, false, false).is_empty());
    assert_eq!(notifier.last().as_deref(), Some("no file loaded in editor"));

    session.set_new_file(SourceFile::new("notes.txt", "hello")).unwrap();
    assert!(session.extract_top_level_declarations(false, false, false).is_empty());
    assert_eq!(
        notifier.last().as_deref(),
        Some("cannot parse a non-JS file [notes.txt]")
    );

    session.set_new_file(SourceFile::new("plain.js", "var x = 1;")).unwrap();
    assert!(session.extract_top_level_declarations(false, false, false).is_empty());
    assert_eq!(notifier.last().as_deref(), Some("no functions found"));
}

#[test]
fn template_comments_and_stripping() {
    let (mut session, _) = session(storage());
    session
        .set_new_file(SourceFile::new("page.ejs", "<%# title %>\n<h1><%= title %></h1>\n"))
        .unwrap();
    assert_eq!(session.all_comments().as_deref(), Some("<%# title %>"));
    assert_eq!(
        session.strip_all_comments().as_deref(),
        Some("<h1><%= title %></h1>")
    );
    assert!(session.extract_top_level_declarations(false, false, false).is_empty());
}

#[test]
fn script_comments_are_listed() {
    let (mut session, _) = session(storage());
    session.set_new_file(SourceFile::new("math.js", SOURCE)).unwrap();
    assert_eq!(
        session.all_comments().as_deref(),
        Some("// adds numbers\n// sum\n")
    );
    assert_eq!(session.code_range(2, 3), ["// adds numbers", "function add(a, b) {"]);
}
