use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use library_core::{ItemFilter, ItemStore, SqliteStore};
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_library"))
}

/// Command isolated from the user's environment, with no TTY on stdin.
fn library(home: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("c"))
        .env("XDG_DATA_HOME", home.join("d"))
        .env("NO_COLOR", "1")
        .env_remove("LIBRARY_STORE")
        .env_remove("LIBRARY_CONFIG")
        .env_remove("LIBRARY_PASSWORD")
        .env_remove("LIBRARY_UNLOCK")
        .env_remove("LIBRARY_LOG")
        .stdin(Stdio::null());
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    library(home).args(args).output().expect("run library")
}

fn run_with(home: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = library(home);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.args(args).output().expect("run library")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

fn store_path(home: &Path) -> PathBuf {
    home.join("d").join("library").join("library.db")
}

/// Initialized library with one public and one private snippet.
/// Returns (public id, private id).
fn seeded(home: &Path) -> (String, String) {
    let init = run(home, &["init", "--fingerprint", "sha256"]);
    assert_success(&init);
    assert!(stdout(&init).contains("Initialized new library"));

    let public = run(
        home,
        &[
            "add", "-q", "--body", "hello world", "--author", "alice", "--tag", "greet",
        ],
    );
    assert_success(&public);

    let private = run_with(
        home,
        &["add", "-q", "--private", "--body", "top secret"],
        &[("LIBRARY_PASSWORD", "secret123")],
    );
    assert_success(&private);

    (
        stdout(&public).trim().to_string(),
        stdout(&private).trim().to_string(),
    )
}

fn list_json(home: &Path, envs: &[(&str, &str)], extra: &[&str]) -> Vec<serde_json::Value> {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let output = run_with(home, &args, envs);
    assert_success(&output);
    serde_json::from_str(&stdout(&output)).expect("list json")
}

#[test]
fn test_private_snippet_is_encrypted_at_rest() {
    let dir = TempDir::new().expect("temp dir");
    let (_, private_id) = seeded(dir.path());

    let store = SqliteStore::open(&store_path(dir.path())).expect("open store");
    let items = store.list_items(&ItemFilter::new()).expect("list items");
    let private = items
        .iter()
        .find(|item| item.id.to_string() == private_id)
        .expect("private item");

    assert!(private.privacy.is_private());
    assert!(!private.content.contains("top secret"));
    assert_eq!(private.privacy.key().map(str::len), Some(64));
}

#[test]
fn test_list_hides_private_until_unlocked() {
    let dir = TempDir::new().expect("temp dir");
    let (public_id, private_id) = seeded(dir.path());

    let locked = list_json(dir.path(), &[], &[]);
    assert_eq!(locked.len(), 1);
    assert_eq!(locked[0]["id"], public_id.as_str());
    assert_eq!(locked[0]["content"], "hello world");
    assert_eq!(locked[0]["author"], "alice");

    let unlocked = list_json(dir.path(), &[("LIBRARY_UNLOCK", "secret123")], &["--unlock"]);
    assert_eq!(unlocked.len(), 2);
    let private = unlocked
        .iter()
        .find(|item| item["id"] == private_id.as_str())
        .expect("private item listed");
    assert_eq!(private["content"], "top secret");
    assert_eq!(private["privacy_level"], "private");
    assert_eq!(private["unlocked"], true);
}

#[test]
fn test_wrong_password_reports_generic_message() {
    let dir = TempDir::new().expect("temp dir");
    seeded(dir.path());

    let output = run_with(
        dir.path(),
        &["list", "--json", "--unlock"],
        &[("LIBRARY_UNLOCK", "wrong")],
    );
    assert_success(&output);
    assert!(stderr(&output).contains("Wrong password or no matching content"));
    let items: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(items.len(), 1);
}

#[test]
fn test_show_private_requires_matching_password() {
    let dir = TempDir::new().expect("temp dir");
    let (_, private_id) = seeded(dir.path());

    let denied = run_with(
        dir.path(),
        &["show", &private_id],
        &[("LIBRARY_UNLOCK", "wrong")],
    );
    assert_eq!(denied.status.code(), Some(5));

    let no_password = run(dir.path(), &["show", &private_id]);
    assert_eq!(no_password.status.code(), Some(4));

    let shown = run_with(
        dir.path(),
        &["show", "-q", &private_id[..23]],
        &[("LIBRARY_UNLOCK", "wrong, secret123")],
    );
    assert_success(&shown);
    assert_eq!(stdout(&shown).trim(), "top secret");
}

#[cfg(unix)]
#[test]
fn test_editor_sees_private_body_in_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    let (_, private_id) = seeded(dir.path());

    let editor = dir.path().join("editor.sh");
    std::fs::write(
        &editor,
        "#!/bin/sh\n\
         out=$(dirname \"$0\")\n\
         ls -l \"$1\" | cut -c1-10 > \"$out/mode.txt\"\n\
         printf '%s' \"$1\" > \"$out/path.txt\"\n\
         cat \"$1\" > \"$out/seen.txt\"\n\
         printf 'edited secret' > \"$1\"\n",
    )
    .expect("write editor script");
    std::fs::set_permissions(&editor, std::fs::Permissions::from_mode(0o755))
        .expect("chmod editor script");

    let unlock = ("LIBRARY_UNLOCK", "secret123");
    let edited = run_with(
        dir.path(),
        &["edit", &private_id, "--editor"],
        &[unlock, ("EDITOR", editor.to_str().expect("utf-8 path"))],
    );
    assert_success(&edited);

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).expect("editor output");
    assert_eq!(read("mode.txt").trim(), "-rw-------");
    assert_eq!(read("seen.txt"), "top secret");
    assert!(!Path::new(&read("path.txt")).exists());

    let shown = run_with(dir.path(), &["show", "-q", &private_id], &[unlock]);
    assert_success(&shown);
    assert_eq!(stdout(&shown).trim(), "edited secret");
}

#[test]
fn test_edit_keeps_password_and_can_publish() {
    let dir = TempDir::new().expect("temp dir");
    let (_, private_id) = seeded(dir.path());
    let unlock = [("LIBRARY_UNLOCK", "secret123")];

    let edited = run_with(
        dir.path(),
        &["edit", &private_id, "--body", "new secret", "--tag", "work"],
        &unlock,
    );
    assert_success(&edited);

    let shown = run_with(dir.path(), &["show", "-q", &private_id], &unlock);
    assert_success(&shown);
    assert_eq!(stdout(&shown).trim(), "new secret");

    let published = run_with(dir.path(), &["edit", &private_id, "--public"], &unlock);
    assert_success(&published);

    let items = list_json(dir.path(), &[], &["--tag", "work"]);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "new secret");
    assert_eq!(items[0]["privacy_level"], "public");
}

#[test]
fn test_like_and_delete() {
    let dir = TempDir::new().expect("temp dir");
    let (public_id, _) = seeded(dir.path());

    let liked = run(dir.path(), &["like", "-q", &public_id]);
    assert_success(&liked);
    assert_eq!(stdout(&liked).trim(), "1");

    let unliked = run(dir.path(), &["like", "-q", "--undo", &public_id]);
    assert_success(&unliked);
    assert_eq!(stdout(&unliked).trim(), "0");

    let unconfirmed = run(dir.path(), &["delete", &public_id]);
    assert_eq!(unconfirmed.status.code(), Some(4));

    let deleted = run(dir.path(), &["delete", "--force", &public_id]);
    assert_success(&deleted);
    assert!(list_json(dir.path(), &[], &[]).is_empty());

    let missing = run(dir.path(), &["show", &public_id]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_session_unlock_and_clear() {
    let dir = TempDir::new().expect("temp dir");
    seeded(dir.path());

    let mut child = library(dir.path())
        .arg("session")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn session");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"list\nunlock wrong\nunlock secret123\nlist\nstatus\nclear\nlist\nquit\n")
        .expect("write session input");
    let output = child.wait_with_output().expect("session output");
    assert_success(&output);

    let out = stdout(&output);
    assert_eq!(out.matches("top secret").count(), 1);
    assert_eq!(out.matches("hello world").count(), 3);
    assert!(out.contains("Unlocked 1 snippet(s)"));
    assert!(out.contains("1 password(s) unlocked; 1 of 1 private snippet(s) readable"));
    assert!(out.contains("Session cleared"));
    assert!(stderr(&output).contains("Wrong password or no matching content"));
}

#[test]
fn test_session_list_sort_order() {
    let dir = TempDir::new().expect("temp dir");
    let (public_id, _) = seeded(dir.path());
    let later = run(dir.path(), &["add", "-q", "--body", "second note"]);
    assert_success(&later);
    assert_success(&run(dir.path(), &["like", "-q", &public_id]));

    let mut child = library(dir.path())
        .args(["session", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn session");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"list newest\nlist likes\nlist random\nquit\n")
        .expect("write session input");
    let output = child.wait_with_output().expect("session output");
    assert_success(&output);

    let out = stdout(&output);
    let order: Vec<&str> = out
        .lines()
        .filter_map(|line| {
            ["second note", "hello world"]
                .into_iter()
                .find(|body| line.contains(body))
        })
        .collect();
    assert_eq!(
        order,
        vec!["second note", "hello world", "hello world", "second note"]
    );
    assert!(stderr(&output).contains("Unknown sort order: random"));
}

#[test]
fn test_missing_store_and_config() {
    let dir = TempDir::new().expect("temp dir");

    let no_config = run(dir.path(), &["list"]);
    assert_eq!(no_config.status.code(), Some(3));
    assert!(stderr(&no_config).contains("library init"));

    let missing = dir.path().join("nowhere.db");
    let no_store = run_with(
        dir.path(),
        &["list"],
        &[("LIBRARY_STORE", missing.to_str().expect("utf-8 path"))],
    );
    assert_eq!(no_store.status.code(), Some(3));
}

#[test]
fn test_init_refuses_to_overwrite_config() {
    let dir = TempDir::new().expect("temp dir");
    assert_success(&run(dir.path(), &["init", "--fingerprint", "sha256"]));

    let again = run(dir.path(), &["init"]);
    assert_eq!(again.status.code(), Some(4));

    let forced = run(dir.path(), &["init", "--force"]);
    assert_success(&forced);
    assert!(stdout(&forced).contains("Using existing library"));
}
