//! Input handling helpers for passwords and snippet bodies.

use std::io::{self, IsTerminal, Read, Write};
use std::process::Command;

use dialoguer::{Confirm, Password};
use library_core::crypto::normalize_password;
use zeroize::Zeroizing;

use crate::constants::env;
use crate::errors::CliError;

use super::parsing::split_passwords;

/// Password for a new private snippet, from LIBRARY_PASSWORD or a prompt
/// with confirmation.
pub fn new_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(env::PASSWORD) {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Set LIBRARY_PASSWORD.",
        )
        .into());
    }
    loop {
        let password = Zeroizing::new(
            Password::new()
                .with_prompt("Snippet password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?,
        );
        if let Err(err) = normalize_password(&password) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(password);
    }
}

/// Passwords to unlock with, from LIBRARY_UNLOCK (comma separated) or a
/// single prompt.
pub fn unlock_passwords(interactive: bool) -> anyhow::Result<Vec<Zeroizing<String>>> {
    if let Ok(value) = std::env::var(env::UNLOCK) {
        let passwords = split_passwords(&value);
        if !passwords.is_empty() {
            return Ok(passwords.into_iter().map(Zeroizing::new).collect());
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(
            "No unlock password provided and no TTY available. Set LIBRARY_UNLOCK.",
        )
        .into());
    }
    let password = Password::new()
        .with_prompt("Unlock password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    Ok(vec![Zeroizing::new(password)])
}

/// Yes/no confirmation. Non-interactive sessions always answer no.
pub fn confirm(prompt: &str, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read a snippet body from --body, stdin, or $EDITOR.
pub fn read_item_body(body: Option<String>, initial_body: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = body {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("--body cannot be empty").into());
        }
        return Ok(value);
    }

    if initial_body.is_none() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("No input provided on stdin").into());
        }
        return Ok(trimmed);
    }

    read_body_from_editor(initial_body)
}

/// Open $EDITOR to compose a snippet body.
///
/// The temp file may hold a private snippet's plaintext, so it is created
/// owner-only and removed when this returns.
fn read_body_from_editor(initial_body: Option<&str>) -> anyhow::Result<String> {
    let editor = std::env::var("EDITOR").map_err(|_| {
        CliError::invalid_input("$EDITOR is not set; use --body or pipe content via stdin")
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("library_snippet_")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;
    file.write_all(initial_body.unwrap_or("").as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| anyhow::anyhow!("Failed to write temp file: {}", e))?;

    let status = Command::new(editor)
        .arg(file.path())
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = Zeroizing::new(
        std::fs::read_to_string(file.path())
            .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?,
    );
    let trimmed = contents.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("Snippet body is empty").into());
    }

    Ok(trimmed)
}
