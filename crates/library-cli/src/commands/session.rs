//! Interactive session shell.
//!
//! One shell run owns one [`SessionUnlockCache`]. Passwords unlocked here
//! are forgotten on `clear` and when the shell exits.

use std::io::{self, Write};

use library_core::{
    ItemFilter, ItemStore, LibraryItem, SessionUnlockCache, SortOrder, SqliteStore,
};
use tracing::debug;
use zeroize::Zeroizing;

use crate::app::{unlock_with, AppContext};
use crate::errors::CliError;
use crate::helpers::{resolve_item_id, unlock_passwords};
use crate::output::{print_error, print_item, print_item_list, UiContext};

const HELP: &str = "\
Commands:
  unlock [PASSWORD]     Unlock private snippets (prompts when no password is given)
  list [newest|likes]   List public and unlocked snippets
  show <ID>             Show a snippet
  like <ID>             Like a snippet
  status                Show what this session has unlocked
  clear                 Forget every unlocked password
  help                  Show this help
  quit, exit            Leave the session";

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    store: SqliteStore,
    cache: SessionUnlockCache,
    items: Vec<LibraryItem>,
    ui: UiContext,
    quiet: bool,
    interactive: bool,
}

pub fn handle_session(ctx: &AppContext) -> anyhow::Result<()> {
    let mut shell = Shell {
        store: ctx.open_store()?,
        cache: SessionUnlockCache::new(),
        items: Vec::new(),
        ui: UiContext::from_env(),
        quiet: ctx.quiet(),
        interactive: ctx.interactive(),
    };
    shell.refresh()?;

    if shell.interactive && !shell.quiet {
        println!("Library session. Type `help` for commands.");
    }

    let mut line = String::new();
    loop {
        if shell.interactive {
            print!("library> ");
            io::stdout().flush()?;
        }
        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        match shell.execute(line.trim()) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => print_error(&err),
        }
    }

    shell.cache.clear_all();
    debug!("session closed");
    Ok(())
}

impl Shell {
    /// Reload items and bring the cache in line with them.
    fn refresh(&mut self) -> anyhow::Result<()> {
        self.refresh_sorted(SortOrder::default())
    }

    fn refresh_sorted(&mut self, sort: SortOrder) -> anyhow::Result<()> {
        self.items = self
            .store
            .list_items(&ItemFilter { sort, ..ItemFilter::new() })?;
        self.cache.reconcile(&self.items)?;
        Ok(())
    }

    fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map(|(command, arg)| (command, arg.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "unlock" => self.unlock(arg)?,
            "list" => self.list(arg)?,
            "show" => self.show(arg)?,
            "like" => self.like(arg)?,
            "status" => self.status(),
            "clear" => {
                self.cache.clear_all();
                if !self.quiet {
                    println!("Session cleared; private snippets are locked again.");
                }
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(CliError::invalid_input(format!(
                    "Unknown command: {}\nHint: Type `help` for commands.",
                    other
                ))
                .into())
            }
        }
        Ok(Flow::Continue)
    }

    fn unlock(&mut self, arg: &str) -> anyhow::Result<()> {
        let passwords = if arg.is_empty() {
            unlock_passwords(self.interactive)?
        } else {
            vec![Zeroizing::new(arg.to_string())]
        };
        let passwords: Vec<&str> = passwords.iter().map(|p| p.as_str()).collect();

        self.refresh()?;
        let report = unlock_with(&mut self.cache, &passwords, &self.items, self.quiet)?;
        if self.quiet {
            return Ok(());
        }
        if report.newly_decrypted > 0 {
            println!("Unlocked {} snippet(s)", report.newly_decrypted);
        } else if report.any_accepted() {
            println!("Already unlocked");
        }
        Ok(())
    }

    fn list(&mut self, arg: &str) -> anyhow::Result<()> {
        let sort = if arg.is_empty() {
            SortOrder::default()
        } else {
            arg.parse::<SortOrder>()?
        };
        self.refresh_sorted(sort)?;
        let visible: Vec<&LibraryItem> = self.cache.visible(&self.items).collect();
        let hidden = self.items.len() - visible.len();
        print_item_list(
            &self.ui,
            &visible,
            &self.cache,
            hidden,
            "use `unlock` to show them",
            self.quiet,
        );
        Ok(())
    }

    fn show(&mut self, arg: &str) -> anyhow::Result<()> {
        let id = self.require_id(arg)?;
        self.refresh()?;
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| {
                CliError::not_found(
                    format!("Snippet not found: {}", id),
                    "Hint: Run `list` to find snippet IDs.",
                )
            })?;
        let content = self.cache.display_content(item).ok_or_else(|| {
            CliError::auth_failed_with_hint(
                format!("Snippet {} is locked", id),
                "Hint: Run `unlock` with its password first.",
            )
        })?;
        print_item(&self.ui, item, content, self.quiet);
        Ok(())
    }

    fn like(&mut self, arg: &str) -> anyhow::Result<()> {
        let id = self.require_id(arg)?;
        let likes = self.store.like_item(&id)?;
        if !self.quiet {
            println!("Snippet {} now has {} like(s)", id, likes);
        }
        self.refresh()
    }

    fn status(&self) {
        let private = self
            .items
            .iter()
            .filter(|item| item.privacy.is_private())
            .count();
        let unlocked = self
            .items
            .iter()
            .filter(|item| item.privacy.is_private() && self.cache.is_unlocked(item.id))
            .count();
        println!(
            "{} password(s) unlocked; {} of {} private snippet(s) readable",
            self.cache.unlocked_password_count(),
            unlocked,
            private
        );
    }

    fn require_id(&self, arg: &str) -> anyhow::Result<uuid::Uuid> {
        if arg.is_empty() {
            return Err(CliError::invalid_input("Missing snippet ID").into());
        }
        resolve_item_id(&self.store, arg)
    }
}
