use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use library_core::crypto::FingerprintScheme;
use library_core::{SortOrder, VERSION};

/// Library - a personal snippet collection with password-protected entries
#[derive(Parser)]
#[command(name = "library")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "LIBRARY_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new store and write the config file
    Init(InitArgs),

    /// Add a snippet
    Add(AddArgs),

    /// List snippets
    List(ListArgs),

    /// Show a snippet
    Show(ShowArgs),

    /// Edit a snippet
    Edit(EditArgs),

    /// Delete a snippet
    Delete(DeleteArgs),

    /// Like a snippet
    Like(LikeArgs),

    /// Interactive shell that keeps unlocked passwords until it exits
    Session,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Fingerprint scheme for new private snippets
    #[arg(long, value_enum)]
    pub fingerprint: Option<FingerprintArg>,

    /// Offer to save a snippet publicly if encryption fails
    #[arg(long)]
    pub confirm_public_fallback: bool,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Snippet body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Add tags to the snippet
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Encrypt the snippet under a password
    #[arg(long)]
    pub private: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only snippets carrying this tag (repeatable; all must match)
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Only snippets by this author
    #[arg(long)]
    pub author: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::Likes)]
    pub sort: SortArg,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Prompt for passwords and include the private snippets they unlock
    #[arg(long)]
    pub unlock: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Snippet ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Snippet ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New body
    #[arg(long)]
    pub body: Option<String>,

    /// Open $EDITOR on the current body
    #[arg(long, conflicts_with = "body")]
    pub editor: bool,

    /// New author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Replace tags (repeatable)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tag")]
    pub clear_tags: bool,

    /// Make the snippet private
    #[arg(long, conflicts_with = "public")]
    pub private: bool,

    /// Make the snippet public
    #[arg(long)]
    pub public: bool,

    /// Encrypt under a new password instead of the one that unlocked it
    #[arg(long, conflicts_with = "public")]
    pub rekey: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Snippet ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `like` command
#[derive(Args)]
pub struct LikeArgs {
    /// Snippet ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Take a like back
    #[arg(long)]
    pub undo: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Newest first
    Newest,
    /// Most liked first
    Likes,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Likes => SortOrder::Likes,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FingerprintArg {
    /// Argon2id (slow to brute force)
    Argon2id,
    /// Plain SHA-256 (compatible with older clients)
    Sha256,
}

impl From<FingerprintArg> for FingerprintScheme {
    fn from(value: FingerprintArg) -> Self {
        match value {
            FingerprintArg::Argon2id => FingerprintScheme::Argon2id,
            FingerprintArg::Sha256 => FingerprintScheme::Sha256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "library", "list", "--tag", "a", "--tag", "b", "--sort", "newest", "--unlock",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.tag, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(SortOrder::from(args.sort), SortOrder::Newest);
                assert!(args.unlock);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_edit_rejects_private_and_public() {
        let result = Cli::try_parse_from(["library", "edit", "abc", "--private", "--public"]);
        assert!(result.is_err());
    }
}
