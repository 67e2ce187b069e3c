use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in and remember the session in the state directory
    Login(CredentialArgs),

    /// Create an account and sign in
    Signup(CredentialArgs),

    /// End the current session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Collection counts and quick actions
    Dashboard {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Content sections
    Content {
        #[command(subcommand)]
        command: ContentCommands,
    },

    /// Product cards
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Site settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Args)]
pub(crate) struct CredentialArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "SITEADMIN_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Subcommand)]
pub(crate) enum ContentCommands {
    /// List sections grouped by category
    List {
        /// Case-insensitive filter on key or content
        #[arg(long)]
        search: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the content of one section
    Edit {
        section_key: String,
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProductCommands {
    /// List cards in display order
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a card from `field=value` pairs
    Add {
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Change fields of an existing card
    Edit {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Delete a card
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// List settings grouped by category
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one or more settings in a single batch
    Set {
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
    },
}

/// Splits `field=value` on the first `=`.
pub(crate) fn parse_assignment(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => anyhow::bail!("expected FIELD=VALUE, got `{}`", raw),
    }
}
