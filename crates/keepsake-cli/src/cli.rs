use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use keepsake_core::VERSION;

/// Keepsake - seal secrets into tokens that only your passkey can open
#[derive(Parser)]
#[command(name = "keepsake")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "KEEPSAKE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `store` command
#[derive(Args)]
pub struct StoreArgs {
    /// Plaintext to seal (overrides stdin/prompt; one trailing newline on stdin is dropped)
    #[arg(long)]
    pub data: Option<String>,

    /// Write the token to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `retrieve` command
#[derive(Args)]
pub struct RetrieveArgs {
    /// Token to open (tokens may begin with `-`)
    #[arg(value_name = "TOKEN", conflicts_with = "input", allow_hyphen_values = true)]
    pub token: Option<String>,

    /// Read the token from a file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt data under a passkey and print the token
    Store(StoreArgs),

    /// Decrypt a token with its passkey
    Retrieve(RetrieveArgs),

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
