// Command-line definitions. Kept free of crate imports: build.rs includes
// this file to render the man page.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
Turns a free-text legal research request into boolean search keywords for
PKU Law (北大法宝) case search, using an OpenAI-compatible chat model.

QUICK START:
    1. export FABAO_API_URL=https://host/v1/chat/completions
    2. export FABAO_API_KEY=sk-...
    3. fabao serve                 Start the HTTP API on 127.0.0.1:5000

HTTP API:
    POST /api/search/auto   {"text": "..."}
      -> {"status": 200, "data": [{"id", "keyword1", "keyword2", "relation"}]}

CONFIGURATION:
    --config FILE, $FABAO_CONFIG, or <config dir>/fabao/config.toml
    Environment overrides: FABAO_API_URL, FABAO_API_KEY, FABAO_MODEL,
    FABAO_HOST, FABAO_PORT. Logging: FABAO_LOG=info
"#;

/// LLM-assisted boolean keyword builder for legal case search
#[derive(Parser, Debug)]
#[command(name = "fabao")]
#[command(author, version)]
#[command(about = "LLM-assisted boolean keyword builder for legal case search")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(visible_alias = "s")]
    Serve(ServeArgs),

    /// Generate keywords for a research request once and print them
    #[command(visible_alias = "q")]
    Search(SearchArgs),

    /// Parse a model answer into keyword groups (no network)
    #[command(visible_alias = "p")]
    Parse(ParseArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    fabao serve                        Serve on the configured address
    fabao serve --port 8080            Use custom port
    fabao serve --host 0.0.0.0         Listen on all interfaces")]
pub struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Parse upstream failures as "Error: ..." text instead of answering 502
    #[arg(long)]
    pub degrade_errors: bool,
}

/// Arguments for the search command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    fabao search \"当事人伪造公章代表公司签署合同\"
    fabao search \"非法集资\" --json")]
pub struct SearchArgs {
    /// Research request
    pub query: String,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Model identifier (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    fabao parse \"(伪造|私刻) 公章 签订合同\"
    echo \"合同 违约\" | fabao parse --json")]
pub struct ParseArgs {
    /// Model answer to parse (reads stdin when omitted)
    pub text: Option<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}
