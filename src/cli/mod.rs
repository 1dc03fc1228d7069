//! CLI module for Satchel
//!
//! Provides command-line interface parsing and handling for the satchel-server
//! binary. Uses clap for argument parsing and owo-colors for colored terminal
//! output.

pub mod output;

use clap::{Parser, Subcommand};

/// Satchel - Ferrous Labs MCP tool server
#[derive(Parser, Debug)]
#[command(
    name = "satchel-server",
    author = "Ferrous Labs <build@ferrouslabs.dev>",
    version,
    about = "Satchel - MCP tool server for math, web, weather, and team info",
    long_about = "An MCP (Model Context Protocol) server exposing a safe math expression\n\
                  evaluator, arbitrary-precision arithmetic tools, Firecrawl-backed web\n\
                  search/scrape/crawl, Open-Meteo weather lookups, and Ferrous Labs team\n\
                  info. Every tool answers with a uniform {ok, data, error, meta} envelope.\n\n\
                  Run without arguments to serve MCP over stdio.",
    after_help = "EXAMPLES:\n    \
                  satchel-server                    # Serve MCP on stdio\n    \
                  satchel-server tools              # List registered tools\n    \
                  satchel-server call add --args '{\"a\": 2, \"b\": 3}'\n    \
                  satchel-server call calculate --args '{\"expression\": \"2**10 - 24\"}'"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the MCP server on stdio (the default when no command is given)
    ///
    /// Logs go to stderr; stdout carries the protocol stream.
    Serve,

    /// List all registered tools
    Tools,

    /// Dispatch a single tool call and print the response envelope
    Call {
        /// Name of the tool to call
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
