use satchel::cli::output::Output;
use satchel::cli::{Cli, Commands};
use satchel::config::Config;
use satchel::tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool, no_color: bool) {
    let default_filter = if verbose { "satchel=debug" } else { "satchel=info" };

    // Stdout belongs to the MCP transport, so all logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

fn print_tools(output: &Output, registry: &ToolRegistry) {
    let mut definitions = registry.get_tool_definitions();
    definitions.sort_by(|a, b| a.name.cmp(&b.name));

    output.banner();
    output.header(&format!("Registered Tools ({})", definitions.len()));
    output.table_header(&[("Name", 18), ("Description", 60)]);
    for def in &definitions {
        output.table_row(&[(def.name.as_str(), 18), (def.description.as_str(), 60)]);
    }
    output.hint("Call one directly:");
    output.command("satchel-server call add --args '{\"a\": 2, \"b\": 3}'");
    output.newline();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose, cli.no_color);

    let config = Config::from_env();
    let registry = Arc::new(ToolRegistry::with_default_tools(&config));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!(
                "Starting satchel-server v{} ({} tools)",
                env!("CARGO_PKG_VERSION"),
                registry.tool_names().len()
            );
            satchel::mcp::start_stdio_server(registry).await?;
        }
        Commands::Tools => {
            let output = if cli.no_color {
                Output::no_color()
            } else {
                Output::new()
            };
            print_tools(&output, &registry);
        }
        Commands::Call { name, args } => {
            let args: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| anyhow::anyhow!("invalid --args JSON: {}", e))?;
            let envelope = registry.dispatch(&name, args).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
