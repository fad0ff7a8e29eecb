use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod args;
mod client;

use client::McpClient;

#[derive(Parser)]
#[command(name = "xentral", about = "Xentral MCP CLI - inspect and call MCP tools")]
struct Cli {
    /// MCP server URL
    #[arg(long, env = "XENTRAL_MCP_URL", default_value = "http://localhost:8888")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all available tools
    ListTools,

    /// Show the parameters of a tool
    Help {
        /// Tool name
        tool: String,
    },

    /// Call a tool with `--key value` arguments
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments, e.g. `--name John --limit 5`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },

    /// Print server information
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = McpClient::new(&cli.server);

    let init = client.initialize().await?;
    tracing::info!(
        server = %init.server_info.name,
        version = %init.server_info.version,
        "MCP server initialized"
    );

    match cli.command {
        Commands::ListTools => {
            let tools = client.list_tools().await?;
            println!("Found {} tools:\n", tools.len());
            for tool in &tools {
                println!(
                    "  - {}: {}",
                    tool["name"].as_str().unwrap_or_default(),
                    tool["description"].as_str().unwrap_or_default()
                );
            }
        }
        Commands::Help { tool } => {
            let tools = client.list_tools().await?;
            let Some(found) = tools.iter().find(|t| t["name"] == tool.as_str()) else {
                anyhow::bail!("Tool '{tool}' not found");
            };
            print_tool_info(found);
        }
        Commands::Call { tool, arguments } => {
            let arguments = args::parse_tool_args(&arguments)?;
            let output = client.call_tool(&tool, arguments).await?;
            println!("{output}");
        }
        Commands::Info => {
            let info = client.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

fn print_tool_info(tool: &Value) {
    println!("Tool: {}", tool["name"].as_str().unwrap_or_default());
    println!("  Description: {}", tool["description"].as_str().unwrap_or_default());

    let schema = &tool["inputSchema"];
    let required: Vec<&str> = schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    match schema["properties"].as_object() {
        Some(properties) if !properties.is_empty() => {
            println!("  Parameters:");
            for (name, property) in properties {
                let marker = if required.contains(&name.as_str()) {
                    " (required)"
                } else {
                    ""
                };
                println!(
                    "    - {name}: {}{marker}",
                    property["type"].as_str().unwrap_or("any")
                );
            }
        }
        _ => println!("  Parameters: none"),
    }
}
