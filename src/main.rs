use astrolabe::application::agent::AgentBuilder;
use astrolabe::application::tooling::sysinfo::builtin_tools;
use astrolabe::config::AgentConfig;
use clap::Parser;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "astrolabe",
    version,
    about = "Tool-calling agent powered by Ollama"
)]
struct Cli {
    /// Model identifier, e.g. "qwen2.5:7b"
    #[arg(long)]
    model: Option<String>,
    /// Ollama endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,
    /// System prompt override
    #[arg(long)]
    system: Option<String>,
    /// Maximum tool-calling rounds per chat call
    #[arg(long)]
    max_rounds: Option<usize>,
    /// Read the prompt from a file instead of the arguments
    #[arg(long)]
    prompt_file: Option<String>,
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting astrolabe");
    let cli = Cli::parse();
    debug!(model = ?cli.model, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let mut config = AgentConfig::load(config_path)?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }
    if let Some(system) = cli.system.clone() {
        config.system_prompt = Some(system);
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.max_rounds = max_rounds;
    }

    let prompt = load_prompt(&cli)?;

    let mut agent = AgentBuilder::from_config(&config)
        .with_tools(builtin_tools())
        .build()?;

    info!(model = %agent.model(), "Dispatching prompt to agent");
    match agent.chat(&prompt).await {
        Ok(answer) => {
            let output = json!({
                "model": agent.model(),
                "content": answer,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", error.user_message());
            Err(error.into())
        }
    }
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn load_prompt(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path, "Loading prompt from file");
        let content = fs::read_to_string(path)?;
        return Ok(content.trim().to_string());
    }

    if !cli.prompt.is_empty() {
        let joined = cli.prompt.join(" ");
        return Ok(joined.trim().to_string());
    }

    Err("prompt required via arguments or --prompt-file".into())
}
