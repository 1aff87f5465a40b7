mod cli;
mod tools;

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use valet_agent::{Agent, AgentError, ClaudeConfig, ClaudeGateway};

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let candidates = [
        std::path::PathBuf::from(".env"),
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    load_dotenv();

    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("valet=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "valet=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Valet v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match ClaudeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Set ANTHROPIC_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    tracing::info!("Using model {}", config.model);

    let gateway = Arc::new(ClaudeGateway::new(config));
    let mut agent = match Agent::new(gateway, tools::demo_tools()) {
        Ok(agent) => agent.with_max_tool_rounds(args.max_tool_rounds),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(system) = args.system {
        agent = agent.with_system_prompt(system);
    }
    tracing::info!("Registered {} tools", agent.registry().len());

    println!("valet — chat with tool calling. /reset, /usage, /quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                tracing::error!("stdin error: {e}");
                break;
            }
        }

        let input = line.trim();
        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                agent.reset();
                println!("(conversation cleared)");
                continue;
            }
            "/usage" => {
                let tracker = agent.tracker();
                println!(
                    "{} gateway calls, {} input + {} output tokens",
                    tracker.call_count(),
                    tracker.total().input_tokens,
                    tracker.total().output_tokens
                );
                continue;
            }
            _ => {}
        }

        match agent.chat(input).await {
            Ok(reply) => println!("{reply}"),
            Err(err @ AgentError::Gateway(_)) => {
                // Provider failures abort the turn but not the shell.
                eprintln!("gateway error: {err}");
            }
            Err(err) => {
                eprintln!("error: {err}");
            }
        }
    }

    tracing::info!("Shutdown complete");
}
