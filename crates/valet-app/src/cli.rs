use clap::Parser;

/// Valet — a tool-calling chat agent on the command line.
#[derive(Parser, Debug)]
#[command(name = "valet", version, about)]
pub struct Args {
    /// Model to use for the conversation.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// System prompt prepended to every request.
    #[arg(short = 's', long)]
    pub system: Option<String>,

    /// Maximum tool-call rounds per turn.
    #[arg(long, default_value_t = 10)]
    pub max_tool_rounds: u32,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
