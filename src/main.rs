use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use callview::config::{
    load_config, load_config_or_default, AppConfig, ExpandMode, DEFAULT_CONFIG_PATH,
};
use callview::error::{exit_code, CallviewError};
use callview::observability::init_tracing;
use callview::transcript::{decode_response, ChatMessage};
use callview::{DisplayState, Renderer};

/// Render an assistant turn with its function calls and results annotated.
#[derive(Parser, Debug)]
#[command(name = "callview")]
#[command(version)]
#[command(about = "Render function-call transcripts from a backend response document")]
struct Args {
    /// Response document (`{"output", "call_responses"}` or `{"error"}`); stdin if omitted
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expand the entry at this index (repeatable)
    #[arg(long = "expand", value_name = "INDEX")]
    expand: Vec<usize>,

    /// Override display.expand_mode
    #[arg(long, value_name = "MODE")]
    expand_mode: Option<ExpandMode>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("callview: {err}");
        std::process::exit(exit_code(&err));
    }
}

fn run(args: Args) -> Result<(), CallviewError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(DEFAULT_CONFIG_PATH)?,
    };
    if let Some(mode) = args.expand_mode {
        config.display.expand_mode = mode;
    }

    init_tracing(&config.features.log_level);
    debug!(config = ?config, "configuration loaded");

    let body = read_input(args.input.as_ref())?;
    let message = ChatMessage::from_result(decode_response(&body));
    info!(
        entries = message.call_responses.len(),
        "decoded response document"
    );

    let rendered = render_message(&config, &message, &args.expand);
    io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>, CallviewError> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn render_message(config: &AppConfig, message: &ChatMessage, expand: &[usize]) -> String {
    let mut state = DisplayState::new(config.display.expand_mode);
    for &index in expand {
        if !state.is_expanded(index) {
            state.toggle(index);
        }
    }

    let renderer = Renderer::new(config.display.clone())
        .hide_control_calls(config.features.hide_control_calls);

    let mut out = String::new();
    out.push_str(&message.content);
    out.push('\n');
    for entry in renderer.render_entries(&message.call_responses, &state) {
        out.push('\n');
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}
