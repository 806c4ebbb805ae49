//! # Terminal OS
//!
//! Main entry point for the Terminal OS shell.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use terminal_host::{HostRuntime, HostRuntimeConfig, InputScript, ReaderSource};

#[derive(Parser, Debug)]
#[command(name = "terminal-os")]
#[command(about = "A simulated operating system shell over an in-memory file system")]
#[command(version)]
struct Args {
    /// Input script to run instead of reading stdin
    #[arg(long, short)]
    script: Option<PathBuf>,

    /// Where the `save` command writes its snapshot
    #[arg(long, default_value = "terminal-os-save.json")]
    save_path: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Never colour output
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = &args.log_level {
        logger.parse_filters(level);
    }
    logger.target(env_logger::Target::Stderr).init();

    let stdout = io::stdout();
    let config = HostRuntimeConfig {
        save_path: args.save_path,
        color_output: !args.plain && stdout.is_terminal(),
    };

    let mut runtime =
        HostRuntime::new(config, stdout.lock()).context("Failed to create runtime")?;

    match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read script file {}", path.display()))?;
            let mut script = InputScript::from_text(&text)
                .with_context(|| format!("Invalid script {}", path.display()))?;
            runtime.run(&mut script).context("Runtime error")?;
        }
        None => {
            let mut source = ReaderSource::new(io::stdin().lock());
            runtime.run(&mut source).context("Runtime error")?;
        }
    }

    Ok(())
}
