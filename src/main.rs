use std::{io, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use monkey::{
    init_tracing, render_error,
    repl::repl::{run_file, start, ReplConfig, PROMPT},
};
use tracing::info;

/// Print the tokens of monkey source, line by line or a whole file at once.
#[derive(Parser, Debug)]
#[command(name = "monkey", version)]
struct Args {
    /// Source file to tokenize. Starts an interactive session when omitted.
    file: Option<PathBuf>,

    /// Prompt shown before each line in the interactive session.
    #[arg(long, default_value = PROMPT)]
    prompt: String,

    /// Report the first illegal token as an error instead of printing tokens.
    #[arg(long)]
    deny_illegal: bool,

    /// Suppress the banner and the prompt.
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let config = ReplConfig {
        prompt: args.prompt,
        deny_illegal: args.deny_illegal,
        quiet: args.quiet,
    };

    let result = match &args.file {
        Some(path) => {
            let began = Instant::now();
            let accepted = run_file(path, io::stdout().lock(), &config);
            info!(elapsed = ?began.elapsed(), "tokenized {}", path.display());
            accepted
        }
        None => start(io::stdin().lock(), io::stdout().lock(), &config).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprint!("{}", render_error(&error, b""));
            ExitCode::FAILURE
        }
    }
}
