use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
    rc::Rc,
};

use tracing::debug;

use crate::{
    check_tokens,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::{tokenize_spanned, Lexer},
    render_error, Position,
};

pub const PROMPT: &str = ">> ";

const BANNER: &str = "Type in some code and every token on the line will be printed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    /// Report the first `ILLEGAL` token as an error instead of printing the tokens.
    pub deny_illegal: bool,
    /// Suppress the banner and the prompt.
    pub quiet: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: String::from(PROMPT),
            deny_illegal: false,
            quiet: false,
        }
    }
}

/// Reads `input` one line at a time and writes the tokens of each line to `output`.
///
/// Every line gets a fresh [`Lexer`]. Returns once `input` is exhausted.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, config: &ReplConfig) -> Result<(), Error> {
    let file = Rc::new(String::from("shell"));

    if !config.quiet {
        writeln!(output, "{}", BANNER).map_err(|e| output_failure(e, &file))?;
    }

    let mut line = Vec::new();

    loop {
        if !config.quiet {
            write!(output, "{}", config.prompt).map_err(|e| output_failure(e, &file))?;
            output.flush().map_err(|e| output_failure(e, &file))?;
        }

        line.clear();
        let read = input.read_until(b'\n', &mut line).map_err(|e| {
            Error::new(
                ErrorImpl::InputFailure {
                    message: e.to_string(),
                },
                Position(0, Rc::clone(&file)),
            )
        })?;

        if read == 0 {
            debug!("end of input");
            return Ok(());
        }

        debug!(len = read, "read line");
        print_tokens(strip_line_ending(&line), &mut output, config, &file)?;
    }
}

/// Tokenizes the whole file at `path` and writes its tokens to `output`.
///
/// Returns `Ok(false)` when `deny_illegal` is set and the file holds an illegal token;
/// the diagnostic has then been written in place of the tokens.
pub fn run_file<W: Write>(path: &Path, mut output: W, config: &ReplConfig) -> Result<bool, Error> {
    let file = Rc::new(path.display().to_string());

    let source = fs::read(path).map_err(|e| {
        Error::new(
            ErrorImpl::ReadFailure {
                path: file.to_string(),
                message: e.to_string(),
            },
            Position(0, Rc::clone(&file)),
        )
    })?;

    debug!(path = %file, len = source.len(), "tokenizing file");
    print_tokens(&source, &mut output, config, &file)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn print_tokens<W: Write>(
    source: &[u8],
    output: &mut W,
    config: &ReplConfig,
    file: &Rc<String>,
) -> Result<bool, Error> {
    if config.deny_illegal {
        let tokens = tokenize_spanned(source);

        if let Err(error) = check_tokens(&tokens, Rc::clone(file)) {
            write!(output, "{}", render_error(&error, source)).map_err(|e| output_failure(e, file))?;
            return Ok(false);
        }

        for (_, token) in tokens.iter().filter(|(_, token)| !token.is_eof()) {
            writeln!(output, "{}", token).map_err(|e| output_failure(e, file))?;
        }

        return Ok(true);
    }

    let mut lexer = Lexer::from_bytes(source);

    loop {
        let token = lexer.next_token();
        if token.is_eof() {
            return Ok(true);
        }

        writeln!(output, "{}", token).map_err(|e| output_failure(e, file))?;
    }
}

fn output_failure(error: std::io::Error, file: &Rc<String>) -> Error {
    Error::new(
        ErrorImpl::OutputFailure {
            message: error.to_string(),
        },
        Position(0, Rc::clone(file)),
    )
}
