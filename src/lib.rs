#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, sync::Once};

use tracing::warn;

use crate::{
    errors::errors::{Error, ErrorImpl, ErrorTip},
    lexer::tokens::Token,
};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod repl;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    /// Offsets past `u32::MAX` saturate.
    pub fn from_offset(offset: usize, file: Rc<String>) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX), file)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Rejects the first `ILLEGAL` token in `tokens`, reporting where it starts.
pub fn check_tokens(tokens: &[(usize, Token)], file: Rc<String>) -> Result<(), Error> {
    match tokens.iter().find(|(_, token)| token.is_illegal()) {
        Some((offset, token)) => {
            warn!(offset, literal = %token.literal.escape_default(), "illegal token");
            Err(Error::new(
                ErrorImpl::IllegalToken {
                    token: token.literal.clone(),
                },
                Position::from_offset(*offset, file),
            ))
        }
        None => Ok(()),
    }
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text (including its newline) and the
/// character column of `position` within that line. Invalid UTF-8 is replaced with
/// U+FFFD, each bad sequence counting as one column. `None` when `position` is past the end.
pub fn get_line_at_position(source: &[u8], position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive(|byte| *byte == b'\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let column = String::from_utf8_lossy(&line[..pos - start]).chars().count();
            return Some((index + 1, String::from_utf8_lossy(line).into_owned(), column));
        }

        start = end;
    }

    None
}

/// Renders `error` against `source` as a header, a file marker and a caret line.
///
/// ```text
/// Error: IllegalToken (Unrecognised character `@`)
/// -> shell
///   |
/// 1 | 1 @ 2
///   | --^
/// ```
pub fn render_error(error: &Error, source: &[u8]) -> String {
    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use crate::{
        check_tokens,
        errors::errors::{Error, ErrorImpl},
        lexer::lexer::tokenize_spanned,
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = b"Hello, world!\nlet x = 1;\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert!(super::get_line_at_position(source, 400).is_none());
    }

    #[test]
    fn test_render_error() {
        let error = Error::new(
            ErrorImpl::IllegalToken {
                token: "@".to_string(),
            },
            Position(2, Rc::new("shell".to_string())),
        );

        assert_eq!(
            super::render_error(&error, b"1 @ 2"),
            "Error: IllegalToken (Unrecognised character `@`)\n-> shell\n  |\n1 | 1 @ 2\n  | --^\n"
        );
    }

    #[test]
    fn test_render_error_strips_indentation() {
        let error = Error::new(
            ErrorImpl::IllegalToken {
                token: "#".to_string(),
            },
            Position(15, Rc::new("main.mk".to_string())),
        );

        assert_eq!(
            super::render_error(&error, b"let a = 1;\n    #;\n"),
            "Error: IllegalToken (Unrecognised character `#`)\n-> main.mk\n  |\n2 | #;\n  | ^\n"
        );
    }

    #[test]
    fn test_check_tokens() {
        let file = Rc::new("shell".to_string());

        assert!(check_tokens(&tokenize_spanned("let x = 5;"), file.clone()).is_ok());

        let error = check_tokens(&tokenize_spanned("let x = 5 @ # 3;"), file).unwrap_err();
        assert_eq!(
            error.get_kind(),
            &ErrorImpl::IllegalToken {
                token: "@".to_string()
            }
        );
        assert_eq!(error.get_position().0, 10);
    }

    #[test]
    fn test_render_error_counts_columns_in_characters() {
        let error = Error::new(
            ErrorImpl::IllegalToken {
                token: "@".to_string(),
            },
            Position(5, Rc::new("shell".to_string())),
        );

        // `é` is two bytes and `\xff` is not UTF-8; both take one column
        assert_eq!(
            super::render_error(&error, b"\xc3\xa9 \xff @"),
            "Error: IllegalToken (Unrecognised character `@`)\n-> shell\n  |\n1 | é \u{fffd} @\n  | ----^\n"
        );
    }

    #[test]
    fn test_check_tokens_after_invalid_utf8() {
        let tokens = tokenize_spanned(b"1 \xff @");
        let error = check_tokens(&tokens, Rc::new("shell".to_string())).unwrap_err();

        assert_eq!(
            error.get_kind(),
            &ErrorImpl::IllegalToken {
                token: String::from(0xFFu8 as char)
            }
        );
        assert_eq!(error.get_position().0, 2);
    }
}
