//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_CHAR_TOKEN!` - Creates a Token whose literal is a single byte

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's source text
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr) => {
        Token {
            kind: $kind,
            literal: $literal,
        }
    };
}

/// Creates a Token from a single input byte.
///
/// The byte is widened to a `char`, so bytes above 0x7F still produce a
/// one-character literal.
///
/// # Example
///
/// ```ignore
/// let token = MK_CHAR_TOKEN!(TokenKind::Plus, b'+');
/// ```
#[macro_export]
macro_rules! MK_CHAR_TOKEN {
    ($kind:expr, $ch:expr) => {
        $crate::MK_TOKEN!($kind, String::from($ch as char))
    };
}
