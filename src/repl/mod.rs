//! Interactive driver.
//!
//! Feeds input to the lexer one line at a time and prints each token,
//! or tokenizes a whole file in one go.

pub mod repl;
