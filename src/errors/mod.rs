//! Error types and error handling.
//!
//! The lexer itself never fails; these errors come from the layers around it:
//!
//! - Strict consumers that refuse `ILLEGAL` tokens
//! - Reading source files and the interactive input stream
//! - Error formatting with a name and an optional tip

pub mod errors;

#[cfg(test)]
mod tests;
