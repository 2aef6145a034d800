//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for a parser. It handles:
//!
//! - Single-pass scanning with one byte of lookahead for `==` and `!=`
//! - Recognition of keywords, identifiers, integers, operators and delimiters
//! - Unrecognised bytes, reported in-band as `ILLEGAL` tokens
//! - Whitespace skipping

pub mod lexer;
pub mod tokens;
