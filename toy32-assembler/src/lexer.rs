//! # Lexer for toy32 Assembly Language

use logos::Logos;

/// Tokens of a single source line
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace
#[logos(skip r";[^\n]*")] // Skip comments
pub enum Token {
    /// Directive (.data, .start, .<function>)
    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Directive(String),

    /// Identifier (mnemonics, registers, symbols)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal number
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    /// Hexadecimal number
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| i64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(i64),

    /// Comma (operand separator, ignored by the parser)
    #[token(",")]
    Comma,

    /// Equals sign in data definitions
    #[token("=")]
    Equals,

    /// Address-of prefix for data symbols
    #[token("&")]
    Ampersand,
}
