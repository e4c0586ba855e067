//! Token stream output formats.

use clap::ValueEnum;
use malco_lexers::Token;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `line:col Category "text"`, one token per line
    Text,
    /// A JSON array of token records
    Json,
}

#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    text: &'a str,
    line: usize,
    column: usize,
    offset: usize,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            kind: token.kind.dotted_name(),
            text: token.text(),
            line: token.position.line,
            column: token.position.column,
            offset: token.position.offset,
        }
    }
}

pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token], format: Format) -> io::Result<()> {
    match format {
        Format::Text => {
            for token in tokens {
                writeln!(
                    out,
                    "{} {} \"{}\"",
                    token.position,
                    token.kind.dotted_name(),
                    token.text().escape_debug()
                )?;
            }
        }
        Format::Json => {
            let records: Vec<TokenRecord<'_>> = tokens.iter().map(TokenRecord::from).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
