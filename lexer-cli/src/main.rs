//! `malco-lex`: prints the token stream of a Malco or Rasm source file.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use malco_lexers::{registry, Language};
use render::Format;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "malco-lex")]
#[command(version)]
#[command(about = "Tokenize Malco or Radix assembler source")]
struct Cli {
    /// Source file, or `-` for standard input
    #[arg(value_name = "FILE", default_value = "-")]
    input: PathBuf,

    /// Lexer alias; chosen from the file name when omitted
    #[arg(short, long, value_name = "ALIAS")]
    lexer: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List the available lexers and exit
    #[arg(long)]
    list: bool,
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    fn language(&self) -> Result<Language> {
        if let Some(alias) = &self.lexer {
            return Ok(registry::find_by_alias(alias)?);
        }
        if self.reads_stdin() {
            anyhow::bail!("reading standard input requires --lexer");
        }
        let path = self.input.to_string_lossy();
        Ok(registry::find_for_filename(&path)?)
    }

    fn read_source(&self) -> Result<String> {
        if self.reads_stdin() {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            return Ok(source);
        }
        std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();
}

fn list_lexers() {
    for language in registry::all() {
        let info = language.info();
        println!(
            "{:<8} {} ({})",
            language.alias(),
            info.name,
            info.filenames.join(", ")
        );
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list {
        list_lexers();
        return Ok(());
    }

    let language = cli.language()?;
    let source = cli.read_source()?;
    info!(lexer = language.alias(), bytes = source.len(), "tokenizing");

    let tokens: Vec<_> = language.tokenize(source).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_tokens(&mut out, &tokens, cli.format).context("failed to write tokens")?;
    Ok(())
}
