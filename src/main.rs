//! CLI tool to dump the token stream of Toy source files.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use toy_lexer::{Lexer, ReaderLines, SpannedToken, TokenValue, drain};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "toylex",
    about = "Print the tokens of Toy source files",
    version
)]
struct Cli {
    /// Source files to tokenize; `-` or none reads stdin
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Print integer token codes instead of token names
    #[arg(long)]
    codes: bool,

    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log filter such as \"debug\" or \"toy_lexer=trace\"; overrides RUST_LOG"
    )]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let stdin_only = [PathBuf::from("-")];
    let files = if cli.files.is_empty() {
        &stdin_only[..]
    } else {
        &cli.files[..]
    };

    let mut out = io::stdout().lock();
    let mut had_error = false;

    for path in files {
        let result = if path.as_os_str() == "-" {
            dump(io::stdin().lock(), "<stdin>", cli.codes, &mut out)
        } else {
            let name = path.display().to_string();
            fs::File::open(path)
                .and_then(|file| dump(io::BufReader::new(file), &name, cli.codes, &mut out))
        };

        if let Err(e) = result {
            eprintln!("{}: {e}", path.display());
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// `--log-level` wins over `RUST_LOG`; warnings only by default.
fn init_logging(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn dump<R: BufRead>(reader: R, name: &str, codes: bool, out: &mut impl Write) -> io::Result<()> {
    tracing::debug!(file = name, "tokenizing");
    let mut lexer = Lexer::with_provider(ReaderLines::new(reader), name);
    let tokens = drain(&mut lexer);
    for token in &tokens {
        write_token(out, token, codes)?;
    }

    tracing::debug!(file = name, tokens = tokens.len(), "done");
    lexer.provider_mut().take_error().map_or(Ok(()), Err)
}

fn write_token(out: &mut impl Write, token: &SpannedToken, codes: bool) -> io::Result<()> {
    write!(out, "{}\t", token.location)?;
    if codes {
        write!(out, "{}", token.token.code())?;
    } else {
        write!(out, "{}", token.token)?;
    }
    if token.value != TokenValue::None {
        write!(out, "\t{}", token.value)?;
    }
    writeln!(out)
}
