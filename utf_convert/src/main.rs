use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use utf_flow::{Strict, Trusted, Validate};

mod encoding;
mod input;
mod logging;
mod output;

use encoding::Encoding;
use output::Output;

/// Converts text between UTF-8, UTF-16, and code points.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Skip validation of code points and code units.
    ///
    /// Only use this for input that is known to be valid. Out-of-range values
    /// then produce unspecified output instead of an error. Malformed UTF-8
    /// is still reported.
    #[arg(long, global = true)]
    trusted: bool,

    /// Override whether this program outputs color.
    ///
    /// Auto-detection is performed, but in case it is wrong, you may use this
    /// to override the default.
    #[arg(long, global = true)]
    color: Option<bool>,

    /// Log more details. May be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Converts text from one encoding to another.
    Convert {
        /// The encoding of the input.
        #[arg(short, long)]
        from: Encoding,

        /// The encoding of the output.
        #[arg(short, long)]
        to: Encoding,

        /// The input file. Reads stdin if not specified.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// The output file. Writes to stdout if not specified.
        ///
        /// The file is created or truncated.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Counts the code points of the input and its length as UTF-8.
    Count {
        /// The encoding of the input.
        #[arg(short, long, default_value = "utf8")]
        from: Encoding,

        /// The input file. Reads stdin if not specified.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.color, cli.verbose)?;

    match option_env!("GIT_HASH") {
        Some(git_hash) => log::debug!("UTF Convert [Commit: {git_hash}]"),
        None => log::debug!("UTF Convert [Unknown Commit]"),
    }

    let res = if cli.trusted {
        log::warn!("Input validation is disabled.");
        run::<Trusted>(cli.command)
    } else {
        run::<Strict>(cli.command)
    };

    log::logger().flush();
    res
}

fn run<V: Validate>(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            from,
            to,
            input,
            output,
        } => convert::<V>(from, to, input.as_deref(), output.as_deref()),
        Command::Count { from, input } => count::<V>(from, input.as_deref()),
    }
}

fn convert<V: Validate>(
    from: Encoding,
    to: Encoding,
    input: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let reader = open_input(input)?;
    let mut out = Output::<V, _>::new(to, open_output(output)?);

    let read = input::read_code_points::<V, _, _>(from, reader, &mut out)?;
    let written = out.finish().context("cannot write output")?;

    log::info!(
        "Converted {read} bytes and {written} code points from {from:?} to {to:?} in {:.2?}.",
        start.elapsed(),
    );
    Ok(())
}

fn count<V: Validate>(from: Encoding, input: Option<&Path>) -> anyhow::Result<()> {
    let reader = open_input(input)?;

    let len = input::measure::<V, _>(from, reader)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "code points: {}", len.code_points)?;
    writeln!(stdout, "utf-8 bytes: {}", len.bytes)?;
    Ok(())
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input `{}`", path.display()))?;
            Box::new(BufReader::new(file))
        },
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output `{}`", path.display()))?;
            Box::new(BufWriter::new(file))
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_convert() {
        let args = [
            "utf_convert", "convert", "--from", "utf16le", "--to", "points", "--trusted",
        ];
        let cli = Cli::try_parse_from(args).expect("valid arguments");

        assert!(cli.trusted, "global flag after the subcommand");
        match cli.command {
            Command::Convert {
                from,
                to,
                input,
                output,
            } => {
                assert_eq!(from, Encoding::Utf16le);
                assert_eq!(to, Encoding::Points);
                assert_eq!(input, None);
                assert_eq!(output, None);
            },
            command => panic!("incorrect command: {command:?}"),
        }
    }

    #[test]
    fn parse_count_default() {
        let cli = Cli::try_parse_from(["utf_convert", "-vv", "count"]).expect("valid arguments");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Count { from, .. } => assert_eq!(from, Encoding::Utf8),
            command => panic!("incorrect command: {command:?}"),
        }
    }

    #[test]
    fn parse_rejects_unknown_encoding() {
        Cli::try_parse_from(["utf_convert", "convert", "--from", "latin1", "--to", "utf8"])
            .expect_err("unknown encoding");
    }
}
