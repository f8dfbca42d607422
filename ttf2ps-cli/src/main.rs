use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttf2ps::{convert_to_vec, ConversionOptions, FontType, TrueTypeFont};

#[derive(Parser)]
#[command(
    name = "ttf2ps",
    about = "Convert a TrueType font to a PostScript Type 42 or Type 3 font",
    version,
    author
)]
struct Cli {
    /// Write a Type 3 font with every glyph decomposed into paths
    #[arg(long, conflicts_with = "type42")]
    type3: bool,

    /// Write a Type 42 font embedding the TrueType outlines (default)
    #[arg(long)]
    type42: bool,

    /// Print the font's PostScript name instead of converting it
    #[arg(long, conflicts_with_all = ["type3", "type42"])]
    psname: bool,

    /// Log table loading and conversion details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// TrueType font file
    filename: PathBuf,
}

impl Cli {
    fn font_type(&self) -> FontType {
        if self.type3 {
            FontType::Type3
        } else {
            FontType::Type42
        }
    }
}

/// Where a run failed, which decides the exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Open,
    Convert,
    Cleanup,
}

impl Stage {
    fn exit_code(self) -> u8 {
        match self {
            Stage::Open => 2,
            Stage::Convert => 3,
            Stage::Cleanup => 4,
        }
    }
}

struct Failure {
    stage: Stage,
    error: anyhow::Error,
}

trait StageContext<T> {
    fn at(self, stage: Stage) -> Result<T, Failure>;
}

impl<T> StageContext<T> for anyhow::Result<T> {
    fn at(self, stage: Stage) -> Result<T, Failure> {
        self.map_err(|error| Failure { stage, error })
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn write_stdout(data: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(data)?;
    stdout.flush()
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let mut font = TrueTypeFont::open(&cli.filename)
        .with_context(|| format!("cannot load font {}", cli.filename.display()))
        .at(Stage::Open)?;

    if cli.psname {
        let name = font
            .postscript_name()
            .context("cannot read the 'name' table")
            .at(Stage::Convert)?
            .ok_or_else(|| anyhow!("font has no Macintosh PostScript name"))
            .at(Stage::Convert)?;

        let mut line = name.as_bytes().to_vec();
        line.push(b'\n');
        write_stdout(&line)
            .context("cannot write to stdout")
            .at(Stage::Cleanup)?;
    } else {
        let options = ConversionOptions::new(cli.font_type());
        debug!(font_type = ?options.font_type, path = %cli.filename.display(), "converting");

        // Buffered so a failed conversion never leaves half a font on stdout
        let output = convert_to_vec(&mut font, &options)
            .with_context(|| format!("cannot convert {}", cli.filename.display()))
            .at(Stage::Convert)?;

        write_stdout(&output)
            .context("cannot write the font to stdout")
            .at(Stage::Cleanup)?;
    }

    font.close()
        .context("cannot close the font")
        .at(Stage::Cleanup)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("ttf2ps: {:#}", failure.error);
            ExitCode::from(failure.stage.exit_code())
        }
    }
}
