use anyhow::Result;
use brewery_sheet::spreadsheet::DEFAULT_FILE_NAME;
use brewery_sheet::text::resolve_encoding;
use brewery_sheet::ConvertOptions;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Convert a pasted brewery list into an Excel workbook
#[derive(Parser, Debug)]
#[command(name = "brewery_sheet", version, about)]
struct Cli {
    /// Text file with one `<ordinal> <name> (<location>)` entry per line
    input: PathBuf,

    /// Workbook to create, replacing any existing file
    #[arg(default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Encoding of the input file, as a label (utf-8, latin1, ...) or Windows code page
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ConvertOptions {
        input: cli.input,
        output: cli.output,
        encoding: resolve_encoding(&cli.encoding)?,
    };

    let rows = brewery_sheet::convert(&options)?;
    info!(rows, output = %options.output.display(), "done");
    Ok(())
}
