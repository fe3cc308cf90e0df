use mlblob::{blob::BlobSource, driver, fixture::bundled_source};

use std::{io, path::PathBuf, process::exit};

use clap::{ArgAction, Parser};
use log::{error, LevelFilter};
use simple_logger::{set_up_color_terminal, SimpleLogger};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "mlblob",
    about = "Prints a model blob as a C array and a DeviceScript hex literal"
)]
struct Cli {
    /// Raw model file to encode instead of the bundled model
    #[clap(short = 'i', long, value_name = "FILE", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// File holding the model as hex text
    #[clap(long, value_name = "FILE")]
    hex: Option<PathBuf>,

    /// Log more, repeat for more detail
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Cli::parse();

    set_up_color_terminal();
    let logger = SimpleLogger::new()
        .without_timestamps()
        .with_level(level_filter(args.verbose));
    let max_level = logger.max_level();

    log::set_max_level(max_level);
    if let Err(err) = log::set_boxed_logger(Box::new(logger)) {
        eprintln!("failed to set up logging: {}", err);
    }

    let source = match (args.input, args.hex) {
        (Some(path), _) => BlobSource::File(path),
        (None, Some(path)) => BlobSource::HexFile(path),
        (None, None) => bundled_source(),
    };

    let res = driver::run(Some(source), &mut io::stdout().lock());

    if let Err(err) = res {
        error!("{:#}", err);
        exit(1)
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
