use clap::Parser;
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use mapdir_tools::{convert, ConvertConfig, ConvertError, MapDirLibrary};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "converter", version, about = "tw map mapDir to .map converter")]
struct Args {
    /// path to mapDir map
    #[arg(short = 'i', value_name = "MAP DIR")]
    input_path: PathBuf,
    /// output path for .map file
    #[arg(short = 'o', value_name = "MAP FILE")]
    output_path: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<ErrorLevel>,
}

fn main() -> Result<(), ConvertError> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let config = ConvertConfig::new(&args.input_path, args.output_path);
    let mut stdout = std::io::stdout().lock();
    convert(&config, &MapDirLibrary, &mut stdout)
}
