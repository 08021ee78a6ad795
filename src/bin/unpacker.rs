use clap::Parser;
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use mapdir_tools::{MapDir, MapError};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "unpacker", version, about = "packed .map to tw map mapDir converter")]
struct Args {
    #[arg(value_name = "MAP FILE")]
    map_path: PathBuf,
    #[arg(short = 'o', default_value = "unpacked")]
    out_path: PathBuf,
    /// remove the output directory first
    #[arg(short = 'c')]
    clear_path: bool,

    #[command(flatten)]
    verbose: Verbosity<ErrorLevel>,
}

fn main() -> Result<(), MapError> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    if args.clear_path && args.out_path.exists() {
        if args.out_path.is_dir() {
            if let Err(e) = std::fs::remove_dir_all(&args.out_path) {
                log::warn!("can't clear path: `{e}`");
            }
        } else {
            log::warn!("can't clear path: not a dir");
        }
    }

    let beg = std::time::Instant::now();
    let map = MapDir::load_packed(&args.map_path)?;
    map.save_dir(&args.out_path)?;
    log::info!("unpacked in {}ms", beg.elapsed().as_millis());

    println!(
        "unpacked {} into {}",
        args.map_path.display(),
        args.out_path.display()
    );
    Ok(())
}
