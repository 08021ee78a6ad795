//! Converts maps in the directory based MapDir layout into single packed map
//! files, and packed maps back into MapDir directories.

mod config;
mod convert;
mod error;
mod game_layer;
mod library;
mod mapdir;
mod packed;

pub use config::{normalize_path, ConvertConfig};
pub use convert::convert;
pub use error::{ConvertError, MapError};
pub use game_layer::{BlockGrid, BlockType, Tile, FREEZE_TILE, HOOKABLE_TILE};
pub use library::{MapDirLibrary, MapHandle, MapLibrary};
pub use mapdir::{Group, Layer, MapDir, MapInfo, MapVersion, DEFAULT_AUTHOR};
