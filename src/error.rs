use std::io::Error as IOError;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("IO: {0}")]
    IO(#[from] IOError),

    #[error("Zip: {0}")]
    Zip(#[from] ZipError),

    #[error("Json in `{file}`: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("given path `{0}` not a valid folder")]
    NotAFolder(PathBuf),
    #[error("`{0}` file missing")]
    MissingFile(String),
    #[error("unsupported map version `{0}`")]
    UnsupportedVersion(String),
    #[error("invalid entry name `{0}`")]
    InvalidEntryName(String),
    #[error("duplicate index {index} in `{parent}`")]
    DuplicateIndex { parent: String, index: u32 },
    #[error("`{file}`: {reason}")]
    InvalidContent { file: String, reason: &'static str },

    #[error("missing magic number")]
    MissingMagicNumber,
    #[error("invalid content pointer offsets")]
    InvalidOffsets,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("can't load map `{path}`: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: MapError,
    },
    #[error("can't save map to `{path}`: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: MapError,
    },
    #[error("can't write progress: {0}")]
    Output(#[from] IOError),
}
