use std::path::{Component, Path, PathBuf};

/// Paths for a single conversion run.
///
/// The input path is normalized once on construction; the output path is kept
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConvertConfig {
    pub fn new(input_path: impl AsRef<Path>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: normalize_path(input_path.as_ref()),
            output_path: output_path.into(),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Last segment of the normalized input path. Only used for display.
    pub fn map_name(&self) -> Option<&str> {
        self.input_path.file_name().and_then(|name| name.to_str())
    }
}

/// Lexically normalizes `path`: drops `.` segments and redundant separators and
/// collapses `name/..` pairs. `..` directly below the root is dropped, leading
/// `..` of a relative path is kept. The filesystem is never touched, so
/// symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
