use crate::error::MapError;
use crate::game_layer::{GroupObject, LayerObject, Tile, VersionObject};
use crate::packed::{read_packed, write_packed};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

const VERSION_FILE: &str = "version.json";
const INFO_FILE: &str = "info.json";
const GROUPS_DIR: &str = "groups";
const GROUP_FILE: &str = "group.json";
const LAYERS_DIR: &str = "layers";
const GAME_GROUP_DIR: &str = "0_Game";
const GAME_LAYER_FILE: &str = "0_Game.json";

pub const DEFAULT_AUTHOR: &str = "iMilchshake";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapVersion {
    DDNet06,
    Teeworlds07,
}

impl MapVersion {
    fn parse(kind: &str) -> Result<Self, MapError> {
        match kind {
            "ddnet06" => Ok(Self::DDNet06),
            "teeworlds07" => Ok(Self::Teeworlds07),
            other => Err(MapError::UnsupportedVersion(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapInfo {
    pub author: String,
    pub version: String,
    pub credits: String,
    pub license: String,
    pub settings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GroupFile {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LayerFile {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub index: u32,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub index: u32,
    pub name: String,
    pub layers: Vec<Layer>,
}

/// A map in the MapDir layout, held in memory.
///
/// Every file found under the map directory is kept verbatim, keyed by its
/// `/`-separated path relative to the map root. The metadata fields are what
/// the layout check extracted from those files.
#[derive(Debug, Clone)]
pub struct MapDir {
    version: MapVersion,
    info: MapInfo,
    groups: Vec<Group>,
    files: BTreeMap<String, Vec<u8>>,
}

impl MapDir {
    /// Reads a MapDir directory.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        if !path.is_dir() {
            return Err(MapError::NotAFolder(path.to_path_buf()));
        }

        let mut files = BTreeMap::new();
        let dir = walkdir::WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name();

        for entry in dir {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let entry_path = entry.path();
            let relative = entry_path
                .strip_prefix(path)
                .map_err(|_| MapError::InvalidEntryName(entry_path.display().to_string()))?;
            let name = entry_name(relative)?;
            files.insert(name, std::fs::read(entry_path)?);
        }

        Self::from_files(files)
    }

    /// Builds a `ddnet06` map with a single `Game` group holding one game
    /// layer of `width` x `height` with `tiles`.
    pub fn from_game_layer(width: u32, height: u32, tiles: &[Tile]) -> Result<Self, MapError> {
        let info = MapInfo {
            author: DEFAULT_AUTHOR.to_string(),
            ..MapInfo::default()
        };
        Self::from_game_layer_with_info(&info, width, height, tiles)
    }

    pub fn from_game_layer_with_info(
        info: &MapInfo,
        width: u32,
        height: u32,
        tiles: &[Tile],
    ) -> Result<Self, MapError> {
        let group_path = format!("{GROUPS_DIR}/{GAME_GROUP_DIR}");
        let version = VersionObject {
            kind: "ddnet06",
            created_by: "",
        };
        let layer = LayerObject {
            kind: "game",
            width,
            height,
            tiles,
        };

        let mut files = BTreeMap::new();
        files.insert(VERSION_FILE.to_string(), to_json(VERSION_FILE, &version)?);
        files.insert(INFO_FILE.to_string(), to_json(INFO_FILE, info)?);
        let group_file = format!("{group_path}/{GROUP_FILE}");
        let group = to_json(&group_file, &GroupObject::game())?;
        files.insert(group_file, group);
        let layer_file = format!("{group_path}/{LAYERS_DIR}/{GAME_LAYER_FILE}");
        let layer = to_json(&layer_file, &layer)?;
        files.insert(layer_file, layer);

        Self::from_files(files)
    }

    /// Reads a packed map written by [`MapDir::save_packed`].
    pub fn load_packed(path: &Path) -> Result<Self, MapError> {
        Self::from_files(read_packed(path)?)
    }

    /// Checks the layout of `files` and builds the map from them.
    pub fn from_files(files: BTreeMap<String, Vec<u8>>) -> Result<Self, MapError> {
        let version: VersionFile = parse_json(&files, VERSION_FILE)?;
        let version = MapVersion::parse(&version.kind)?;
        let info: MapInfo = parse_json(&files, INFO_FILE)?;
        let groups = collect_groups(&files)?;

        log::debug!(
            "map layout ok: {} groups, {} layers, {} files",
            groups.len(),
            groups.iter().map(|group| group.layers.len()).sum::<usize>(),
            files.len()
        );

        Ok(Self {
            version,
            info,
            groups,
            files,
        })
    }

    pub fn save_packed(&self, path: &Path) -> Result<(), MapError> {
        write_packed(&self.files, path)
    }

    /// Writes the map back out as a MapDir directory tree below `path`.
    pub fn save_dir(&self, path: &Path) -> Result<(), MapError> {
        for (name, content) in &self.files {
            let mut file_path = path.to_path_buf();
            file_path.extend(name.split('/'));
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file_path, content)?;
        }
        Ok(())
    }

    pub fn version(&self) -> MapVersion {
        self.version
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    /// Groups in index order, each with its layers in index order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }
}

fn entry_name(relative: &Path) -> Result<String, MapError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            return Err(MapError::InvalidEntryName(relative.display().to_string()));
        };
        let part = part
            .to_str()
            .ok_or_else(|| MapError::InvalidEntryName(relative.display().to_string()))?;
        parts.push(part);
    }
    if parts.is_empty() {
        return Err(MapError::InvalidEntryName(relative.display().to_string()));
    }
    Ok(parts.join("/"))
}

fn to_json<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Vec<u8>, MapError> {
    serde_json::to_vec_pretty(value).map_err(|source| MapError::Json {
        file: name.to_string(),
        source,
    })
}

fn parse_json<T: DeserializeOwned>(
    files: &BTreeMap<String, Vec<u8>>,
    name: &str,
) -> Result<T, MapError> {
    let content = files
        .get(name)
        .ok_or_else(|| MapError::MissingFile(name.to_string()))?;
    serde_json::from_slice(content).map_err(|source| MapError::Json {
        file: name.to_string(),
        source,
    })
}

/// Splits `<index>_<name>` into its parts.
fn parse_indexed_name(name: &str) -> Option<(u32, &str)> {
    let (index, rest) = name.split_once('_')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((index.parse().ok()?, rest))
}

fn collect_groups(files: &BTreeMap<String, Vec<u8>>) -> Result<Vec<Group>, MapError> {
    let mut group_dirs: BTreeMap<u32, (&str, Vec<&str>)> = BTreeMap::new();

    let group_prefix = format!("{GROUPS_DIR}/");
    for name in files.keys() {
        let Some(rest) = name.strip_prefix(&group_prefix) else {
            continue;
        };
        let parts: Vec<&str> = rest.split('/').collect();
        // hidden files (`.DS_Store` and friends) are carried but not checked
        if parts.iter().any(|part| part.starts_with('.')) {
            continue;
        }
        let dir = parts[0];
        let (index, _) =
            parse_indexed_name(dir).ok_or_else(|| MapError::InvalidEntryName(name.clone()))?;

        let slot = group_dirs.entry(index).or_insert((dir, Vec::new()));
        if slot.0 != dir {
            return Err(MapError::DuplicateIndex {
                parent: GROUPS_DIR.to_string(),
                index,
            });
        }

        match parts.as_slice() {
            [_, file] if *file == GROUP_FILE => {}
            [_, layers, layer] if *layers == LAYERS_DIR => slot.1.push(*layer),
            _ => return Err(MapError::InvalidEntryName(name.clone())),
        }
    }

    let mut groups = Vec::with_capacity(group_dirs.len());
    for (index, (dir, layer_files)) in group_dirs {
        let group_path = format!("{GROUPS_DIR}/{dir}");
        let header: GroupFile = parse_json(files, &format!("{group_path}/{GROUP_FILE}"))?;
        let layers = collect_layers(files, &group_path, &layer_files)?;
        groups.push(Group {
            index,
            name: header.name,
            layers,
        });
    }
    Ok(groups)
}

fn collect_layers(
    files: &BTreeMap<String, Vec<u8>>,
    group_path: &str,
    layer_files: &[&str],
) -> Result<Vec<Layer>, MapError> {
    let layers_path = format!("{group_path}/{LAYERS_DIR}");
    let mut layers = BTreeMap::new();

    for file in layer_files {
        let full_name = format!("{layers_path}/{file}");
        let stem = file
            .strip_suffix(".json")
            .ok_or_else(|| MapError::InvalidEntryName(full_name.clone()))?;
        let (index, name) =
            parse_indexed_name(stem).ok_or_else(|| MapError::InvalidEntryName(full_name.clone()))?;

        let header: LayerFile = parse_json(files, &full_name)?;
        if header.kind.is_empty() {
            return Err(MapError::InvalidContent {
                file: full_name,
                reason: "empty layer type",
            });
        }

        let layer = Layer {
            index,
            name: name.to_string(),
            kind: header.kind,
        };
        if layers.insert(index, layer).is_some() {
            return Err(MapError::DuplicateIndex {
                parent: layers_path,
                index,
            });
        }
    }

    Ok(layers.into_values().collect())
}
