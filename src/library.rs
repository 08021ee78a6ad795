use crate::error::MapError;
use crate::mapdir::MapDir;
use std::path::Path;

/// Something that can read a map from a MapDir directory.
pub trait MapLibrary {
    type Map: MapHandle;

    fn load(&self, path: &Path) -> Result<Self::Map, MapError>;
}

/// A loaded map. The converter never looks inside, it only saves it.
pub trait MapHandle {
    fn save(&self, path: &Path) -> Result<(), MapError>;
}

/// Loads [`MapDir`] directories and saves them as packed maps.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapDirLibrary;

impl MapLibrary for MapDirLibrary {
    type Map = MapDir;

    fn load(&self, path: &Path) -> Result<MapDir, MapError> {
        MapDir::load(path)
    }
}

impl MapHandle for MapDir {
    fn save(&self, path: &Path) -> Result<(), MapError> {
        self.save_packed(path)
    }
}
