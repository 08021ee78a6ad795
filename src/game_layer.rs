use serde::Serialize;

pub const HOOKABLE_TILE: u32 = 1;
pub const FREEZE_TILE: u32 = 9;

/// Kind of a cell in a generated block grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Hookable,
    Unhookable,
    Freeze,
    Empty,
    Obstacle,
}

impl BlockType {
    /// Game layer tile id, or `None` for blocks that leave the tile empty.
    pub fn tile_id(self) -> Option<u32> {
        match self {
            Self::Hookable => Some(HOOKABLE_TILE),
            Self::Freeze => Some(FREEZE_TILE),
            Self::Unhookable | Self::Empty | Self::Obstacle => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub id: u32,
    pub mirrored: bool,
    pub rotation: u32,
}

impl Tile {
    pub fn new(x: u32, y: u32, id: u32) -> Self {
        Self {
            x,
            y,
            id,
            mirrored: false,
            rotation: 0,
        }
    }
}

/// Column-major grid of blocks, `blocks[x * height + y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    blocks: Vec<BlockType>,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocks: vec![BlockType::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<BlockType> {
        self.index(x, y).map(|index| self.blocks[index])
    }

    /// Returns `false` if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, block: BlockType) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.blocks[index] = block;
                true
            }
            None => false,
        }
    }

    /// Game layer tiles of the grid. Columns go left to right and each
    /// column bottom to top, since the game's y axis points down.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for x in 0..self.width {
            for y in (0..self.height).rev() {
                if let Some(id) = self.get(x, y).and_then(BlockType::tile_id) {
                    tiles.push(Tile::new(x, y, id));
                }
            }
        }
        tiles
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x as usize * self.height as usize + y as usize)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VersionObject<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub created_by: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct StringPosition<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IntPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroupObject<'a> {
    pub name: &'a str,
    pub offset: StringPosition<'a>,
    pub parallax: IntPosition,
    pub clipping: bool,
    pub clip: StringPosition<'a>,
    pub clip_size: StringPosition<'a>,
}

impl GroupObject<'static> {
    pub fn game() -> Self {
        Self {
            name: "Game",
            offset: StringPosition { x: "0", y: "0" },
            parallax: IntPosition { x: 100, y: 100 },
            clipping: false,
            clip: StringPosition { x: "0", y: "0" },
            clip_size: StringPosition { x: "0", y: "0" },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LayerObject<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub width: u32,
    pub height: u32,
    pub tiles: &'a [Tile],
}
