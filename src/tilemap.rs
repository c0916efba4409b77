/// Background tile map.
///
/// A map is a stack of layers drawn bottom to top.  Maps come either from a
/// small text format (see [`TileMap::parse`]) or from [`TileMap::generate`],
/// which lays out a meadow from an injected RNG so a seed reproduces it.

use std::path::Path;

use rand::Rng;

use crate::constants::DEFAULT_TILE_SIZE;
use crate::error::{GameError, TileMapError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Grass,
    TallGrass,
    Flower,
    Dirt,
    Stone,
    Water,
    Fence,
}

impl Tile {
    /// Text-format glyph → tile.  `None` for empty cells and unknown glyphs;
    /// use [`Tile::is_empty_glyph`] to tell them apart.
    pub fn from_glyph(glyph: char) -> Option<Tile> {
        match glyph {
            ',' => Some(Tile::Grass),
            '"' => Some(Tile::TallGrass),
            '*' => Some(Tile::Flower),
            '#' => Some(Tile::Dirt),
            'o' => Some(Tile::Stone),
            '~' => Some(Tile::Water),
            '|' => Some(Tile::Fence),
            _ => None,
        }
    }

    pub fn is_empty_glyph(glyph: char) -> bool {
        glyph == ' ' || glyph == '.'
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` cells.
    cells: Vec<Option<Tile>>,
}

impl Layer {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Layer {
            name: name.into(),
            visible: true,
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn get(&self, gx: u32, gy: u32) -> Option<Tile> {
        if gx >= self.width || gy >= self.height {
            return None;
        }
        self.cells[(gy * self.width + gx) as usize]
    }

    pub fn set(&mut self, gx: u32, gy: u32, tile: Option<Tile>) {
        if gx < self.width && gy < self.height {
            self.cells[(gy * self.width + gx) as usize] = tile;
        }
    }

    /// Occupied cells as `(grid_x, grid_y, tile)`, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, Tile)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|tile| (i as u32 % width, i as u32 / width, tile))
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    /// Tile size in world units.
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: Vec<Layer>,
}

impl TileMap {
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.visible)
    }

    /// Occupied cells of `layer`, or nothing when the layer is hidden.
    pub fn visible_tiles<'a>(
        &self,
        layer: &'a Layer,
    ) -> impl Iterator<Item = (u32, u32, Tile)> + 'a {
        let visible = layer.visible;
        layer.tiles().filter(move |_| visible)
    }

    pub fn load(path: &Path) -> Result<TileMap, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::TileMap {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    /// Parse the text format:
    ///
    /// ```text
    /// tile 32 32
    /// [ground]
    /// ,,,,"",,
    /// [decor hidden]
    ///   *   o
    /// ```
    ///
    /// The optional `tile W H` header must come first.  Short rows are
    /// padded with empty cells.
    pub fn parse(text: &str) -> Result<TileMap, TileMapError> {
        let mut tile_width = DEFAULT_TILE_SIZE;
        let mut tile_height = DEFAULT_TILE_SIZE;
        // (name, visible, rows)
        let mut raw: Vec<(String, bool, Vec<Vec<Option<Tile>>>)> = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let trimmed = line.trim_end();

            if raw.is_empty() && trimmed.trim_start().starts_with("tile") {
                let mut parts = trimmed.split_whitespace().skip(1);
                let w = parts.next().and_then(|p| p.parse::<u32>().ok());
                let h = parts.next().and_then(|p| p.parse::<u32>().ok());
                match (w, h, parts.next()) {
                    (Some(w), Some(h), None) if w > 0 && h > 0 => {
                        tile_width = w;
                        tile_height = h;
                    }
                    _ => return Err(TileMapError::Header { line: line_no }),
                }
                continue;
            }

            if let Some(heading) = trimmed
                .trim_start()
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                let mut words = heading.split_whitespace();
                let name = words.next().unwrap_or("layer").to_string();
                let visible = !words.any(|w| w == "hidden");
                raw.push((name, visible, Vec::new()));
                continue;
            }

            let Some((_, _, rows)) = raw.last_mut() else {
                if trimmed.is_empty() {
                    continue;
                }
                return Err(TileMapError::RowOutsideLayer { line: line_no });
            };

            let mut row = Vec::with_capacity(trimmed.len());
            for glyph in trimmed.chars() {
                if Tile::is_empty_glyph(glyph) {
                    row.push(None);
                } else {
                    match Tile::from_glyph(glyph) {
                        Some(tile) => row.push(Some(tile)),
                        None => return Err(TileMapError::UnknownGlyph { line: line_no, glyph }),
                    }
                }
            }
            rows.push(row);
        }

        if raw.is_empty() {
            return Err(TileMapError::Empty);
        }

        let layers = raw
            .into_iter()
            .map(|(name, visible, rows)| {
                let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
                let mut layer = Layer::new(name, width, rows.len() as u32);
                layer.visible = visible;
                for (gy, row) in rows.into_iter().enumerate() {
                    for (gx, cell) in row.into_iter().enumerate() {
                        layer.set(gx as u32, gy as u32, cell);
                    }
                }
                layer
            })
            .collect();

        Ok(TileMap {
            tile_width,
            tile_height,
            layers,
        })
    }

    /// A two-layer meadow: grass everywhere with a dirt lane across the
    /// middle, then scattered tall grass, flowers and stones on top.
    pub fn generate(
        cols: u32,
        rows: u32,
        tile_width: u32,
        tile_height: u32,
        rng: &mut impl Rng,
    ) -> TileMap {
        let mut ground = Layer::new("ground", cols, rows);
        let lane = rows / 2;
        for gy in 0..rows {
            for gx in 0..cols {
                let tile = if gy == lane { Tile::Dirt } else { Tile::Grass };
                ground.set(gx, gy, Some(tile));
            }
        }

        let mut decor = Layer::new("decor", cols, rows);
        for gy in 0..rows {
            if gy == lane {
                continue;
            }
            for gx in 0..cols {
                let roll: f64 = rng.gen();
                let tile = if roll < 0.10 {
                    Some(Tile::TallGrass)
                } else if roll < 0.15 {
                    Some(Tile::Flower)
                } else if roll < 0.17 {
                    Some(Tile::Stone)
                } else {
                    None
                };
                decor.set(gx, gy, tile);
            }
        }

        TileMap {
            tile_width,
            tile_height,
            layers: vec![ground, decor],
        }
    }
}
