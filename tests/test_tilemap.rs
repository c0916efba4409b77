use archery::error::{GameError, TileMapError};
use archery::tilemap::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLE: &str = "\
tile 16 8
[ground]
,,#
,~
[decor hidden]
 *o
";

#[test]
fn parse_reads_header_and_layers() {
    let map = TileMap::parse(SAMPLE).unwrap();
    assert_eq!((map.tile_width, map.tile_height), (16, 8));
    assert_eq!(map.layers.len(), 2);

    let ground = &map.layers[0];
    assert_eq!(ground.name, "ground");
    assert!(ground.visible);
    assert_eq!((ground.width, ground.height), (3, 2));
    assert_eq!(ground.get(2, 0), Some(Tile::Dirt));
    assert_eq!(ground.get(1, 1), Some(Tile::Water));
    // Short row padded with empty cells
    assert_eq!(ground.get(2, 1), None);

    assert!(!map.layers[1].visible);
}

#[test]
fn visible_tiles_skip_hidden_layers_and_empty_cells() {
    let map = TileMap::parse(SAMPLE).unwrap();
    let names: Vec<&str> = map.visible_layers().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["ground"]);

    let ground: Vec<_> = map.visible_tiles(&map.layers[0]).collect();
    assert_eq!(
        ground,
        vec![
            (0, 0, Tile::Grass),
            (1, 0, Tile::Grass),
            (2, 0, Tile::Dirt),
            (0, 1, Tile::Grass),
            (1, 1, Tile::Water),
        ]
    );
    assert_eq!(map.visible_tiles(&map.layers[1]).count(), 0);
    // The hidden layer still holds its tiles
    assert_eq!(map.layers[1].tiles().count(), 2);
}

#[test]
fn header_is_optional() {
    let map = TileMap::parse("[only]\n,,\n").unwrap();
    assert_eq!((map.tile_width, map.tile_height), (32, 32));
}

#[test]
fn parse_errors_carry_line_numbers() {
    assert_eq!(
        TileMap::parse("tile 0 8\n[a]\n,"),
        Err(TileMapError::Header { line: 1 })
    );
    assert_eq!(
        TileMap::parse(",,,\n[a]\n"),
        Err(TileMapError::RowOutsideLayer { line: 1 })
    );
    assert_eq!(
        TileMap::parse("[a]\n,,\n,X,\n"),
        Err(TileMapError::UnknownGlyph { line: 3, glyph: 'X' })
    );
    assert_eq!(TileMap::parse("\n\n"), Err(TileMapError::Empty));
}

#[test]
fn load_missing_file_is_an_error() {
    let err = TileMap::load(std::path::Path::new("/definitely/not/here.map")).unwrap_err();
    assert!(matches!(err, GameError::TileMap { .. }));
}

#[test]
fn generated_meadow_is_reproducible() {
    let a = TileMap::generate(25, 19, 32, 32, &mut StdRng::seed_from_u64(7));
    let b = TileMap::generate(25, 19, 32, 32, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

#[test]
fn generated_meadow_layout() {
    let map = TileMap::generate(25, 19, 32, 32, &mut StdRng::seed_from_u64(42));
    assert_eq!(map.layers.len(), 2);
    let ground = &map.layers[0];
    // Ground is fully covered, with a dirt lane across the middle row
    assert_eq!(ground.tiles().count(), 25 * 19);
    assert!((0..25).all(|gx| ground.get(gx, 9) == Some(Tile::Dirt)));
    assert_eq!(ground.get(0, 0), Some(Tile::Grass));
    // Nothing decorates the lane
    let decor = &map.layers[1];
    assert!((0..25).all(|gx| decor.get(gx, 9).is_none()));
}
