//! Map data structures and world generation.
use bracket_lib::prelude::RandomNumberGenerator;
use common::{GameError, GameResult, ObjectId, Point};
use data::{Assets, Autotiling, TerrainTemplate};

mod world;

pub use world::World;

/// Terrain type shared by many tiles.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub id: String,
    pub name: String,
    pub glyphs: Vec<char>,
    pub color: [u8; 3],
    pub autotiling: Autotiling,
}

impl From<&TerrainTemplate> for Terrain {
    fn from(t: &TerrainTemplate) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            glyphs: t.glyphs.clone(),
            color: t.color,
            autotiling: t.autotiling,
        }
    }
}

impl Terrain {
    /// Picks the glyph for a tile of this terrain at `pt`.
    pub fn glyph_at(&self, pt: Point) -> char {
        match self.autotiling {
            Autotiling::None => self.glyphs[0],
            Autotiling::Checkerboard => {
                let i = (pt.x + pt.y).rem_euclid(self.glyphs.len() as i32);
                self.glyphs[i as usize]
            }
        }
    }
}

/// Ground of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Index into [`Map::terrains`].
    pub terrain: usize,
    pub glyph: char,
}

/// One grid square: a tile and the objects standing on it.
#[derive(Clone, Debug)]
pub struct Cell {
    pub tile: Tile,
    pub objects: Vec<ObjectId>,
}

impl Cell {
    pub fn add_object(&mut self, id: ObjectId) {
        self.objects.push(id);
    }

    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        common::remove_from(&mut self.objects, &id)
    }
}

/// Rectangular grid of cells.
#[derive(Clone, Debug)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    pub terrains: Vec<Terrain>,
    pub cells: Vec<Cell>,
}

impl Map {
    /// Creates a new map covered in `terrain`.
    pub fn new(width: u32, height: u32, terrain: Terrain) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let glyph = terrain.glyph_at(Point::new(x, y));
                cells.push(Cell {
                    tile: Tile { terrain: 0, glyph },
                    objects: Vec::new(),
                });
            }
        }
        Self {
            width,
            height,
            terrains: vec![terrain],
            cells,
        }
    }

    /// Returns tile index from coordinates.
    pub fn idx(&self, pt: Point) -> usize {
        (pt.y as usize) * self.width as usize + pt.x as usize
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32
    }

    pub fn cell(&self, pt: Point) -> Option<&Cell> {
        if self.is_out_of_bounds(pt.x, pt.y) {
            return None;
        }
        self.cells.get(self.idx(pt))
    }

    pub fn cell_mut(&mut self, pt: Point) -> Option<&mut Cell> {
        if self.is_out_of_bounds(pt.x, pt.y) {
            return None;
        }
        let idx = self.idx(pt);
        self.cells.get_mut(idx)
    }

    pub fn terrain_of(&self, pt: Point) -> Option<&Terrain> {
        self.cell(pt).map(|c| &self.terrains[c.tile.terrain])
    }
}

/// A freshly generated world and its player.
#[derive(Debug)]
pub struct Generated {
    pub world: World,
    pub player: ObjectId,
}

/// Parameters controlling [`generate`].
#[derive(Clone, Copy, Debug)]
pub struct GenParams {
    pub width: u32,
    pub height: u32,
    pub tree_density: f32,
    pub mob_count: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            width: 48,
            height: 32,
            tree_density: 0.12,
            mob_count: 4,
        }
    }
}

const ROCK_COUNT: u32 = 3;
const BERRY_COUNT: u32 = 2;
const BOULDER_COUNT: u32 = 4;
const MOB_SAFE_RADIUS: i32 = 6;
const MOB_KINDS: [&str; 2] = ["wolf", "rat"];

/// Generates a grass clearing with trees, items and mobs.
pub fn generate(seed: u64, assets: &Assets, params: GenParams) -> GameResult<Generated> {
    if params.width < 3 || params.height < 3 {
        return Err(GameError::InvalidOperation);
    }
    let grass = Terrain::from(assets.terrain("grass")?);
    let mut world = World::new(Map::new(params.width, params.height, grass));
    let mut rng = RandomNumberGenerator::seeded(seed);

    let start = Point::new(params.width as i32 / 2, params.height as i32 / 2);
    let player = world.create_at(assets.object("druid")?, start)?;
    let clearing = |pt: Point| (pt.x - start.x).abs() <= 1 && (pt.y - start.y).abs() <= 1;

    let tree = assets.object("tree")?;
    for y in 0..params.height as i32 {
        for x in 0..params.width as i32 {
            let pt = Point::new(x, y);
            if !clearing(pt) && rng.range(0.0, 1.0) < params.tree_density {
                world.create_at(tree, pt)?;
            }
        }
    }

    world.create_at(assets.object("axe")?, start.offset(1, 0))?;

    let mut free = Vec::new();
    for y in 0..params.height as i32 {
        for x in 0..params.width as i32 {
            let pt = Point::new(x, y);
            if !clearing(pt) && world.objects_at(pt).is_empty() {
                free.push(pt);
            }
        }
    }

    let mut place = |world: &mut World, id: &str, pred: &dyn Fn(Point) -> bool| -> GameResult<()> {
        let candidates: Vec<usize> = (0..free.len()).filter(|&i| pred(free[i])).collect();
        if candidates.is_empty() {
            log::warn!("No room left to place {}", id);
            return Ok(());
        }
        let pick = candidates[rng.range(0, candidates.len() as i32) as usize];
        let pt = free.swap_remove(pick);
        world.create_at(assets.object(id)?, pt)?;
        Ok(())
    };

    for _ in 0..ROCK_COUNT {
        place(&mut world, "rock", &|_| true)?;
    }
    for _ in 0..BERRY_COUNT {
        place(&mut world, "berries", &|_| true)?;
    }
    for _ in 0..BOULDER_COUNT {
        place(&mut world, "boulder", &|_| true)?;
    }
    for i in 0..params.mob_count {
        let kind = MOB_KINDS[i as usize % MOB_KINDS.len()];
        place(&mut world, kind, &|pt| pt.manhattan(start) > MOB_SAFE_RADIUS)?;
    }

    log::info!(
        "Generated {}x{} map with {} objects (seed {})",
        params.width,
        params.height,
        world.objects.len(),
        seed
    );
    Ok(Generated { world, player })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::Tag;

    fn assets() -> Assets {
        data::load_assets_embedded().expect("assets")
    }

    fn grass() -> Terrain {
        Terrain::from(assets().terrain("grass").unwrap())
    }

    #[test]
    fn index_calculation() {
        let map = Map::new(10, 10, grass());
        let idx = map.idx(Point::new(3, 2));
        assert_eq!(idx, 2 * 10 + 3);
    }

    #[test]
    fn bounds_checks() {
        let map = Map::new(4, 3, grass());
        assert!(map.is_out_of_bounds(-1, 0));
        assert!(map.is_out_of_bounds(0, 3));
        assert!(map.is_out_of_bounds(4, 0));
        assert!(!map.is_out_of_bounds(3, 2));
        assert!(map.cell(Point::new(4, 0)).is_none());
        assert!(map.cell(Point::new(3, 2)).is_some());
    }

    #[test]
    fn checkerboard_autotiling() {
        let map = Map::new(3, 3, grass());
        let a = map.cell(Point::new(0, 0)).unwrap().tile.glyph;
        let b = map.cell(Point::new(1, 0)).unwrap().tile.glyph;
        let c = map.cell(Point::new(1, 1)).unwrap().tile.glyph;
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn generate_map() {
        let gen = generate(0, &assets(), GenParams::default()).expect("world");
        assert_eq!(gen.world.map.width, 48);
        assert_eq!(gen.world.map.height, 32);
        assert_eq!(gen.world.map.cells.len(), 48 * 32);
        let player = gen.world.objects.get(gen.player).unwrap();
        assert_eq!(player.pos, Point::new(24, 16));
        assert!(player.spawned);
    }

    #[test]
    fn clearing_around_player_has_no_blockers() {
        let gen = generate(3, &assets(), GenParams::default()).expect("world");
        let start = gen.world.objects.get(gen.player).unwrap().pos;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let pt = start.offset(dx, dy);
                assert!(!gen.world.any_at(pt, |o| o.has_tag(Tag::Blocking)));
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(7, &assets(), GenParams::default()).unwrap();
        let b = generate(7, &assets(), GenParams::default()).unwrap();
        assert_eq!(a.world.objects.len(), b.world.objects.len());
        for (ca, cb) in a.world.map.cells.iter().zip(b.world.map.cells.iter()) {
            assert_eq!(ca.objects.len(), cb.objects.len());
        }
    }

    #[test]
    fn mobs_spawn_away_from_player() {
        let gen = generate(11, &assets(), GenParams::default()).unwrap();
        let start = gen.world.objects.get(gen.player).unwrap().pos;
        let mobs: Vec<_> = gen
            .world
            .objects
            .iter()
            .filter(|o| o.behaviour != data::BehaviourKind::Idle)
            .collect();
        assert_eq!(mobs.len(), 4);
        for mob in mobs {
            assert!(mob.pos.manhattan(start) > MOB_SAFE_RADIUS);
        }
    }

    #[test]
    fn object_positions_match_cells() {
        let gen = generate(5, &assets(), GenParams::default()).unwrap();
        for obj in gen.world.objects.iter() {
            let cell = gen.world.map.cell(obj.pos).unwrap();
            assert!(cell.objects.contains(&obj.id));
        }
    }

    #[test]
    fn tiny_maps_rejected() {
        let params = GenParams {
            width: 2,
            ..GenParams::default()
        };
        assert!(generate(0, &assets(), params).is_err());
    }
}
