//! Data loading utilities for Thicket.

use common::{GameError, GameResult};
use serde::Deserialize;

/// Behavioural flags an object can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Tag {
    /// Nothing can step into a cell holding this object.
    Blocking,
    /// Picked up by an empty-handed mover entering the cell.
    Pickup,
    /// Moves around on its own; drawn over occluders.
    Mobile,
    /// Tall object that is dimmed when something stands behind it.
    Occludes,
    /// Takes chop damage from axes.
    Wooden,
}

/// How a terrain chooses glyphs for its tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Autotiling {
    #[default]
    None,
    /// Alternates glyphs on `(x + y)`.
    Checkerboard,
}

/// What happens when a held item is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum UseEffect {
    #[default]
    None,
    /// Enter throwing mode with the item.
    Throw,
    /// Restore hit points and consume the item.
    Heal(i32),
}

/// NPC behaviour used on the NPC turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum BehaviourKind {
    #[default]
    Idle,
    Wander,
    Chase,
}

/// Equipment parameters of a holdable item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EquipmentSpec {
    #[serde(default)]
    pub on_use: UseEffect,
    /// Damage dealt when bumping a wooden object while holding this item.
    #[serde(default)]
    pub chop_damage: i32,
    /// Damage dealt to whatever is in the landing cell of a throw.
    #[serde(default)]
    pub throw_damage: i32,
}

/// Terrain definition loaded from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainTemplate {
    pub id: String,
    pub name: String,
    pub glyphs: Vec<char>,
    pub color: [u8; 3],
    #[serde(default)]
    pub autotiling: Autotiling,
}

/// Object definition loaded from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectTemplate {
    pub id: String,
    pub name: String,
    pub glyph: char,
    pub color: [u8; 3],
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub equipment: Option<EquipmentSpec>,
    #[serde(default)]
    pub behaviour: BehaviourKind,
    /// Template spawned where this object dies.
    #[serde(default)]
    pub drops: Option<String>,
}

/// All templates known to the game.
#[derive(Clone, Debug, Deserialize)]
pub struct Assets {
    pub terrains: Vec<TerrainTemplate>,
    pub objects: Vec<ObjectTemplate>,
}

impl Assets {
    /// Looks up a terrain template by id.
    pub fn terrain(&self, id: &str) -> GameResult<&TerrainTemplate> {
        self.terrains
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| GameError::UnknownTemplate(id.to_string()))
    }

    /// Looks up an object template by id.
    pub fn object(&self, id: &str) -> GameResult<&ObjectTemplate> {
        self.objects
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| GameError::UnknownTemplate(id.to_string()))
    }
}

/// Loads [`Assets`] from the given JSON file path.
pub fn load_assets(path: &str) -> GameResult<Assets> {
    let data = std::fs::read_to_string(path)?;
    parse_assets(&data)
}

/// Loads [`Assets`] embedded at compile time (used on WASM).
pub fn load_assets_embedded() -> GameResult<Assets> {
    parse_assets(include_str!("../../../assets/objects.json"))
}

/// Parses and validates an asset file.
pub fn parse_assets(data: &str) -> GameResult<Assets> {
    let assets: Assets =
        serde_json::from_str(data).map_err(|e| GameError::Parse(e.to_string()))?;
    if assets.terrains.is_empty() || assets.objects.is_empty() {
        return Err(GameError::InvalidOperation);
    }
    if let Some(t) = assets.terrains.iter().find(|t| t.glyphs.is_empty()) {
        return Err(GameError::Parse(format!("terrain {} has no glyphs", t.id)));
    }
    log::debug!(
        "Loaded {} terrains and {} object templates",
        assets.terrains.len(),
        assets.objects.len()
    );
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/objects.json");
        let assets = load_assets(path).expect("assets");
        assert!(!assets.objects.is_empty());
        assert!(assets.terrain("grass").is_ok());
    }

    #[test]
    fn embedded_assets_load() {
        let assets = load_assets_embedded().expect("assets");
        let druid = assets.object("druid").expect("druid");
        assert_eq!(druid.glyph, '@');
        assert_eq!(druid.hp, Some(5));
    }

    #[test]
    fn parse_failure_when_empty() {
        let res = parse_assets(r#"{"terrains": [], "objects": []}"#);
        assert!(matches!(res, Err(GameError::InvalidOperation)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let res = parse_assets("{ not json");
        assert!(matches!(res, Err(GameError::Parse(_))));
    }

    #[test]
    fn terrain_without_glyphs_rejected() {
        let json = r#"{
            "terrains": [{"id": "void", "name": "Void", "glyphs": [], "color": [0, 0, 0]}],
            "objects": [{"id": "a", "name": "a", "glyph": "a", "color": [1, 2, 3]}]
        }"#;
        assert!(matches!(parse_assets(json), Err(GameError::Parse(_))));
    }

    #[test]
    fn parse_simple_data() {
        let json = r#"{
            "terrains": [{"id": "dirt", "name": "Dirt", "glyphs": ["."], "color": [1, 1, 1]}],
            "objects": [{
                "id": "stick",
                "name": "stick",
                "glyph": "|",
                "color": [10, 20, 30],
                "tags": ["Pickup", "Wooden"],
                "equipment": {"on_use": {"Heal": 3}}
            }]
        }"#;
        let assets = parse_assets(json).expect("assets");
        let stick = assets.object("stick").expect("stick");
        assert_eq!(stick.tags, vec![Tag::Pickup, Tag::Wooden]);
        assert_eq!(stick.behaviour, BehaviourKind::Idle);
        let eq = stick.equipment.expect("equipment");
        assert_eq!(eq.on_use, UseEffect::Heal(3));
        assert_eq!(eq.chop_damage, 0);
        assert_eq!(assets.terrain("dirt").unwrap().autotiling, Autotiling::None);
    }

    #[test]
    fn unknown_template_lookup_fails() {
        let assets = load_assets_embedded().expect("assets");
        assert!(matches!(
            assets.object("dragon"),
            Err(GameError::UnknownTemplate(id)) if id == "dragon"
        ));
    }

    #[test]
    fn tree_drops_log() {
        let assets = load_assets_embedded().expect("assets");
        let tree = assets.object("tree").unwrap();
        assert_eq!(tree.drops.as_deref(), Some("log"));
        assert!(assets.object("log").is_ok());
    }
}
