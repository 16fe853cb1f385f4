//! Game objects and their components.

use std::collections::{HashMap, HashSet};

use common::{Facing, GameError, GameResult, ObjectId, Point};
use data::{BehaviourKind, EquipmentSpec, ObjectTemplate, Tag, UseEffect};

/// Hit points of a damageable object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitality {
    pub hp: i32,
    pub max_hp: i32,
}

impl Vitality {
    pub fn new(hp: i32) -> Self {
        Self { hp, max_hp: hp }
    }

    /// Subtracts `amount` hit points, never going below zero.
    ///
    /// Returns `true` when the owner has no hit points left.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount).max(0);
        self.hp <= 0
    }

    /// Restores hit points up to the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// Behaviour of a holdable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Equipment {
    pub on_use: UseEffect,
    pub chop_damage: i32,
    pub throw_damage: i32,
}

impl From<EquipmentSpec> for Equipment {
    fn from(spec: EquipmentSpec) -> Self {
        Self {
            on_use: spec.on_use,
            chop_damage: spec.chop_damage,
            throw_damage: spec.throw_damage,
        }
    }
}

/// Visual displacement of a sprite in cell units, driven by tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpriteOffset {
    pub offset_x: f32,
    pub offset_y: f32,
    pub bump_x: f32,
    pub bump_y: f32,
    pub bump_z: f32,
}

impl SpriteOffset {
    pub fn visual_x(&self) -> f32 {
        self.offset_x + self.bump_x
    }

    /// Vertical displacement, with the hop height lifting the sprite.
    pub fn visual_y(&self) -> f32 {
        self.offset_y + self.bump_y - self.bump_z
    }

    pub fn is_at_rest(&self) -> bool {
        *self == Self::default()
    }
}

/// Anything that lives in a map cell.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub id: ObjectId,
    /// Template id this object was created from.
    pub template: String,
    pub name: String,
    pub glyph: char,
    pub color: [u8; 3],
    pub pos: Point,
    pub facing: Facing,
    pub tags: HashSet<Tag>,
    pub vitality: Option<Vitality>,
    pub equipment: Option<Equipment>,
    pub behaviour: BehaviourKind,
    pub drops: Option<String>,
    pub holding: Option<ObjectId>,
    /// Whether the object is currently listed in a map cell.
    pub spawned: bool,
    pub sprite: SpriteOffset,
}

impl GameObject {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_alive(&self) -> bool {
        self.vitality.map_or(false, |v| v.hp > 0)
    }
}

/// Owner of every object in the game.
#[derive(Debug, Default)]
pub struct ObjectStore {
    next_id: ObjectId,
    objects: HashMap<ObjectId, GameObject>,
}

impl ObjectStore {
    /// Creates an unspawned object from a template and returns its id.
    pub fn create(&mut self, template: &ObjectTemplate) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        let object = GameObject {
            id,
            template: template.id.clone(),
            name: template.name.clone(),
            glyph: template.glyph,
            color: template.color,
            pos: Point::default(),
            facing: Facing::default(),
            tags: template.tags.iter().copied().collect(),
            vitality: template.hp.map(Vitality::new),
            equipment: template.equipment.map(Equipment::from),
            behaviour: template.behaviour,
            drops: template.drops.clone(),
            holding: None,
            spawned: false,
            sprite: SpriteOffset::default(),
        };
        log::trace!("Created {} #{}", object.name, id);
        self.objects.insert(id, object);
        id
    }

    pub fn get(&self, id: ObjectId) -> GameResult<&GameObject> {
        self.objects.get(&id).ok_or(GameError::MissingObject(id))
    }

    pub fn get_mut(&mut self, id: ObjectId) -> GameResult<&mut GameObject> {
        self.objects.get_mut(&id).ok_or(GameError::MissingObject(id))
    }

    pub fn remove(&mut self, id: ObjectId) -> GameResult<GameObject> {
        self.objects.remove(&id).ok_or(GameError::MissingObject(id))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
