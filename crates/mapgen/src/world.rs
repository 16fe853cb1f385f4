use common::{GameError, GameResult, ObjectId, Point};
use data::ObjectTemplate;
use objects::{GameObject, ObjectStore};

use crate::Map;

/// The map together with every object placed on it.
///
/// An object is listed in exactly one cell when `spawned` is set, and that
/// cell is the one at its `pos`.
#[derive(Debug)]
pub struct World {
    pub map: Map,
    pub objects: ObjectStore,
}

impl World {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            objects: ObjectStore::default(),
        }
    }

    /// Creates an object from `template` and spawns it at `pt`.
    pub fn create_at(&mut self, template: &ObjectTemplate, pt: Point) -> GameResult<ObjectId> {
        let id = self.objects.create(template);
        if let Err(e) = self.spawn(id, pt) {
            self.objects.remove(id)?;
            return Err(e);
        }
        Ok(id)
    }

    pub fn spawn(&mut self, id: ObjectId, pt: Point) -> GameResult<()> {
        self.move_object(id, pt)
    }

    /// Spawns an object at the position it last occupied.
    pub fn spawn_at_own_position(&mut self, id: ObjectId) -> GameResult<()> {
        let pos = self.objects.get(id)?.pos;
        self.move_object(id, pos)
    }

    /// Removes an object from its cell; it stays in the store.
    pub fn despawn(&mut self, id: ObjectId) -> GameResult<()> {
        let object = self.objects.get_mut(id)?;
        let pos = object.pos;
        let cell = self
            .map
            .cell_mut(pos)
            .ok_or(GameError::OutOfBounds { x: pos.x, y: pos.y })?;
        cell.remove_object(id);
        object.spawned = false;
        Ok(())
    }

    /// Moves an object into the cell at `pt`, taking it out of its old cell.
    pub fn move_object(&mut self, id: ObjectId, pt: Point) -> GameResult<()> {
        if self.map.cell(pt).is_none() {
            return Err(GameError::OutOfBounds { x: pt.x, y: pt.y });
        }
        let object = self.objects.get_mut(id)?;
        if object.spawned {
            if let Some(prev) = self.map.cell_mut(object.pos) {
                prev.remove_object(id);
            }
        }
        object.pos = pt;
        object.spawned = true;
        if let Some(cell) = self.map.cell_mut(pt) {
            cell.add_object(id);
        }
        Ok(())
    }

    /// Ids of the objects in the cell at `pt`, in insertion order.
    pub fn objects_at(&self, pt: Point) -> Vec<ObjectId> {
        self.map
            .cell(pt)
            .map(|c| c.objects.clone())
            .unwrap_or_default()
    }

    /// Whether any object in the cell at `pt` satisfies `pred`.
    pub fn any_at<F>(&self, pt: Point, pred: F) -> bool
    where
        F: Fn(&GameObject) -> bool,
    {
        match self.map.cell(pt) {
            Some(cell) => cell
                .objects
                .iter()
                .filter_map(|id| self.objects.get(*id).ok())
                .any(pred),
            None => false,
        }
    }
}
