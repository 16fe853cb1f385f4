use anim::{Easing, Tween};
use common::{Facing, GameError, GameResult, ObjectId, Point};
use data::{Tag, UseEffect};

use super::*;
use crate::types::Motion;

/// Damage dealt by an ordinary bump.
const BUMP_DAMAGE: i32 = 1;

impl ThicketGame {
    pub(crate) fn move_by(&mut self, id: ObjectId, dx: i32, dy: i32) -> GameResult<bool> {
        let pos = self.world.objects.get(id)?.pos;
        self.move_to(id, pos.offset(dx, dy))
    }

    /// Takes one step towards `target` along the axis with the larger delta.
    pub(crate) fn move_towards(&mut self, id: ObjectId, target: Point) -> GameResult<bool> {
        let pos = self.world.objects.get(id)?.pos;
        let step = behaviour::step_towards(pos, target);
        if step == Point::default() {
            return Ok(false);
        }
        self.move_by(id, step.x, step.y)
    }

    /// Moves an object into `dest`, bumping whatever blocks it and picking up
    /// loose items on the way in.
    pub(crate) fn move_to(&mut self, id: ObjectId, dest: Point) -> GameResult<bool> {
        let pos = {
            let object = self.world.objects.get_mut(id)?;
            if dest.x != object.pos.x {
                object.facing = if dest.x > object.pos.x {
                    Facing::Right
                } else {
                    Facing::Left
                };
            }
            object.pos
        };

        if self.world.map.cell(dest).is_none() {
            return Ok(false);
        }

        if self.world.any_at(dest, |o| o.has_tag(Tag::Blocking)) {
            return self.bump(id, dest);
        }

        for target in self.world.objects_at(dest) {
            let empty_handed = self.world.objects.get(id)?.holding.is_none();
            if empty_handed && self.world.objects.get(target)?.has_tag(Tag::Pickup) {
                self.pickup(id, target)?;
            }
        }

        let motion = Motion::Step {
            from_x: (pos.x - dest.x) as f32,
            from_y: (pos.y - dest.y) as f32,
        };
        self.animate(id, motion, false)?;
        self.world.move_object(id, dest)?;
        Ok(true)
    }

    /// Lunges at `dest` and attacks every object there that has hit points.
    pub(crate) fn bump(&mut self, id: ObjectId, dest: Point) -> GameResult<bool> {
        let pos = self.world.objects.get(id)?.pos;
        let motion = Motion::Bump {
            from_x: (dest.x - pos.x) as f32 / 2.0,
            from_y: (dest.y - pos.y) as f32 / 2.0,
        };
        self.animate(id, motion, false)?;

        if self.world.map.cell(dest).is_none() {
            return Ok(false);
        }

        for target in self.world.objects_at(dest) {
            if target == id || !self.world.objects.contains(target) {
                continue;
            }
            if self.world.objects.get(target)?.vitality.is_none() {
                continue;
            }
            let damage = self.bump_damage(id, target)?;
            self.attack(id, target, damage)?;
        }
        Ok(true)
    }

    /// Chop damage of the held item against wooden targets, otherwise 1.
    fn bump_damage(&self, attacker: ObjectId, target: ObjectId) -> GameResult<i32> {
        let held = self.world.objects.get(attacker)?.holding;
        let chop = held
            .and_then(|item| self.world.objects.get(item).ok())
            .and_then(|item| item.equipment)
            .map_or(0, |e| e.chop_damage);
        if chop > 0 && self.world.objects.get(target)?.has_tag(Tag::Wooden) {
            Ok(chop)
        } else {
            Ok(BUMP_DAMAGE)
        }
    }

    pub(crate) fn attack(
        &mut self,
        attacker: ObjectId,
        target: ObjectId,
        damage: i32,
    ) -> GameResult<bool> {
        let counts_as_kill = attacker == self.player && target != self.player;
        let msg = format!(
            "{} {} {}.",
            self.describe(attacker)?,
            self.verb(attacker, "hit"),
            self.describe(target)?.to_lowercase()
        );
        self.ui.add_log(&msg)?;

        self.damage(target, damage)?;

        let dead = match self.world.objects.get(target) {
            Ok(obj) => !obj.is_alive(),
            Err(_) => true,
        };
        if dead && counts_as_kill {
            self.kills += 1;
        }
        Ok(true)
    }

    pub(crate) fn damage(&mut self, target: ObjectId, amount: i32) -> GameResult<bool> {
        let object = self.world.objects.get_mut(target)?;
        let vitality = object
            .vitality
            .as_mut()
            .ok_or(GameError::NoVitality(target))?;
        if vitality.damage(amount) {
            self.death(target)?;
        }
        Ok(true)
    }

    /// Removes a dead object from the world, leaving its held item and drops behind.
    pub(crate) fn death(&mut self, id: ObjectId) -> GameResult<()> {
        let (pos, held, drops, wooden) = {
            let object = self.world.objects.get_mut(id)?;
            (
                object.pos,
                object.holding.take(),
                object.drops.clone(),
                object.has_tag(Tag::Wooden),
            )
        };
        let msg = if id == self.player {
            "You die...".to_string()
        } else if wooden {
            format!("The {} falls.", self.world.objects.get(id)?.name)
        } else {
            format!("The {} dies.", self.world.objects.get(id)?.name)
        };
        self.ui.add_log(&msg)?;

        self.world.despawn(id)?;
        if let Some(item) = held {
            self.world.spawn(item, pos)?;
        }
        if let Some(template) = drops {
            self.world.create_at(self.assets.object(&template)?, pos)?;
        }

        if id == self.player {
            self.mode = GameMode::End {
                turns: self.turn,
                kills: self.kills,
            };
            log::info!("Player died after {} turns", self.turn);
        } else {
            self.animator.cancel(id);
            self.world.objects.remove(id)?;
        }
        Ok(())
    }

    pub(crate) fn pickup(&mut self, id: ObjectId, target: ObjectId) -> GameResult<bool> {
        if self.world.objects.get(id)?.holding.is_some() {
            return Ok(false);
        }
        self.world.despawn(target)?;
        self.animator.cancel(target);
        self.world.objects.get_mut(target)?.sprite = Default::default();
        self.world.objects.get_mut(id)?.holding = Some(target);
        if id == self.player {
            let name = self.world.objects.get(target)?.name.clone();
            self.ui.add_log(&format!("You pick up the {}.", name))?;
        }
        Ok(true)
    }

    pub(crate) fn rest(&mut self, _id: ObjectId) -> GameResult<bool> {
        Ok(true)
    }

    /// Uses the held item. Entering throwing mode does not spend the turn.
    pub(crate) fn use_item(&mut self, id: ObjectId) -> GameResult<bool> {
        let holder = self.world.objects.get(id)?;
        let item = match holder.holding {
            Some(item) => item,
            None => return Ok(false),
        };
        let pos = holder.pos;
        let equipment = match self.world.objects.get(item)?.equipment {
            Some(e) => e,
            None => return Ok(false),
        };
        match equipment.on_use {
            UseEffect::None => Ok(false),
            UseEffect::Throw => {
                if id != self.player {
                    return Ok(false);
                }
                self.mode = GameMode::Throwing { item };
                self.cursor = pos;
                self.ui.add_log("Choose where to throw.")?;
                Ok(false)
            }
            UseEffect::Heal(amount) => {
                let holder = self.world.objects.get_mut(id)?;
                match holder.vitality.as_mut() {
                    Some(v) => v.heal(amount),
                    None => return Ok(false),
                }
                holder.holding = None;
                let eaten = self.world.objects.remove(item)?;
                if id == self.player {
                    self.ui.add_log(&format!("You eat the {}.", eaten.name))?;
                }
                Ok(true)
            }
        }
    }

    /// Throws `item` from the player's hand onto `dest`.
    pub(crate) fn throw(&mut self, item: ObjectId, dest: Point) -> GameResult<bool> {
        if self.world.map.is_out_of_bounds(dest.x, dest.y) {
            return Ok(false);
        }
        let player = self.world.objects.get_mut(self.player)?;
        let from = player.pos;
        if player.holding == Some(item) {
            player.holding = None;
        }

        self.world.spawn(item, dest)?;
        let motion = Motion::Flight {
            from_x: (from.x - dest.x) as f32,
            from_y: (from.y - dest.y) as f32,
        };
        self.animate(item, motion, true)?;
        self.mode = GameMode::Default;

        let item_obj = self.world.objects.get(item)?;
        let name = item_obj.name.clone();
        let damage = item_obj.equipment.map_or(0, |e| e.throw_damage);
        self.ui.add_log(&format!("You throw the {}.", name))?;
        if damage > 0 {
            for target in self.world.objects_at(dest) {
                if target == item || target == self.player || !self.world.objects.contains(target) {
                    continue;
                }
                if self.world.objects.get(target)?.vitality.is_some() {
                    self.attack(self.player, target, damage)?;
                }
            }
        }
        Ok(true)
    }

    /// Starts a tween for `id`, replacing whatever it was animating.
    pub(crate) fn animate(
        &mut self,
        id: ObjectId,
        motion: Motion,
        blocking: bool,
    ) -> GameResult<()> {
        let duration = match motion {
            Motion::Flight { .. } => self.settings.throw_duration_ms,
            _ => self.settings.move_duration_ms,
        };
        let easing = match motion {
            Motion::Flight { .. } => Easing::Linear,
            _ => Easing::EaseInOut,
        };
        let tween = Tween::new(duration, easing);
        self.world.objects.get_mut(id)?.sprite = motion.sprite_at(&tween);
        if blocking {
            self.animator.start_blocking(id, tween, motion);
        } else {
            self.animator.start(id, tween, motion);
        }
        Ok(())
    }

    fn describe(&self, id: ObjectId) -> GameResult<String> {
        if id == self.player {
            Ok("You".to_string())
        } else {
            Ok(format!("The {}", self.world.objects.get(id)?.name))
        }
    }

    fn verb(&self, id: ObjectId, verb: &str) -> String {
        if id == self.player {
            verb.to_string()
        } else {
            format!("{}s", verb)
        }
    }
}
