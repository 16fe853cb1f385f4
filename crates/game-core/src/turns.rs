use super::*;
use behaviour::Intent;
use data::BehaviourKind;
use objects::SpriteOffset;

impl ThicketGame {
    /// Advances every tween and writes the resulting offsets into the sprites.
    pub(crate) fn update_animations(&mut self, dt_ms: f32) {
        for (id, _) in self.animator.update(dt_ms) {
            if let Ok(object) = self.world.objects.get_mut(id) {
                object.sprite = SpriteOffset::default();
            }
        }
        let running: Vec<(ObjectId, SpriteOffset)> = self
            .animator
            .iter()
            .map(|(id, tween, motion)| (id, motion.sprite_at(tween)))
            .collect();
        for (id, sprite) in running {
            if let Ok(object) = self.world.objects.get_mut(id) {
                object.sprite = sprite;
            }
        }
    }

    /// One frame of turn resolution after animations have been advanced.
    ///
    /// While a blocking animation runs nothing happens. A pending NPC turn
    /// runs before any further player input is read.
    pub(crate) fn resolve(&mut self, command: Option<Command>) -> GameResult<()> {
        if let Some(cmd @ (Command::Help | Command::ScrollUp | Command::ScrollDown)) = command {
            self.handle_command(cmd)?;
            return Ok(());
        }
        if matches!(self.mode, GameMode::End { .. }) || self.animator.is_blocking() {
            return Ok(());
        }
        if self.npc_turn_pending {
            self.npc_turn_pending = false;
            return self.npc_turn();
        }
        if let Some(cmd) = command {
            if self.handle_command(cmd)? {
                self.turn += 1;
                self.npc_turn_pending = true;
            }
        }
        Ok(())
    }

    /// Lets every living NPC act once, in id order.
    pub(crate) fn npc_turn(&mut self) -> GameResult<()> {
        let target = self.world.objects.get(self.player)?.pos;
        for id in self.world.objects.ids() {
            if id == self.player {
                continue;
            }
            let acts = match self.world.objects.get(id) {
                Ok(o) => o.spawned && o.is_alive() && o.behaviour != BehaviourKind::Idle,
                // Killed earlier in this turn.
                Err(_) => false,
            };
            if !acts {
                continue;
            }
            match behaviour::decide(&self.world, id, target, &mut self.rng)? {
                Intent::Wait => {}
                Intent::Step(d) => {
                    self.move_by(id, d.x, d.y)?;
                }
            }
            if matches!(self.mode, GameMode::End { .. }) {
                break;
            }
        }
        Ok(())
    }
}
