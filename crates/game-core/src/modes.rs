use super::*;

impl ThicketGame {
    /// Dispatches a command. Returns `true` when it spent the player's turn.
    pub(crate) fn handle_command(&mut self, command: Command) -> GameResult<bool> {
        match command {
            Command::Help => {
                self.ui.toggle_help();
                return Ok(false);
            }
            Command::ScrollUp => {
                self.ui.scroll_up();
                return Ok(false);
            }
            Command::ScrollDown => {
                self.ui.scroll_down();
                return Ok(false);
            }
            Command::Quit => return Ok(false),
            _ => {}
        }
        if self.ui.layout() == UILayout::Help {
            return Ok(false);
        }
        match self.mode {
            GameMode::Default => self.default_mode(command),
            GameMode::Throwing { item } => self.throwing_mode(item, command),
            GameMode::End { .. } => Ok(false),
        }
    }

    fn default_mode(&mut self, command: Command) -> GameResult<bool> {
        let player = self.player;
        match command {
            Command::Move(d) => self.move_by(player, d.x, d.y),
            Command::Rest => self.rest(player),
            Command::Use => self.use_item(player),
            Command::Click(target) => self.move_towards(player, target),
            _ => Ok(false),
        }
    }

    fn throwing_mode(&mut self, item: ObjectId, command: Command) -> GameResult<bool> {
        match command {
            Command::Click(target) => {
                self.cursor = target;
                self.throw(item, target)
            }
            Command::Move(d) => {
                let max_x = self.world.map.width as i32 - 1;
                let max_y = self.world.map.height as i32 - 1;
                self.cursor = Point::new(
                    (self.cursor.x + d.x).clamp(0, max_x),
                    (self.cursor.y + d.y).clamp(0, max_y),
                );
                Ok(false)
            }
            Command::Use => {
                let target = self.cursor;
                self.throw(item, target)
            }
            Command::Cancel => {
                self.mode = GameMode::Default;
                self.ui.add_log("You lower your arm.")?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Short description of the current mode for the status panel.
    pub(crate) fn mode_hint(&self) -> &'static str {
        match self.mode {
            GameMode::Default => "",
            GameMode::Throwing { .. } => "Throwing: Space/click",
            GameMode::End { .. } => "You died",
        }
    }
}
