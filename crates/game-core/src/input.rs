use bracket_lib::prelude::VirtualKeyCode;
use common::{GameError, GameResult, Point};

use crate::config::KeySettings;

/// A player request decoded from the keyboard or mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Point),
    Rest,
    Use,
    Cancel,
    Help,
    ScrollUp,
    ScrollDown,
    Quit,
    /// Mouse click on a world cell.
    Click(Point),
}

/// Keyboard bindings; every action accepts several keys.
#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub left: Vec<VirtualKeyCode>,
    pub right: Vec<VirtualKeyCode>,
    pub up: Vec<VirtualKeyCode>,
    pub down: Vec<VirtualKeyCode>,
    pub rest: Vec<VirtualKeyCode>,
    pub use_item: Vec<VirtualKeyCode>,
    pub cancel: Vec<VirtualKeyCode>,
    pub help: Vec<VirtualKeyCode>,
    pub scroll_up: Vec<VirtualKeyCode>,
    pub scroll_down: Vec<VirtualKeyCode>,
    pub quit: Vec<VirtualKeyCode>,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: vec![Left, A, H],
            right: vec![Right, D, L],
            up: vec![Up, W, K],
            down: vec![Down, S, J],
            rest: vec![Period],
            use_item: vec![Space],
            cancel: vec![Escape],
            help: vec![F1],
            scroll_up: vec![PageUp],
            scroll_down: vec![PageDown],
            quit: vec![Q],
        }
    }
}

impl InputConfig {
    /// Builds bindings from key names, rejecting names it does not know.
    pub fn from_settings(keys: &KeySettings) -> GameResult<Self> {
        Ok(Self {
            left: parse_keys(&keys.left)?,
            right: parse_keys(&keys.right)?,
            up: parse_keys(&keys.up)?,
            down: parse_keys(&keys.down)?,
            rest: parse_keys(&keys.rest)?,
            use_item: parse_keys(&keys.use_item)?,
            cancel: parse_keys(&keys.cancel)?,
            help: parse_keys(&keys.help)?,
            scroll_up: parse_keys(&keys.scroll_up)?,
            scroll_down: parse_keys(&keys.scroll_down)?,
            quit: parse_keys(&keys.quit)?,
        })
    }

    /// Maps a pressed key to a command. Movement keys win over the rest.
    pub fn command_for(&self, key: VirtualKeyCode) -> Option<Command> {
        let bound = |keys: &[VirtualKeyCode]| keys.contains(&key);
        if bound(&self.down) {
            Some(Command::Move(Point::new(0, 1)))
        } else if bound(&self.left) {
            Some(Command::Move(Point::new(-1, 0)))
        } else if bound(&self.right) {
            Some(Command::Move(Point::new(1, 0)))
        } else if bound(&self.up) {
            Some(Command::Move(Point::new(0, -1)))
        } else if bound(&self.rest) {
            Some(Command::Rest)
        } else if bound(&self.use_item) {
            Some(Command::Use)
        } else if bound(&self.cancel) {
            Some(Command::Cancel)
        } else if bound(&self.help) {
            Some(Command::Help)
        } else if bound(&self.scroll_up) {
            Some(Command::ScrollUp)
        } else if bound(&self.scroll_down) {
            Some(Command::ScrollDown)
        } else if bound(&self.quit) {
            Some(Command::Quit)
        } else {
            None
        }
    }
}

fn parse_keys(names: &[String]) -> GameResult<Vec<VirtualKeyCode>> {
    names
        .iter()
        .map(|n| parse_key(n).ok_or_else(|| GameError::Config(format!("unknown key {}", n))))
        .collect()
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "left" => Left,
        "right" => Right,
        "up" => Up,
        "down" => Down,
        "a" => A,
        "b" => B,
        "c" => C,
        "d" => D,
        "e" => E,
        "f" => F,
        "g" => G,
        "h" => H,
        "i" => I,
        "j" => J,
        "k" => K,
        "l" => L,
        "m" => M,
        "n" => N,
        "o" => O,
        "p" => P,
        "q" => Q,
        "r" => R,
        "s" => S,
        "t" => T,
        "u" => U,
        "v" => V,
        "w" => W,
        "x" => X,
        "y" => Y,
        "z" => Z,
        "period" | "." => Period,
        "comma" | "," => Comma,
        "space" | " " => Space,
        "escape" | "esc" => Escape,
        "return" | "enter" => Return,
        "tab" => Tab,
        "f1" => F1,
        "pageup" => PageUp,
        "pagedown" => PageDown,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeySettings;

    #[test]
    fn default_settings_match_default_bindings() {
        let cfg = InputConfig::from_settings(&KeySettings::default()).unwrap();
        assert_eq!(cfg, InputConfig::default());
    }

    #[test]
    fn every_movement_alias_maps() {
        let cfg = InputConfig::default();
        for key in [VirtualKeyCode::Left, VirtualKeyCode::A, VirtualKeyCode::H] {
            assert_eq!(cfg.command_for(key), Some(Command::Move(Point::new(-1, 0))));
        }
        assert_eq!(
            cfg.command_for(VirtualKeyCode::J),
            Some(Command::Move(Point::new(0, 1)))
        );
        assert_eq!(cfg.command_for(VirtualKeyCode::Period), Some(Command::Rest));
        assert_eq!(cfg.command_for(VirtualKeyCode::Space), Some(Command::Use));
        assert_eq!(cfg.command_for(VirtualKeyCode::Escape), Some(Command::Cancel));
        assert_eq!(cfg.command_for(VirtualKeyCode::Z), None);
    }

    #[test]
    fn unknown_key_name_rejected() {
        let keys = KeySettings {
            rest: vec!["Hyper".to_string()],
            ..KeySettings::default()
        };
        let res = InputConfig::from_settings(&keys);
        assert!(matches!(res, Err(GameError::Config(_))));
    }

    #[test]
    fn custom_binding_applies() {
        let keys = KeySettings {
            use_item: vec!["return".to_string(), "E".to_string()],
            ..KeySettings::default()
        };
        let cfg = InputConfig::from_settings(&keys).unwrap();
        assert_eq!(cfg.command_for(VirtualKeyCode::Return), Some(Command::Use));
        assert_eq!(cfg.command_for(VirtualKeyCode::E), Some(Command::Use));
        assert_eq!(cfg.command_for(VirtualKeyCode::Space), None);
    }
}
