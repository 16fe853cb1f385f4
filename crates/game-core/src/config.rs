use common::{GameError, GameResult};
use mapgen::GenParams;
use serde::Deserialize;

/// Largest accepted map width or height.
pub const MAX_MAP_SIDE: u32 = 1024;

/// Settings read from `thicket.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub keys: KeySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub seed: u64,
    pub map_width: u32,
    pub map_height: u32,
    pub tree_density: f32,
    pub mob_count: u32,
    pub move_duration_ms: f32,
    pub throw_duration_ms: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            map_width: 48,
            map_height: 32,
            tree_density: 0.12,
            mob_count: 4,
            move_duration_ms: 150.0,
            throw_duration_ms: 200.0,
        }
    }
}

impl GameSettings {
    pub fn gen_params(&self) -> GenParams {
        GenParams {
            width: self.map_width,
            height: self.map_height,
            tree_density: self.tree_density,
            mob_count: self.mob_count,
        }
    }
}

/// Key names per action; see `input::parse_key` for accepted names.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub rest: Vec<String>,
    #[serde(rename = "use")]
    pub use_item: Vec<String>,
    pub cancel: Vec<String>,
    pub help: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub quit: Vec<String>,
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            left: names(&["Left", "A", "H"]),
            right: names(&["Right", "D", "L"]),
            up: names(&["Up", "W", "K"]),
            down: names(&["Down", "S", "J"]),
            rest: names(&["Period"]),
            use_item: names(&["Space"]),
            cancel: names(&["Escape"]),
            help: names(&["F1"]),
            scroll_up: names(&["PageUp"]),
            scroll_down: names(&["PageDown"]),
            quit: names(&["Q"]),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub colorblind: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&data).map_err(|e| match e {
            GameError::Config(msg) => GameError::Config(format!("{}: {}", path, msg)),
            other => other,
        })
    }

    pub fn parse(data: &str) -> GameResult<Self> {
        let settings: Settings =
            toml::from_str(data).map_err(|e| GameError::Config(e.to_string()))?;
        let (w, h) = (settings.game.map_width, settings.game.map_height);
        if w < 3 || h < 3 {
            return Err(GameError::Config("map must be at least 3x3".to_string()));
        }
        if w > MAX_MAP_SIDE || h > MAX_MAP_SIDE {
            return Err(GameError::Config(format!(
                "map sides must be at most {}",
                MAX_MAP_SIDE
            )));
        }
        Ok(settings)
    }
}
