//! Game engine entry point.

mod actions;
mod app;
mod config;
mod input;
mod modes;
mod render;
mod turns;
mod types;

use bracket_lib::prelude::*;

use anim::Animator;
use common::{GameResult, ObjectId, Point};
use data::{Assets, Tag};
use mapgen::{generate, World};
use ui::{ColorPalette, UIContext, UILayout};

const VIEW_WIDTH: i32 = 60;
const VIEW_HEIGHT: i32 = 17;
pub const CONFIG_PATH: &str = "thicket.toml";

pub use app::ThicketApp;
pub use config::{GameSettings, Settings};
pub use input::{Command, InputConfig};
pub use types::{GameMode, Motion};

/// A running game: the world, the player and turn bookkeeping.
pub struct ThicketGame {
    world: World,
    player: ObjectId,
    assets: Assets,
    settings: GameSettings,
    input: InputConfig,
    ui: UIContext,
    animator: Animator<ObjectId, Motion>,
    mode: GameMode,
    /// Throwing target in world coordinates.
    cursor: Point,
    last_mouse: Option<(i32, i32)>,
    turn: u32,
    kills: u32,
    npc_turn_pending: bool,
    rng: RandomNumberGenerator,
}

impl ThicketGame {
    /// Creates a new game with a generated map.
    pub fn new(settings: &Settings, assets: Assets, seed: u64) -> GameResult<Self> {
        let generated = generate(seed, &assets, settings.game.gen_params())?;
        let mut game = Self::from_world(generated.world, generated.player, assets, settings)?;
        game.rng = RandomNumberGenerator::seeded(seed);
        game.ui.add_log("You wake in a clearing. Press F1 for help.")?;
        Ok(game)
    }

    /// Wraps an existing world whose player is `player`.
    pub fn from_world(
        world: World,
        player: ObjectId,
        assets: Assets,
        settings: &Settings,
    ) -> GameResult<Self> {
        let input = InputConfig::from_settings(&settings.keys)?;
        let palette = if settings.ui.colorblind {
            ColorPalette::colorblind()
        } else {
            ColorPalette::default()
        };
        let cursor = world.objects.get(player)?.pos;
        Ok(Self {
            world,
            player,
            assets,
            settings: settings.game.clone(),
            input,
            ui: UIContext::new(palette),
            animator: Animator::default(),
            mode: GameMode::Default,
            cursor,
            last_mouse: None,
            turn: 0,
            kills: 0,
            npc_turn_pending: false,
            rng: RandomNumberGenerator::seeded(settings.game.seed),
        })
    }

    /// Returns the current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Advances animations by `dt_ms` and resolves at most one turn step.
    pub fn frame(&mut self, dt_ms: f32, command: Option<Command>) -> GameResult<()> {
        self.update_animations(dt_ms);
        self.resolve(command)
    }

    /// Reads this frame's command from the mouse or keyboard.
    fn read_command(&mut self, ctx: &BTerm) -> Option<Command> {
        let (mx, my) = ctx.mouse_pos();
        let on_map = mx >= 0 && my >= 0 && mx < VIEW_WIDTH && my < VIEW_HEIGHT;
        if on_map {
            let world = self.screen_to_world(mx, my);
            let moved = self.last_mouse != Some((mx, my));
            if moved && matches!(self.mode, GameMode::Throwing { .. }) {
                self.cursor = world;
            }
            self.last_mouse = Some((mx, my));
            if ctx.left_click {
                return Some(Command::Click(world));
            }
        }
        ctx.key.and_then(|k| self.input.command_for(k))
    }
}

impl GameState for ThicketGame {
    fn tick(&mut self, ctx: &mut BTerm) {
        let command = self.read_command(ctx);
        if command == Some(Command::Quit) {
            ctx.quit();
            return;
        }
        if let Err(e) = self.frame(ctx.frame_time_ms, command) {
            log::error!("Turn failed: {}", e);
            self.ui.add_log(&format!("Something went wrong: {}", e)).ok();
        }
        ctx.cls();
        self.render(ctx);
    }
}

fn load_game_assets() -> GameResult<Assets> {
    #[cfg(target_arch = "wasm32")]
    {
        data::load_assets_embedded()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/objects.json");
        data::load_assets(path)
    }
}

/// Runs the game loop using [`bracket-lib`] with settings from [`CONFIG_PATH`].
pub fn run() -> BError {
    #[cfg(target_arch = "wasm32")]
    let settings = Settings::default();
    #[cfg(not(target_arch = "wasm32"))]
    let settings = Settings::load(CONFIG_PATH)?;
    run_with(settings)
}

/// Runs the game loop with the given settings.
pub fn run_with(settings: Settings) -> BError {
    let assets = load_game_assets()?;
    init_subsystems(&settings, &assets)?;

    let context = BTermBuilder::simple(80, 25)?
        .with_title("Thicket")
        .build()?;
    let gs = ThicketApp::new(settings, assets);
    main_loop(context, gs)
}

/// Checks that the configured world can be built before opening a window.
fn init_subsystems(settings: &Settings, assets: &Assets) -> GameResult<()> {
    InputConfig::from_settings(&settings.keys)?;
    let generated = generate(settings.game.seed, assets, settings.game.gen_params())?;
    log::info!(
        "Subsystems ready: {}x{} map, {} objects",
        generated.world.map.width,
        generated.world.map.height,
        generated.world.objects.len()
    );
    Ok(())
}
