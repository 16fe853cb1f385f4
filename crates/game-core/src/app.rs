use super::{GameMode, Settings, ThicketGame};
use bracket_lib::prelude::*;
use data::Assets;

pub enum AppState {
    Menu { error: Option<String> },
    Running(Box<ThicketGame>),
    Summary { turns: u32, kills: u32 },
}

pub struct ThicketApp {
    state: AppState,
    settings: Settings,
    assets: Assets,
    games_started: u64,
}

impl ThicketApp {
    pub fn new(settings: Settings, assets: Assets) -> Self {
        Self {
            state: AppState::Menu { error: None },
            settings,
            assets,
            games_started: 0,
        }
    }

    /// Each new game gets the next seed after the configured one.
    fn start_game(&mut self) {
        let seed = self.settings.game.seed.wrapping_add(self.games_started);
        self.games_started += 1;
        self.state = match ThicketGame::new(&self.settings, self.assets.clone(), seed) {
            Ok(game) => {
                log::info!("Starting game with seed {}", seed);
                AppState::Running(Box::new(game))
            }
            Err(e) => {
                log::error!("Could not start game: {}", e);
                AppState::Menu {
                    error: Some(e.to_string()),
                }
            }
        };
    }

    fn update_state(&mut self, ctx: &mut BTerm) -> bool {
        use VirtualKeyCode::*;
        let key = ctx.key;
        match &mut self.state {
            AppState::Menu { .. } => match key {
                Some(Return) => {
                    self.start_game();
                    false
                }
                Some(Q) => true,
                _ => false,
            },
            AppState::Running(game) => {
                game.tick(ctx);
                if let GameMode::End { turns, kills } = game.mode() {
                    self.state = AppState::Summary { turns, kills };
                }
                false
            }
            AppState::Summary { .. } => match key {
                Some(Return) => {
                    self.state = AppState::Menu { error: None };
                    false
                }
                Some(Q) => true,
                _ => false,
            },
        }
    }
}

impl GameState for ThicketApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let quit = self.update_state(ctx);
        if quit {
            ctx.quit();
            return;
        }
        match &self.state {
            AppState::Menu { error } => {
                ctx.cls();
                ctx.print_centered(10, "Thicket");
                ctx.print_centered(12, "Press Enter to begin");
                ctx.print_centered(14, "Press Q to Quit");
                if let Some(e) = error {
                    ctx.print_color_centered(17, RGB::named(RED), RGB::named(BLACK), e);
                }
            }
            AppState::Running(_) => {
                // game.tick already rendered
            }
            AppState::Summary { turns, kills } => {
                ctx.cls();
                ctx.print_centered(10, "You have fallen.");
                ctx.print_centered(12, format!("Turns survived: {}  Kills: {}", turns, kills));
                ctx.print_centered(14, "Press Enter for Menu, Q to Quit");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_lib::prelude::{BTerm, VirtualKeyCode, RGB};

    fn dummy_ctx(key: VirtualKeyCode) -> BTerm {
        BTerm {
            width_pixels: 0,
            height_pixels: 0,
            original_height_pixels: 0,
            original_width_pixels: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            active_console: 0,
            key: Some(key),
            mouse_pos: (0, 0),
            left_click: false,
            shift: false,
            control: false,
            alt: false,
            web_button: None,
            quitting: false,
            post_scanlines: false,
            post_screenburn: false,
            screen_burn_color: RGB::from_f32(0.0, 0.0, 0.0),
            mouse_visible: true,
        }
    }

    fn app() -> ThicketApp {
        ThicketApp::new(
            Settings::default(),
            data::load_assets_embedded().expect("assets"),
        )
    }

    #[test]
    fn enter_from_menu_starts_game() {
        let mut app = app();
        let mut ctx = dummy_ctx(VirtualKeyCode::Return);
        assert!(!app.update_state(&mut ctx));
        assert!(matches!(app.state, AppState::Running(_)));
        assert_eq!(app.games_started, 1);
    }

    #[test]
    fn q_quits_from_menu() {
        let mut app = app();
        let mut ctx = dummy_ctx(VirtualKeyCode::Q);
        assert!(app.update_state(&mut ctx));
    }

    #[test]
    fn bad_settings_stay_on_menu_with_error() {
        let mut settings = Settings::default();
        settings.keys.rest = vec!["Banana".to_string()];
        let mut app = ThicketApp::new(settings, data::load_assets_embedded().unwrap());
        let mut ctx = dummy_ctx(VirtualKeyCode::Return);
        app.update_state(&mut ctx);
        assert!(matches!(app.state, AppState::Menu { error: Some(_) }));
    }

    #[test]
    fn summary_return_goes_to_menu() {
        let mut app = app();
        app.state = AppState::Summary { turns: 10, kills: 2 };
        let mut ctx = dummy_ctx(VirtualKeyCode::Return);
        app.update_state(&mut ctx);
        assert!(matches!(app.state, AppState::Menu { error: None }));
    }
}
