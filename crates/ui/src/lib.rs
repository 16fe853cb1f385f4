//! UI context: message log, status panel and help screen.
use bracket_lib::prelude::{BTerm, BLACK, CYAN, GRAY, GREEN, ORANGE, RED, RGB, WHITE, YELLOW};
use common::GameResult;

const LOG_Y: i32 = 17;
const LOG_WINDOW: i32 = 8;
const STATUS_X: i32 = 61;

/// UI layout type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UILayout {
    /// Map, log and status panel.
    Standard,
    /// Layout showing help and controls.
    Help,
}

/// Colors for interface elements. Object and terrain colors come from assets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub text: RGB,
    pub highlight: RGB,
    pub hp_good: RGB,
    pub hp_low: RGB,
    pub cursor: RGB,
    pub target: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            text: RGB::named(WHITE),
            highlight: RGB::named(YELLOW),
            hp_good: RGB::named(GREEN),
            hp_low: RGB::named(RED),
            cursor: RGB::named(CYAN),
            target: RGB::named(GRAY),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            text: RGB::named(WHITE),
            highlight: RGB::named(YELLOW),
            hp_good: RGB::named(WHITE),
            hp_low: RGB::named(ORANGE),
            cursor: RGB::named(YELLOW),
            target: RGB::named(WHITE),
        }
    }
}

/// Basic UI context for logging and layout.
pub struct UIContext {
    logs: Vec<String>,
    scroll: usize,
    layout: UILayout,
    palette: ColorPalette,
}

impl Default for UIContext {
    fn default() -> Self {
        Self::new(ColorPalette::default())
    }
}

impl UIContext {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            logs: Vec::new(),
            scroll: 0,
            layout: UILayout::Standard,
            palette,
        }
    }

    /// Sets the current layout.
    pub fn set_layout(&mut self, layout: UILayout) {
        self.layout = layout;
    }

    /// Returns the current layout.
    pub fn layout(&self) -> UILayout {
        self.layout
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn toggle_help(&mut self) {
        self.layout = match self.layout {
            UILayout::Help => UILayout::Standard,
            UILayout::Standard => UILayout::Help,
        };
    }

    /// Adds a message to the log queue.
    pub fn add_log(&mut self, msg: &str) -> GameResult<()> {
        self.logs.push(msg.to_string());
        log::info!("{}", msg);
        Ok(())
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Scrolls log view one line up.
    pub fn scroll_up(&mut self) {
        if self.scroll + (LOG_WINDOW as usize) < self.logs.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls log view one line down.
    pub fn scroll_down(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
        }
    }

    /// Draws log window to the screen.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout == UILayout::Help {
            return Ok(());
        }
        for (i, line) in self.visible_logs().iter().enumerate() {
            ctx.print(0, LOG_Y + i as i32, line);
        }
        Ok(())
    }

    fn visible_logs(&self) -> &[String] {
        let start = self
            .logs
            .len()
            .saturating_sub(LOG_WINDOW as usize + self.scroll);
        let end = std::cmp::min(start + LOG_WINDOW as usize, self.logs.len());
        &self.logs[start..end]
    }

    /// Draws a status panel on the right side.
    pub fn draw_status(
        &self,
        ctx: &mut BTerm,
        hp: i32,
        max_hp: i32,
        holding: Option<&str>,
        turn: u32,
        kills: u32,
    ) -> GameResult<()> {
        if self.layout == UILayout::Help {
            return Ok(());
        }
        let color = if hp * 3 > max_hp {
            self.palette.hp_good
        } else {
            self.palette.hp_low
        };
        ctx.print_color(
            STATUS_X,
            1,
            color,
            RGB::named(BLACK),
            format!("HP {}", hp_bar_string(hp, max_hp)),
        );
        ctx.print(STATUS_X, 3, format!("Holding: {}", holding.unwrap_or("-")));
        ctx.print(STATUS_X, 5, format!("Turn: {}", turn));
        ctx.print(STATUS_X, 6, format!("Kills: {}", kills));
        Ok(())
    }

    /// Draws a one-line hint describing the current mode.
    pub fn draw_mode_hint(&self, ctx: &mut BTerm, hint: &str) -> GameResult<()> {
        if self.layout == UILayout::Help {
            return Ok(());
        }
        ctx.print_color(STATUS_X, 8, self.palette.highlight, RGB::named(BLACK), hint);
        Ok(())
    }

    /// Draws help text when in `Help` layout.
    pub fn draw_help(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout != UILayout::Help {
            return Ok(());
        }
        for (i, line) in help_strings().iter().enumerate() {
            ctx.print_centered(5 + i as i32, line);
        }
        Ok(())
    }
}

/// Renders `hp` out of `max` as a ten segment bar.
pub fn hp_bar_string(hp: i32, max: i32) -> String {
    let width = 10;
    let filled = if max <= 0 {
        0
    } else {
        ((hp.clamp(0, max) as f32 / max as f32) * width as f32).round() as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn help_strings() -> Vec<String> {
    vec![
        "Controls:".to_string(),
        "Arrows / WASD / hjkl: Move, bump to attack".to_string(),
        "Click: Step towards the cursor".to_string(),
        ".: Rest".to_string(),
        "Space: Use held item".to_string(),
        "Esc: Cancel throw".to_string(),
        "PgUp/PgDn: Scroll log".to_string(),
        "F1: Toggle this help".to_string(),
        "Q: Quit".to_string(),
    ]
}
