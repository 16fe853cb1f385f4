use anim::Tween;
use common::ObjectId;
use objects::SpriteOffset;

/// Height of the hop played while stepping, in cells.
pub const HOP_HEIGHT: f32 = 0.25;

/// Current game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Default,
    /// Aiming the held `item`.
    Throwing { item: ObjectId },
    End { turns: u32, kills: u32 },
}

/// Sprite animation attached to an object, with the offset it starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Slide from the previous cell with a small hop.
    Step { from_x: f32, from_y: f32 },
    /// Lunge halfway into a blocked cell and back.
    Bump { from_x: f32, from_y: f32 },
    /// Thrown item flying in from the thrower.
    Flight { from_x: f32, from_y: f32 },
}

impl Motion {
    /// Sprite offset at the tween's current progress.
    pub fn sprite_at(&self, tween: &Tween) -> SpriteOffset {
        let remaining = 1.0 - tween.eased();
        match *self {
            Motion::Step { from_x, from_y } => SpriteOffset {
                offset_x: from_x * remaining,
                offset_y: from_y * remaining,
                bump_z: (tween.raw() * std::f32::consts::PI).sin() * HOP_HEIGHT,
                ..SpriteOffset::default()
            },
            Motion::Bump { from_x, from_y } => SpriteOffset {
                bump_x: from_x * remaining,
                bump_y: from_y * remaining,
                ..SpriteOffset::default()
            },
            Motion::Flight { from_x, from_y } => SpriteOffset {
                offset_x: from_x * remaining,
                offset_y: from_y * remaining,
                ..SpriteOffset::default()
            },
        }
    }
}
