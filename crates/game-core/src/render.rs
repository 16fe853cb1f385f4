use super::*;

/// Visible region of the map in cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Viewport {
    pub x: f32,
    pub y: f32,
    pub w: i32,
    pub h: i32,
}

/// Keeps `start` inside the map; maps narrower than the view pin to 0.
fn clamp_axis(start: f32, map_len: u32, view_len: i32) -> f32 {
    let max = map_len as i32 - view_len;
    if max <= 0 {
        0.0
    } else {
        start.clamp(0.0, max as f32)
    }
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cell-centre points of the dotted line from `from` to `to`, excluding `from`.
pub(crate) fn targeting_line(from: Point, to: Point) -> Vec<(f32, f32)> {
    let (x1, y1) = (from.x as f32 + 0.5, from.y as f32 + 0.5);
    let (x2, y2) = (to.x as f32 + 0.5, to.y as f32 + 0.5);
    let dots = from.manhattan(to);
    (1..=dots)
        .map(|i| {
            let t = i as f32 / dots as f32;
            (lerp(x1, x2, t), lerp(y1, y2, t))
        })
        .collect()
}

fn rgb(color: [u8; 3]) -> RGB {
    RGB::from_u8(color[0], color[1], color[2])
}

impl ThicketGame {
    /// Viewport centred on the player's visual position.
    pub(crate) fn viewport(&self) -> Viewport {
        let (cx, cy) = match self.world.objects.get(self.player) {
            Ok(p) => (
                p.pos.x as f32 + p.sprite.visual_x(),
                p.pos.y as f32 + p.sprite.visual_y(),
            ),
            Err(_) => (0.0, 0.0),
        };
        let x = cx - (VIEW_WIDTH / 2) as f32;
        let y = cy - (VIEW_HEIGHT / 2) as f32;
        Viewport {
            x: clamp_axis(x, self.world.map.width, VIEW_WIDTH),
            y: clamp_axis(y, self.world.map.height, VIEW_HEIGHT),
            w: VIEW_WIDTH,
            h: VIEW_HEIGHT,
        }
    }

    /// The viewport snapped to whole cells; everything is drawn relative to it.
    pub(crate) fn logical_viewport(&self) -> Viewport {
        let v = self.viewport();
        Viewport {
            x: v.x.floor(),
            y: v.y.floor(),
            ..v
        }
    }

    pub(crate) fn screen_to_world(&self, sx: i32, sy: i32) -> Point {
        let v = self.logical_viewport();
        Point::new(
            (sx as f32 + v.x).floor() as i32,
            (sy as f32 + v.y).floor() as i32,
        )
    }

    pub(crate) fn world_to_screen(&self, pt: Point) -> Point {
        let v = self.logical_viewport();
        Point::new(pt.x - v.x as i32, pt.y - v.y as i32)
    }

    fn on_screen(&self, screen: Point) -> bool {
        screen.x >= 0 && screen.y >= 0 && screen.x < VIEW_WIDTH && screen.y < VIEW_HEIGHT
    }

    pub(crate) fn render(&self, ctx: &mut BTerm) {
        if self.ui.layout() == UILayout::Help {
            self.ui.draw_help(ctx).ok();
            return;
        }
        self.draw_map(ctx);
        self.draw_objects(ctx);
        if let GameMode::Throwing { .. } = self.mode {
            self.draw_targeting(ctx);
        }
        self.ui.draw_logs(ctx).ok();
        if let Ok(player) = self.world.objects.get(self.player) {
            let (hp, max_hp) = player.vitality.map_or((0, 0), |v| (v.hp, v.max_hp));
            let holding = player
                .holding
                .and_then(|id| self.world.objects.get(id).ok())
                .map(|o| o.name.as_str());
            self.ui
                .draw_status(ctx, hp, max_hp, holding, self.turn, self.kills)
                .ok();
        }
        self.ui.draw_mode_hint(ctx, self.mode_hint()).ok();
    }

    /// Draws the terrain of every visible cell.
    fn draw_map(&self, ctx: &mut BTerm) {
        let v = self.logical_viewport();
        for sy in 0..v.h {
            for sx in 0..v.w {
                let pt = Point::new(v.x as i32 + sx, v.y as i32 + sy);
                if let (Some(cell), Some(terrain)) =
                    (self.world.map.cell(pt), self.world.map.terrain_of(pt))
                {
                    ctx.set(
                        sx,
                        sy,
                        rgb(terrain.color),
                        RGB::named(BLACK),
                        to_cp437(cell.tile.glyph),
                    );
                }
            }
        }
    }

    /// Draws objects in cell order, displaced by their sprite offsets.
    fn draw_objects(&self, ctx: &mut BTerm) {
        let v = self.logical_viewport();
        for sy in 0..v.h {
            for sx in 0..v.w {
                let pt = Point::new(v.x as i32 + sx, v.y as i32 + sy);
                let cell = match self.world.map.cell(pt) {
                    Some(c) => c,
                    None => continue,
                };
                let objects = cell.objects.iter().filter_map(|id| self.world.objects.get(*id).ok());
                for object in objects {
                    let screen = Point::new(
                        (object.pos.x as f32 + object.sprite.visual_x() - v.x).round() as i32,
                        (object.pos.y as f32 + object.sprite.visual_y() - v.y).round() as i32,
                    );
                    if !self.on_screen(screen) {
                        continue;
                    }
                    let mut color = rgb(object.color);
                    if object.has_tag(Tag::Occludes) && self.is_occluding(object.pos) {
                        color = color * 0.5;
                    }
                    ctx.set(screen.x, screen.y, color, RGB::named(BLACK), to_cp437(object.glyph));
                }
            }
        }
    }

    /// Whether a mobile object stands in the cell just above `pt`.
    pub(crate) fn is_occluding(&self, pt: Point) -> bool {
        self.world
            .any_at(pt.offset(0, -1), |o| o.has_tag(Tag::Mobile))
    }

    fn draw_targeting(&self, ctx: &mut BTerm) {
        let from = match self.world.objects.get(self.player) {
            Ok(p) => p.pos,
            Err(_) => return,
        };
        let v = self.logical_viewport();
        let palette = self.ui.palette();
        for (x, y) in targeting_line(from, self.cursor) {
            let screen = Point::new((x - v.x).floor() as i32, (y - v.y).floor() as i32);
            if self.on_screen(screen) {
                ctx.set(screen.x, screen.y, palette.target, RGB::named(BLACK), to_cp437('∙'));
            }
        }
        let cursor = self.world_to_screen(self.cursor);
        if self.on_screen(cursor) {
            ctx.set(cursor.x, cursor.y, palette.cursor, RGB::named(BLACK), to_cp437('X'));
        }
    }
}
