//! NPC decision making.
use bracket_lib::prelude::RandomNumberGenerator;
use common::{GameResult, ObjectId, Point, CARDINAL_DIRECTIONS};
use data::{BehaviourKind, Tag};
use mapgen::World;

/// Mobs notice the target within this Manhattan distance.
pub const CHASE_RADIUS: i32 = 6;

/// What a mob wants to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Wait,
    /// Move by the given unit delta.
    Step(Point),
}

/// Single step from `from` towards `to` along the longer axis.
///
/// Ties step vertically. Returns a zero delta when the points coincide.
pub fn step_towards(from: Point, to: Point) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > dy.abs() {
        Point::new(dx.signum(), 0)
    } else {
        Point::new(0, dy.signum())
    }
}

/// Decides the intent of `mob` for this turn.
pub fn decide(
    world: &World,
    mob: ObjectId,
    target: Point,
    rng: &mut RandomNumberGenerator,
) -> GameResult<Intent> {
    let object = world.objects.get(mob)?;
    let pos = object.pos;
    let intent = match object.behaviour {
        BehaviourKind::Idle => Intent::Wait,
        BehaviourKind::Wander => wander(world, pos, rng),
        BehaviourKind::Chase => {
            if pos.manhattan(target) <= CHASE_RADIUS {
                chase(world, pos, target)
            } else {
                wander(world, pos, rng)
            }
        }
    };
    Ok(intent)
}

fn wander(world: &World, pos: Point, rng: &mut RandomNumberGenerator) -> Intent {
    let roll = rng.range(0, CARDINAL_DIRECTIONS.len() as i32 + 1) as usize;
    match CARDINAL_DIRECTIONS.get(roll) {
        Some(&d) if is_open(world, pos.offset(d.x, d.y)) => Intent::Step(d),
        _ => Intent::Wait,
    }
}

fn chase(world: &World, pos: Point, target: Point) -> Intent {
    let primary = step_towards(pos, target);
    if primary == Point::default() {
        return Intent::Wait;
    }
    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    let secondary = if primary.x != 0 {
        Point::new(0, dy.signum())
    } else {
        Point::new(dx.signum(), 0)
    };
    for step in [primary, secondary] {
        if step == Point::default() {
            continue;
        }
        let next = pos.offset(step.x, step.y);
        // Bumping into the target is how mobs attack.
        if next == target || is_open(world, next) {
            return Intent::Step(step);
        }
    }
    Intent::Wait
}

fn is_open(world: &World, pt: Point) -> bool {
    !world.map.is_out_of_bounds(pt.x, pt.y) && !world.any_at(pt, |o| o.has_tag(Tag::Blocking))
}
