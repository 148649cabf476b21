use glam::IVec2;
use hecs::World;
use tracing::debug;

use crate::components::{Ball, Body, Paddle, Side};
use crate::hal::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::resources::Events;

/// Axis-aligned bounding box, both edges inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub max: IVec2,
}

impl Aabb {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Overlap or shared edge on both axes
    pub fn touches(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Screen edge hit by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Right,
    Up,
    Down,
}

impl Wall {
    /// Side awarded the point when the ball reaches this wall
    pub fn scorer(self) -> Option<Side> {
        match self {
            Wall::Left => Some(Side::Right),
            Wall::Right => Some(Side::Left),
            Wall::Up | Wall::Down => None,
        }
    }
}

/// `[pos, pos + size]` using the geometry's declared box
pub fn bounding_box(body: &Body) -> Aabb {
    Aabb::new(body.pos, body.pos + body.geometry.size())
}

pub fn colliding_with_paddle(ball: &Body, paddle: &Body) -> bool {
    bounding_box(ball).touches(&bounding_box(paddle))
}

pub fn colliding_with_paddles(ball: &Body, left: &Body, right: &Body) -> bool {
    colliding_with_paddle(ball, left) || colliding_with_paddle(ball, right)
}

/// First screen edge the ball has crossed.
///
/// Edges are tested left, right, up, down; in a corner only the first one
/// in that order is reported.
pub fn check_wall_collision(ball: &Body) -> Option<Wall> {
    let bb = bounding_box(ball);

    if bb.min.x < 1 {
        Some(Wall::Left)
    } else if bb.max.x > SCREEN_WIDTH {
        Some(Wall::Right)
    } else if bb.min.y < 1 {
        Some(Wall::Up)
    } else if bb.max.y > SCREEN_HEIGHT {
        Some(Wall::Down)
    } else {
        None
    }
}

/// Resolve ball contacts for this tick.
///
/// A paddle hit reverses the horizontal direction. The top and bottom walls
/// reverse the vertical direction; the side walls end the round in favour
/// of the opposite player without bouncing.
pub fn check_collisions(world: &mut World, events: &mut Events) {
    let mut paddles: [Option<Body>; 2] = [None, None];
    for (_entity, paddle) in world.query::<&Paddle>().iter() {
        paddles[paddle.side.index()] = Some(paddle.body);
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let hit_paddle = match &paddles {
            [Some(left), Some(right)] => colliding_with_paddles(&ball.body, left, right),
            others => others
                .iter()
                .flatten()
                .any(|paddle| colliding_with_paddle(&ball.body, paddle)),
        };
        if hit_paddle {
            ball.body.vel.x = -ball.body.vel.x;
            events.ball_hit_paddle = true;
        }

        let Some(wall) = check_wall_collision(&ball.body) else {
            continue;
        };
        events.ball_hit_wall = Some(wall);
        match wall.scorer() {
            Some(side) => {
                debug!(?wall, ?side, "ball reached back wall");
                events.scored = Some(side);
            }
            None => ball.body.vel.y = -ball.body.vel.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BALL, PADDLE};
    use crate::{create_ball, create_paddle};

    fn ball_at(x: i32, y: i32) -> Body {
        Body::new(&BALL, IVec2::new(x, y), IVec2::ZERO)
    }

    fn paddle_at(x: i32, y: i32) -> Body {
        Body::new(&PADDLE, IVec2::new(x, y), IVec2::ZERO)
    }

    #[test]
    fn test_bounding_box_uses_declared_size() {
        let bb = bounding_box(&paddle_at(10, 30));
        assert_eq!(bb, Aabb::new(IVec2::new(10, 30), IVec2::new(15, 38)));
    }

    #[test]
    fn test_touching_edges_collide() {
        let paddle = paddle_at(10, 30);
        // Ball box [15, 19] shares x = 15 with the paddle box [10, 15]
        assert!(colliding_with_paddle(&ball_at(15, 30), &paddle));
        // Ball box [6, 10] shares x = 10
        assert!(colliding_with_paddle(&ball_at(6, 34), &paddle));
        // Ball box y [38, 42] shares y = 38
        assert!(colliding_with_paddle(&ball_at(12, 38), &paddle));
        assert!(!colliding_with_paddle(&ball_at(16, 30), &paddle));
        assert!(!colliding_with_paddle(&ball_at(12, 39), &paddle));
    }

    #[test]
    fn test_colliding_with_paddles() {
        let left = paddle_at(10, 30);
        let right = paddle_at(110, 30);
        assert!(colliding_with_paddles(&ball_at(106, 30), &left, &right));
        assert!(colliding_with_paddles(&ball_at(12, 30), &left, &right));
        assert!(!colliding_with_paddles(&ball_at(62, 30), &left, &right));
    }

    #[test]
    fn test_wall_sides() {
        assert_eq!(check_wall_collision(&ball_at(62, 30)), None);
        assert_eq!(check_wall_collision(&ball_at(0, 30)), Some(Wall::Left));
        assert_eq!(check_wall_collision(&ball_at(125, 30)), Some(Wall::Right));
        assert_eq!(check_wall_collision(&ball_at(62, 0)), Some(Wall::Up));
        assert_eq!(check_wall_collision(&ball_at(62, 61)), Some(Wall::Down));
        // Boundaries themselves are fine
        assert_eq!(check_wall_collision(&ball_at(1, 1)), None);
        assert_eq!(check_wall_collision(&ball_at(124, 60)), None);
    }

    #[test]
    fn test_corner_reports_higher_priority_side() {
        assert_eq!(check_wall_collision(&ball_at(-3, -2)), Some(Wall::Left));
        assert_eq!(check_wall_collision(&ball_at(130, 70)), Some(Wall::Right));
        assert_eq!(check_wall_collision(&ball_at(60, -1)), Some(Wall::Up));
        assert_eq!(check_wall_collision(&ball_at(-1, 70)), Some(Wall::Left));
    }

    fn setup_world() -> (World, Events) {
        let mut world = World::new();
        create_paddle(&mut world, Side::Left, IVec2::new(10, 30));
        create_paddle(&mut world, Side::Right, IVec2::new(110, 30));
        (world, Events::new())
    }

    fn ball_vel(world: &World) -> IVec2 {
        world.query::<&Ball>().iter().next().map(|(_e, b)| b.body.vel).unwrap()
    }

    #[test]
    fn test_ball_bounces_off_paddle() {
        let (mut world, mut events) = setup_world();
        create_ball(&mut world, IVec2::new(12, 32), IVec2::new(-5, 1));

        check_collisions(&mut world, &mut events);

        assert_eq!(ball_vel(&world), IVec2::new(5, 1));
        assert!(events.ball_hit_paddle);
        assert!(!events.round_ended());
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, mut events) = setup_world();
        create_ball(&mut world, IVec2::new(60, 0), IVec2::new(5, -2));

        check_collisions(&mut world, &mut events);

        assert_eq!(ball_vel(&world), IVec2::new(5, 2), "Y velocity reversed");
        assert_eq!(events.ball_hit_wall, Some(Wall::Up));
        assert!(!events.round_ended());
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, mut events) = setup_world();
        create_ball(&mut world, IVec2::new(60, 62), IVec2::new(-5, 3));

        check_collisions(&mut world, &mut events);

        assert_eq!(ball_vel(&world), IVec2::new(-5, -3));
        assert_eq!(events.ball_hit_wall, Some(Wall::Down));
    }

    #[test]
    fn test_side_wall_scores_without_bounce() {
        let (mut world, mut events) = setup_world();
        create_ball(&mut world, IVec2::new(-3, 30), IVec2::new(-5, 0));

        check_collisions(&mut world, &mut events);

        assert_eq!(ball_vel(&world), IVec2::new(-5, 0), "No bounce on a side wall");
        assert_eq!(events.ball_hit_wall, Some(Wall::Left));
        assert_eq!(events.scored, Some(Side::Right));
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let (mut world, mut events) = setup_world();
        check_collisions(&mut world, &mut events);
        assert_eq!(events, Events::default());
    }
}
