use hecs::World;
use tracing::trace;

use crate::components::{Ball, Paddle, Sprite};
use crate::config::Config;
use crate::hal::PixelSurface;

/// Apply paddle velocities.
///
/// A paddle only moves if its new position stays inside the band; otherwise
/// the move is dropped for this tick (the paddle is not clamped to the edge).
pub fn move_paddles<S: PixelSurface>(world: &mut World, lcd: &mut S, config: &Config) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        let target = paddle.body.next_pos();
        if config.paddle_in_band(target.y) {
            paddle.advance(lcd);
        } else {
            trace!(side = ?paddle.side, y = target.y, "paddle move dropped");
        }
    }
}

/// Move ball based on velocity
pub fn move_ball<S: PixelSurface>(world: &mut World, lcd: &mut S) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.advance(lcd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Side;
    use crate::hal::memory::FrameBuffer;
    use crate::{create_ball, create_paddle};
    use glam::IVec2;

    #[test]
    fn test_paddle_moves_inside_band() {
        let mut world = World::new();
        let mut lcd = FrameBuffer::new();
        let config = Config::new();
        let paddle = create_paddle(&mut world, Side::Left, IVec2::new(10, 30));
        world.query_one_mut::<&mut Paddle>(paddle).unwrap().set_speed(IVec2::new(0, -2));

        move_paddles(&mut world, &mut lcd, &config);

        let body = world.get::<&Paddle>(paddle).unwrap().body;
        assert_eq!(body.pos, IVec2::new(10, 28));
        assert!(lcd.get(10, 28), "Paddle drawn at new position");
    }

    #[test]
    fn test_paddle_move_leaving_band_is_dropped() {
        let mut world = World::new();
        let mut lcd = FrameBuffer::new();
        let config = Config::new();
        let top = create_paddle(&mut world, Side::Left, IVec2::new(10, 5));
        let bottom = create_paddle(&mut world, Side::Right, IVec2::new(110, 51));
        world.query_one_mut::<&mut Paddle>(top).unwrap().set_speed(IVec2::new(0, -2));
        world.query_one_mut::<&mut Paddle>(bottom).unwrap().set_speed(IVec2::new(0, 4));

        move_paddles(&mut world, &mut lcd, &config);

        // 5 - 2 = 3 and 51 + 4 = 55 are both outside, neither is clamped
        assert_eq!(world.get::<&Paddle>(top).unwrap().body.pos.y, 5);
        assert_eq!(world.get::<&Paddle>(bottom).unwrap().body.pos.y, 51);
        assert!(lcd.is_blank(), "A dropped move does not redraw");
    }

    #[test]
    fn test_move_ball() {
        let mut world = World::new();
        let mut lcd = FrameBuffer::new();
        let ball = create_ball(&mut world, IVec2::new(62, 30), IVec2::new(5, -1));

        move_ball(&mut world, &mut lcd);

        assert_eq!(world.get::<&Ball>(ball).unwrap().body.pos, IVec2::new(67, 29));
        assert!(!lcd.is_blank());
    }
}
