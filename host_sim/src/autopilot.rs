//! Computer player: presses the steering keys a human would.

use clap::ValueEnum;
use game_core::hal::SCREEN_HEIGHT;
use game_core::{Body, KeyBindings, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which paddles the computer steers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Seats {
    Off,
    Left,
    Right,
    Both,
}

impl Seats {
    pub fn controls(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Seats::Both, _) | (Seats::Left, Side::Left) | (Seats::Right, Side::Right)
        )
    }
}

/// Object positions seen before a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct Observation {
    pub ball: Option<Body>,
    pub paddles: [Option<Body>; 2],
}

pub struct Autopilot {
    seats: Seats,
    rng: StdRng,
}

impl Autopilot {
    pub fn new(seats: Seats, seed: u64) -> Self {
        Self {
            seats,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.seats != Seats::Off
    }

    /// Keys to hold for the next scan. Start is always held so a computer
    /// match never stalls on the start screen.
    pub fn keys(&mut self, obs: &Observation, bindings: &KeyBindings) -> Vec<u8> {
        let mut keys = Vec::new();
        if !self.is_active() {
            return keys;
        }
        keys.push(bindings.start);

        for side in [Side::Left, Side::Right] {
            if !self.seats.controls(side) {
                continue;
            }
            let (Some(ball), Some(paddle)) = (obs.ball, obs.paddles[side.index()]) else {
                continue;
            };
            // Reaction jitter so the two sides don't mirror each other
            let dead_zone = self.rng.gen_range(1..=4);
            match steer(side, &ball, &paddle, dead_zone) {
                d if d < 0 => keys.push(match side {
                    Side::Left => bindings.left_up,
                    Side::Right => bindings.right_up,
                }),
                d if d > 0 => keys.push(match side {
                    Side::Left => bindings.left_down,
                    Side::Right => bindings.right_down,
                }),
                _ => {}
            }
        }
        keys
    }
}

/// Direction (-1 up, 0 stay, 1 down) that brings the paddle centre toward
/// where the ball will cross its column, or back to mid-court when the ball
/// is heading away.
pub fn steer(side: Side, ball: &Body, paddle: &Body, dead_zone: i32) -> i32 {
    let ball_centre = ball.pos.y + ball.geometry.size().y / 2;
    let paddle_centre = paddle.pos.y + paddle.geometry.size().y / 2;

    let approaching = match side {
        Side::Left => ball.vel.x < 0,
        Side::Right => ball.vel.x > 0,
    };

    let target = if approaching {
        let ticks = (paddle.pos.x - ball.pos.x).abs() / ball.vel.x.abs().max(1);
        (ball_centre + ball.vel.y * ticks).clamp(0, SCREEN_HEIGHT - 1)
    } else {
        SCREEN_HEIGHT / 2
    };

    let diff = target - paddle_centre;
    if diff > dead_zone {
        1
    } else if diff < -dead_zone {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::geometry::{BALL, PADDLE};
    use glam::IVec2;
    use pretty_assertions::assert_eq;

    fn ball(pos: (i32, i32), vel: (i32, i32)) -> Body {
        Body::new(&BALL, IVec2::new(pos.0, pos.1), IVec2::new(vel.0, vel.1))
    }

    fn paddle(x: i32, y: i32) -> Body {
        Body::new(&PADDLE, IVec2::new(x, y), IVec2::ZERO)
    }

    #[test]
    fn test_steer_toward_incoming_ball() {
        let incoming = ball((60, 10), (-5, 0));
        assert_eq!(steer(Side::Left, &incoming, &paddle(10, 30), 2), -1);

        let low = ball((60, 50), (-5, 0));
        assert_eq!(steer(Side::Left, &low, &paddle(10, 30), 2), 1);
    }

    #[test]
    fn test_steer_returns_to_centre_when_ball_leaves() {
        let leaving = ball((60, 5), (5, 0));
        // Paddle centre 34 vs court centre 32, inside the dead zone
        assert_eq!(steer(Side::Left, &leaving, &paddle(10, 30), 2), 0);
        assert_eq!(steer(Side::Left, &leaving, &paddle(10, 10), 2), 1);
    }

    #[test]
    fn test_keys_only_for_controlled_seats() {
        let obs = Observation {
            ball: Some(ball((60, 5), (5, 0))),
            paddles: [Some(paddle(10, 10)), Some(paddle(110, 10))],
        };
        let bindings = KeyBindings::default();

        let mut off = Autopilot::new(Seats::Off, 7);
        assert!(off.keys(&obs, &bindings).is_empty());

        // Ball heads right, straight at the right paddle's row band
        let mut right = Autopilot::new(Seats::Right, 7);
        let keys = right.keys(&obs, &bindings);
        assert_eq!(keys[0], bindings.start);
        assert!(!keys.contains(&bindings.left_up));
        assert!(!keys.contains(&bindings.left_down));
    }

    #[test]
    fn test_seats() {
        assert!(Seats::Both.controls(Side::Left));
        assert!(Seats::Right.controls(Side::Right));
        assert!(!Seats::Right.controls(Side::Left));
        assert!(!Seats::Off.controls(Side::Right));
    }
}
