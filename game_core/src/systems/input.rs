use hecs::World;
use tracing::error;

use crate::components::{Side, Sprite};
use crate::config::{Config, KeyBindings};
use crate::keypad::Input;
use crate::resources::Players;
use crate::Paddle;

/// Sum the steering keys of one scan into per-side key counts
/// (negative = up). Unbound keys are ignored.
pub fn paddle_deltas(input: &Input, keys: &KeyBindings) -> [i32; 2] {
    let mut deltas = [0; 2];
    for &code in input.keys() {
        if let Some((side, dir)) = keys.steer(code) {
            deltas[side.index()] += dir;
        }
    }
    deltas
}

/// Turn this tick's keys into paddle velocities
pub fn ingest_input(world: &mut World, players: &Players, input: &Input, config: &Config) {
    let deltas = paddle_deltas(input, &config.keys);

    for (side, player) in players.iter() {
        let dy = deltas[side.index()] * config.paddle_speed;
        match world.query_one_mut::<&mut Paddle>(player.paddle()) {
            Ok(paddle) => paddle.set_speed(glam::IVec2::new(0, dy)),
            Err(err) => error!(?side, %err, "player paddle missing from world"),
        }
    }
}
