pub mod components;
pub mod config;
pub mod error;
pub mod fsm;
pub mod game;
pub mod geometry;
pub mod hal;
pub mod keypad;
pub mod params;
pub mod raster;
pub mod resources;
pub mod systems;
pub mod text;

pub use components::*;
pub use config::*;
pub use error::*;
pub use fsm::*;
pub use game::*;
pub use hal::{Delay, KeypadScan, Peripherals, PixelSurface, TextDisplay};
pub use keypad::Input;
pub use params::*;
pub use resources::*;

use glam::IVec2;
use hecs::World;
use systems::*;

/// Run one tick of the Superpong simulation
pub fn tick<S: PixelSurface>(
    world: &mut World,
    players: &mut Players,
    input: &Input,
    config: &Config,
    lcd: &mut S,
    events: &mut Events,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Ingest inputs (keys -> paddle velocities)
    ingest_input(world, players, input, config);

    // 2. Move paddles that stay inside the band
    move_paddles(world, lcd, config);

    // 3. Move ball
    move_ball(world, lcd);

    // 4. Check collisions (ball vs paddles, walls)
    check_collisions(world, events);

    // 5. Award the point if the ball reached a back wall
    check_scoring(players, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, pos: IVec2) -> hecs::Entity {
    let body = Body::new(&geometry::PADDLE, pos, IVec2::ZERO);
    world.spawn((Paddle::new(side, body),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: IVec2, vel: IVec2) -> hecs::Entity {
    let body = Body::new(&geometry::BALL, pos, vel);
    world.spawn((Ball::new(body),))
}
