//! The game loop: owns every object, both players and the collaborators,
//! and advances the state machine one step at a time.

use glam::IVec2;
use hecs::{Entity, World};
use tracing::{debug, info, trace};

use crate::components::{Ball, Body, Paddle, Side};
use crate::config::Config;
use crate::error::GameError;
use crate::fsm::{FsmState, GameAction, GameFsm};
use crate::hal::{Delay, KeypadScan, Peripherals, PixelSurface, TextDisplay};
use crate::keypad;
use crate::resources::{Events, Player, Players};
use crate::systems::check_winner;
use crate::text;
use crate::{create_ball, create_paddle, tick};

pub struct Game<P, T, K, D> {
    world: World,
    ball: Entity,
    players: Players,
    config: Config,
    fsm: GameFsm,
    events: Events,
    hw: Peripherals<P, T, K, D>,
}

impl<P, T, K, D> Game<P, T, K, D>
where
    P: PixelSurface,
    T: TextDisplay,
    K: KeypadScan,
    D: Delay,
{
    /// Validate `config`, create the ball, both paddles and both players
    pub fn new(config: Config, hw: Peripherals<P, T, K, D>) -> Result<Self, GameError> {
        config.validate()?;

        let mut world = World::new();
        let left = create_paddle(&mut world, Side::Left, config.paddle_start(Side::Left));
        let right = create_paddle(&mut world, Side::Right, config.paddle_start(Side::Right));
        let ball = create_ball(&mut world, config.ball_start, config.ball_serve_velocity);

        let players = Players::new(
            Player::new(config.name(Side::Left), config.slot(Side::Left), left)?,
            Player::new(config.name(Side::Right), config.slot(Side::Right), right)?,
        );

        Ok(Self {
            world,
            ball,
            players,
            config,
            fsm: GameFsm::new(),
            events: Events::new(),
            hw,
        })
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Events of the most recent tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn ball(&self) -> Option<Body> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| ball.body)
    }

    pub fn paddle(&self, side: Side) -> Option<Body> {
        let entity = self.players.get(side).paddle();
        self.world.get::<&Paddle>(entity).ok().map(|paddle| paddle.body)
    }

    /// Put the ball somewhere else without touching the display
    pub fn place_ball(&mut self, pos: IVec2, vel: IVec2) {
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.body.pos = pos;
            ball.body.vel = vel;
        }
    }

    pub fn peripherals(&self) -> &Peripherals<P, T, K, D> {
        &self.hw
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<P, T, K, D> {
        &mut self.hw
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Perform the work of the current state once and return the new state.
    ///
    /// On the start screen this blocks until the start key is seen.
    pub fn step(&mut self) -> FsmState {
        match self.fsm.state() {
            FsmState::StartScreen => self.start_screen(),
            FsmState::RoundInit => self.round_init(),
            FsmState::Playing => self.play_tick(),
            FsmState::GameOver => self.game_over(),
        }
        self.fsm.state()
    }

    /// Apply an action that the current state always accepts
    fn advance(&mut self, action: GameAction) {
        let result = self.fsm.transition(action);
        debug_assert!(
            result.success,
            "{action:?} rejected in {:?}",
            result.from_state
        );
    }

    fn start_screen(&mut self) {
        self.hw.lcd.clear_surface();
        text::draw_start_screen(&mut self.hw.text, self.config.keys.start);
        self.wait_for_start();
        self.advance(GameAction::StartPressed);
    }

    /// Busy-poll the keypad until the start key shows up in a scan
    pub fn wait_for_start(&mut self) {
        let start = self.config.keys.start;
        loop {
            let input = keypad::scan(&mut self.hw.keypad);
            if input.contains(start) {
                debug!("start key pressed");
                return;
            }
        }
    }

    fn round_init(&mut self) {
        self.hw.lcd.clear_surface();
        self.hw.text.clear_display();
        self.reset_objects();
        self.advance(GameAction::RoundReady);
    }

    /// Serve position for the ball, paddles centred and stopped
    fn reset_objects(&mut self) {
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.reset(self.config.ball_start, self.config.ball_serve_velocity);
        }
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.body.pos = self.config.paddle_start(paddle.side);
            paddle.body.vel = IVec2::ZERO;
        }
    }

    fn play_tick(&mut self) {
        text::draw_labels(&mut self.hw.text, &self.players);
        for (_side, player) in self.players.iter() {
            text::draw_score(&mut self.hw.text, player);
        }

        let input = keypad::scan(&mut self.hw.keypad);
        trace!(keys = ?input.keys(), "tick");

        tick(
            &mut self.world,
            &mut self.players,
            &input,
            &self.config,
            &mut self.hw.lcd,
            &mut self.events,
        );

        if check_winner(&self.players, &self.config).is_some() {
            self.advance(GameAction::MatchWon);
            self.game_over();
        } else if self.events.round_ended() {
            self.advance(GameAction::PointScored);
        }
    }

    /// Announce the winner, hold the banner, then start over with zero scores
    fn game_over(&mut self) {
        if let Some(side) = check_winner(&self.players, &self.config) {
            let winner = self.players.get(side);
            info!(winner = winner.name(), ?side, "match won");

            self.hw.lcd.clear_surface();
            text::draw_winner(&mut self.hw.text, winner);
            self.hw.delay.delay_ms(self.config.game_over_delay_ms);
        }

        self.players.reset_scores();
        self.advance(GameAction::Presented);
    }
}
