use glam::IVec2;

use crate::geometry::Geometry;
use crate::hal::PixelSurface;
use crate::raster;

/// Which half of the court an object or player belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 0 = left, 1 = right
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Position and velocity of a drawable object, in whole pixels
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub geometry: &'static Geometry,
    pub pos: IVec2,
    pub vel: IVec2, // pixels per tick
}

impl Body {
    pub fn new(geometry: &'static Geometry, pos: IVec2, vel: IVec2) -> Self {
        Self { geometry, pos, vel }
    }

    /// Where the anchor lands after one tick
    pub fn next_pos(&self) -> IVec2 {
        self.pos + self.vel
    }
}

/// Draw/clear/move/set-speed behaviour shared by every object on screen
pub trait Sprite {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn draw<S: PixelSurface>(&self, lcd: &mut S) {
        raster::draw_object(lcd, self.body());
    }

    fn clear<S: PixelSurface>(&self, lcd: &mut S) {
        raster::clear_object(lcd, self.body());
    }

    /// Erase, step by the velocity, redraw
    fn advance<S: PixelSurface>(&mut self, lcd: &mut S) {
        self.clear(lcd);
        let body = self.body_mut();
        body.pos += body.vel;
        self.draw(lcd);
    }

    fn set_speed(&mut self, vel: IVec2) {
        self.body_mut().vel = vel;
    }
}

/// Ball component
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub body: Body,
}

impl Ball {
    pub fn new(body: Body) -> Self {
        Self { body }
    }

    /// Put the ball back at its serve position and velocity
    pub fn reset(&mut self, pos: IVec2, vel: IVec2) {
        self.body.pos = pos;
        self.body.vel = vel;
    }
}

impl Sprite for Ball {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Paddle component - one per side
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub body: Body,
}

impl Paddle {
    pub fn new(side: Side, body: Body) -> Self {
        Self { side, body }
    }
}

impl Sprite for Paddle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
