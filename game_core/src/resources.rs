use hecs::Entity;

use crate::components::Side;
use crate::error::GameError;
use crate::systems::Wall;

/// Longest name that fits the 16-byte name field
pub const NAME_MAX_LEN: usize = 15;

/// A player: name and score on the character display, plus the paddle they
/// steer. The paddle itself lives in the world; the player only holds its
/// handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    slot: u8,
    score: u8,
    paddle: Entity,
}

impl Player {
    /// `slot` is the character-display column the player's labels start at
    pub fn new(name: &str, slot: u8, paddle: Entity) -> Result<Self, GameError> {
        if name.len() > NAME_MAX_LEN {
            return Err(GameError::NameTooLong {
                name: name.to_string(),
                max: NAME_MAX_LEN,
            });
        }
        if !name.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
            return Err(GameError::NameNotAscii(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            slot,
            score: 0,
            paddle,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn paddle(&self) -> Entity {
        self.paddle
    }

    pub fn add_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

/// Both players, indexed by the side they defend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    players: [Player; 2],
}

impl Players {
    pub fn new(left: Player, right: Player) -> Self {
        Self {
            players: [left, right],
        }
    }

    pub fn get(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn left(&self) -> &Player {
        self.get(Side::Left)
    }

    pub fn right(&self) -> &Player {
        self.get(Side::Right)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &Player)> {
        [Side::Left, Side::Right]
            .into_iter()
            .zip(self.players.iter())
    }

    /// First side (left checked first) at or above `win_score`
    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left().score() >= win_score {
            Some(Side::Left)
        } else if self.right().score() >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.reset_score();
        }
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: Option<Wall>,
    /// Side that won the point, if the ball reached a back wall
    pub scored: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_paddle = false;
        self.ball_hit_wall = None;
        self.scored = None;
    }

    pub fn round_ended(&self) -> bool {
        self.scored.is_some()
    }
}
