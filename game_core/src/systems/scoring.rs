use tracing::info;

use crate::components::Side;
use crate::config::Config;
use crate::resources::{Events, Players};

/// Award the point for a ball that reached a back wall
pub fn check_scoring(players: &mut Players, events: &Events) {
    if let Some(side) = events.scored {
        let player = players.get_mut(side);
        player.add_point();
        info!(player = player.name(), score = player.score(), "point scored");
    }
}

/// Side that has reached the win score, if any
pub fn check_winner(players: &Players, config: &Config) -> Option<Side> {
    players.has_winner(config.win_score)
}
