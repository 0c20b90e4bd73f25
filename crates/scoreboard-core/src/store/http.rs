// ── REST-backed store ──
//
// Adapts `scoreboard_api::PlayerClient` to the `PlayerStore` contract.

use std::cmp::Reverse;

use scoreboard_api::PlayerClient;
use tracing::debug;

use super::PlayerStore;
use crate::error::StoreError;
use crate::model::{Player, PlayerId};

impl PlayerStore for PlayerClient {
    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        let mut players: Vec<Player> = self
            .list_players()
            .await?
            .into_iter()
            .map(Player::from)
            .collect();
        // The backend already orders by points; a stable sort keeps its tie
        // order and guards against a backend that doesn't.
        players.sort_by_key(|p| Reverse(p.points));
        debug!(count = players.len(), "listed players");
        Ok(players)
    }

    async fn create(&self, name: &str) -> Result<Player, StoreError> {
        let player = Player::from(self.create_player(name).await?);
        if player.name.trim().is_empty() {
            return Err(StoreError::ConstraintViolation {
                message: "store returned a player without a name".into(),
            });
        }
        Ok(player)
    }

    async fn update_points(&self, id: PlayerId, points: i64) -> Result<Player, StoreError> {
        let player = Player::from(PlayerClient::update_points(self, id.get(), points).await?);
        Ok(player)
    }

    async fn delete(&self, id: PlayerId) -> Result<Player, StoreError> {
        Ok(Player::from(self.delete_player(id.get()).await?))
    }
}
