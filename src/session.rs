use std::sync::Arc;

use parking_lot::RwLock;

/// Shared client-side session state. The gateway only reads it: the game id is
/// the partition key for cluster routing, the player id and auth key identify
/// the seat within a game.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub game_id: u64,
    pub player_id: u64,
    pub auth_key: String,
}

#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.read().clone()
    }

    /// The partition key read fresh at dispatch time.
    pub fn partition_key(&self) -> u64 {
        self.inner.read().game_id
    }

    /// Adopts the credentials returned by a create-game or join-game response.
    pub fn enter_game(&self, game_id: u64, player_id: u64, auth_key: impl Into<String>) {
        let mut state = self.inner.write();
        state.game_id = game_id;
        state.player_id = player_id;
        state.auth_key = auth_key.into();
    }

    pub fn leave_game(&self) {
        *self.inner.write() = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_leave_game_round_trip() {
        let session = Session::new();
        assert_eq!(session.partition_key(), 0);

        session.enter_game(123_456, 2, "secret");
        assert_eq!(session.partition_key(), 123_456);
        assert_eq!(session.snapshot().auth_key, "secret");

        session.leave_game();
        assert_eq!(session.partition_key(), 0);
        assert!(session.snapshot().auth_key.is_empty());
    }
}
