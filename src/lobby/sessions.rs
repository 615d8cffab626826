use crate::error::LobbyError;
use crate::game::types::ConnectionId;
use crate::shared::names::sanitize_nickname;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ConnectionId,
    pub nickname: String,
}

/// Logged-in users keyed by connection id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    users: HashMap<ConnectionId, User>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, connection_id: &str, nickname: &str) -> Result<&User, LobbyError> {
        if self.users.contains_key(connection_id) {
            return Err(LobbyError::AlreadyLoggedIn);
        }
        let nickname = sanitize_nickname(nickname).ok_or(LobbyError::InvalidNickname)?;
        if self.users.values().any(|user| user.nickname == nickname) {
            return Err(LobbyError::DuplicateNickname);
        }
        let user = User {
            id: connection_id.to_string(),
            nickname,
        };
        Ok(self.users.entry(connection_id.to_string()).or_insert(user))
    }

    pub fn remove(&mut self, connection_id: &str) -> Option<User> {
        self.users.remove(connection_id)
    }

    pub fn get(&self, connection_id: &str) -> Result<&User, LobbyError> {
        self.users.get(connection_id).ok_or(LobbyError::UserNotFound)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}
