use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("no user is logged in on this connection")]
    UserNotFound,
    #[error("the room does not exist or the user is not seated in one")]
    RoomNotFound,
    #[error("the room already has two players")]
    RoomFull,
    #[error("the user is already seated in a room")]
    AlreadyInRoom,
    #[error("the nickname is already taken")]
    DuplicateNickname,
    #[error("the nickname is empty")]
    InvalidNickname,
    #[error("this connection is already logged in")]
    AlreadyLoggedIn,
    #[error("the game cannot resume with only one player")]
    MissingOpponent,
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl LobbyError {
    /// Stable name used in `error` frames.
    pub fn kind(&self) -> &'static str {
        match self {
            LobbyError::UserNotFound => "userNotFound",
            LobbyError::RoomNotFound => "roomNotFound",
            LobbyError::RoomFull => "roomFull",
            LobbyError::AlreadyInRoom => "alreadyInRoom",
            LobbyError::DuplicateNickname => "duplicateNickname",
            LobbyError::InvalidNickname => "invalidNickname",
            LobbyError::AlreadyLoggedIn => "alreadyLoggedIn",
            LobbyError::MissingOpponent => "missingOpponent",
            LobbyError::MalformedPayload(_) => "malformedPayload",
        }
    }

    pub fn is_login_refusal(&self) -> bool {
        matches!(
            self,
            LobbyError::DuplicateNickname | LobbyError::InvalidNickname | LobbyError::AlreadyLoggedIn
        )
    }
}
