//! Wire types for the two Game Engine calls and their decoding into typed replies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zero-based board position as it travels on the wire.
pub type WirePosition = u16;

/// Path suffix of the call that starts a new game.
pub const START_PATH: &str = "/start";

/// Path suffix of the call that resolves a pair of flipped cards.
pub const MOVE_PATH: &str = "/move";

const START_FALLBACK_ERROR: &str = "Failed to start game";
const MOVE_FALLBACK_ERROR: &str = "Failed to process move";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Rejected(String),
    #[error("malformed engine response: {0}")]
    Malformed(String),
}

pub type Result<T> = core::result::Result<T, EngineError>;

/// Raw body of a `start` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a `move` request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub pos1: WirePosition,
    pub pos2: WirePosition,
}

/// Raw body of a `move` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card1: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card2: Option<i64>,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_won: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A successful `start` reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartReply {
    /// Total number of cells on the new board, never zero.
    pub grid_size: u16,
}

/// A successful `move` reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReply {
    /// Opaque card values revealed at `pos1` and `pos2`.
    pub cards: (i64, i64),
    pub is_match: bool,
    /// Authoritative move count after this move.
    pub moves: u32,
    pub game_won: bool,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| EngineError::Malformed(format!("missing `{}`", field)))
}

fn rejected(error: Option<String>, fallback: &str) -> EngineError {
    EngineError::Rejected(
        error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    )
}

impl StartResponse {
    pub fn into_reply(self) -> Result<StartReply> {
        if !self.success {
            return Err(rejected(self.error, START_FALLBACK_ERROR));
        }

        let grid_size = required(self.grid_size, "gridSize")?;
        match u16::try_from(grid_size) {
            Ok(grid_size) if grid_size > 0 => Ok(StartReply { grid_size }),
            _ => Err(EngineError::Malformed(format!(
                "`gridSize` out of range: {}",
                grid_size
            ))),
        }
    }
}

impl MoveResponse {
    pub fn into_reply(self) -> Result<MoveReply> {
        if !self.success {
            return Err(rejected(self.error, MOVE_FALLBACK_ERROR));
        }

        let card1 = required(self.card1, "card1")?;
        let card2 = required(self.card2, "card2")?;
        let is_match = required(self.is_match, "match")?;
        let moves = required(self.moves, "moves")?;
        let moves = u32::try_from(moves)
            .map_err(|_| EngineError::Malformed(format!("`moves` out of range: {}", moves)))?;

        Ok(MoveReply {
            cards: (card1, card2),
            is_match,
            moves,
            game_won: self.game_won.unwrap_or(false),
        })
    }
}

/// Decodes a `start` response body.
pub fn decode_start(body: &str) -> Result<StartReply> {
    serde_json::from_str::<StartResponse>(body)
        .map_err(|err| EngineError::Malformed(err.to_string()))?
        .into_reply()
}

/// Decodes a `move` response body.
pub fn decode_move(body: &str) -> Result<MoveReply> {
    serde_json::from_str::<MoveResponse>(body)
        .map_err(|err| EngineError::Malformed(err.to_string()))?
        .into_reply()
}

/// Encodes a `move` request body.
pub fn encode_move(request: &MoveRequest) -> Result<String> {
    serde_json::to_string(request).map_err(|err| EngineError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_reply_carries_grid_size() {
        let body = r#"{"success":true,"gridSize":16,"message":"Game started successfully"}"#;
        let reply = decode_start(body).unwrap();
        assert_eq!(reply, StartReply { grid_size: 16 });
    }

    #[test]
    fn start_failure_uses_engine_message_or_fallback() {
        assert_eq!(
            decode_start(r#"{"success":false,"error":"busy"}"#),
            Err(EngineError::Rejected("busy".to_string()))
        );
        assert_eq!(
            decode_start(r#"{"success":false}"#),
            Err(EngineError::Rejected("Failed to start game".to_string()))
        );
    }

    #[test]
    fn start_rejects_missing_or_empty_board() {
        assert!(matches!(
            decode_start(r#"{"success":true}"#),
            Err(EngineError::Malformed(_))
        ));
        assert!(matches!(
            decode_start(r#"{"success":true,"gridSize":0}"#),
            Err(EngineError::Malformed(_))
        ));
        assert!(matches!(
            decode_start(r#"{"success":true,"gridSize":-4}"#),
            Err(EngineError::Malformed(_))
        ));
    }

    #[test]
    fn error_body_without_success_flag_is_malformed() {
        // what the engine writes alongside a 4xx/5xx
        assert!(matches!(
            decode_move(r#"{"error": "Game not started"}"#),
            Err(EngineError::Malformed(_))
        ));
    }

    #[test]
    fn move_reply_decodes_match() {
        let reply = decode_move(
            r#"{"success":true,"card1":2,"card2":2,"match":true,"moves":1,"gameWon":false}"#,
        )
        .unwrap();
        assert_eq!(
            reply,
            MoveReply {
                cards: (2, 2),
                is_match: true,
                moves: 1,
                game_won: false,
            }
        );
    }

    #[test]
    fn move_reply_defaults_game_won_to_false() {
        let reply =
            decode_move(r#"{"success":true,"card1":1,"card2":4,"match":false,"moves":2}"#).unwrap();
        assert!(!reply.is_match);
        assert!(!reply.game_won);
        assert_eq!(reply.moves, 2);
    }

    #[test]
    fn move_reply_requires_moves() {
        assert_eq!(
            decode_move(r#"{"success":true,"card1":1,"card2":4,"match":false}"#),
            Err(EngineError::Malformed("missing `moves`".to_string()))
        );
    }

    #[test]
    fn move_request_uses_engine_field_names() {
        let body = encode_move(&MoveRequest { pos1: 3, pos2: 7 }).unwrap();
        assert_eq!(body, r#"{"pos1":3,"pos2":7}"#);
    }

    #[test]
    fn status_error_reads_like_a_fetch_failure() {
        assert_eq!(EngineError::Status(500).to_string(), "HTTP error! status: 500");
    }
}
