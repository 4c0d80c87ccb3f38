use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct PopupContentRequest {
    pub game_id: u64,
    pub player_id: u64,
    pub auth_key: String,
    pub popup_type: String,
    pub index: u64,
}

#[derive(Debug, Clone)]
pub struct SubmitChatRequest {
    pub game_id: u64,
    pub player_id: u64,
    pub auth_key: String,
    pub chat_text: String,
}

/// Generic in-game action. `mode` selects the server-side handler; the
/// submission shape depends on the mode and is passed through untyped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInputRequest {
    pub game_name: u64,
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub auth_key: String,
    pub mode: u32,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub submission: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListEntry {
    pub game_name: u64,
    #[serde(default)]
    pub p1_hero: Option<String>,
    #[serde(default)]
    pub p2_hero: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResponse {
    #[serde(default)]
    pub games_in_progress: Vec<GameListEntry>,
    #[serde(default)]
    pub open_games: Vec<GameListEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDeck {
    pub key: String,
    pub name: String,
    pub hero: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFavoriteDecksResponse {
    #[serde(default)]
    pub favorite_decks: Vec<FavoriteDeck>,
}
