use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub deck: String,
    pub fabdb: String,
    pub deck_test_mode: bool,
    pub format: String,
    pub visibility: String,
    pub game_description: String,
    pub favorite_deck: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub game_name: u64,
    pub auth_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub game_name: u64,
    pub deck: String,
    pub fabdb: String,
    pub deck_test_mode: bool,
    pub favorite_deck: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameResponse {
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub game_name: u64,
    pub auth_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLobbyInfoRequest {
    pub game_name: u64,
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub auth_key: String,
}

/// Deck payload the sideboarding screen renders. `cardsSB`/`handsSB` hold the
/// sideboard counterparts of the maindeck and weapon slots.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInfo {
    pub hero: String,
    #[serde(default)]
    pub cards: Vec<String>,
    #[serde(rename = "cardsSB", default)]
    pub cards_sb: Vec<String>,
    #[serde(default)]
    pub hands: Vec<String>,
    #[serde(rename = "handsSB", default)]
    pub hands_sb: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLobbyInfoResponse {
    #[serde(default)]
    pub bad_update: bool,
    #[serde(default)]
    pub am_i_choosing_first_player: bool,
    pub deck: DeckInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseFirstPlayerRequest {
    pub game_name: u64,
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub auth_key: String,
    pub action: String,
}

/// `submission` is already a JSON-encoded string produced by the sideboard
/// screen; the backend unmarshals it a second time. It must be forwarded
/// verbatim as one string field, never re-parsed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSideboardRequest {
    pub game_name: u64,
    #[serde(rename = "playerID")]
    pub player_id: u64,
    pub auth_key: String,
    pub submission: String,
}
