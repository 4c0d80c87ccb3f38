use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::{
    ChooseFirstPlayerRequest, CreateGameRequest, ForgotPasswordRequest, GetLobbyInfoRequest,
    JoinGameRequest, LoginRequest, PopupContentRequest, ProcessInputRequest, ResetPasswordRequest,
    SignUpRequest, SubmitChatRequest, SubmitSideboardRequest,
};
use crate::config::GatewayConfig;

/// Endpoint paths, relative to the resolved cluster base.
pub mod endpoint {
    pub const GET_POPUP: &str = "GetPopupAPI.php";
    pub const LOGIN: &str = "AccountLogin.php";
    pub const LOGIN_WITH_COOKIE: &str = "AccountLoginWithCookie.php";
    pub const LOGOUT: &str = "AccountLogout.php";
    pub const SIGNUP: &str = "AccountSignup.php";
    pub const FORGOT_PASSWORD: &str = "AccountForgotPassword.php";
    pub const RESET_PASSWORD: &str = "AccountResetPassword.php";
    pub const SUBMIT_CHAT: &str = "SubmitChat.php";
    pub const PROCESS_INPUT: &str = "ProcessInputPoster.php";
    pub const GET_GAME_LIST: &str = "APIs/GetGameList.php";
    pub const GET_FAVORITE_DECKS: &str = "APIs/GetFavoriteDecks.php";
    pub const CREATE_GAME: &str = "APIs/CreateGame.php";
    pub const JOIN_GAME: &str = "APIs/JoinGame.php";
    pub const GET_LOBBY_INFO: &str = "APIs/GetLobbyInfo.php";
    pub const CHOOSE_FIRST_PLAYER: &str = "APIs/ChooseFirstPlayer.php";
    pub const SUBMIT_SIDEBOARD: &str = "APIs/SubmitSideboard.php";
}

/// Queries are idempotent and safe to re-invoke; mutations have server-side
/// effects and get exactly one transport attempt per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    Query,
    Mutation,
}

impl OperationClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// Whether the session cookie jar travels with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Include,
    Omit,
}

/// How failures are shaped before reaching the caller. `StatusOnly` callers
/// receive the bare status signal instead of the full payload; the toast side
/// channel still sees status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    Full,
    StatusOnly,
}

/// The fixed set of named operations against the platform, one variant per
/// operation with its typed request attached.
#[derive(Debug, Clone)]
pub enum Operation {
    GetPopupContent(PopupContentRequest),
    Login(LoginRequest),
    LoginWithCookie,
    Logout,
    SignUp(SignUpRequest),
    ForgotPassword(ForgotPasswordRequest),
    ResetPassword(ResetPasswordRequest),
    SubmitChat(SubmitChatRequest),
    ProcessInput(ProcessInputRequest),
    GetGameList,
    GetFavoriteDecks,
    CreateGame(CreateGameRequest),
    JoinGame(JoinGameRequest),
    GetLobbyInfo(GetLobbyInfoRequest),
    ChooseFirstPlayer(ChooseFirstPlayerRequest),
    SubmitSideboard(SubmitSideboardRequest),
}

/// Wire-level rendering of one operation: query parameters for reads, JSON
/// body for writes.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    pub credentials: Credentials,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetPopupContent(_) => "get-popup-content",
            Self::Login(_) => "login",
            Self::LoginWithCookie => "login-with-cookie",
            Self::Logout => "logout",
            Self::SignUp(_) => "sign-up",
            Self::ForgotPassword(_) => "forgot-password",
            Self::ResetPassword(_) => "reset-password",
            Self::SubmitChat(_) => "submit-chat",
            Self::ProcessInput(_) => "process-input",
            Self::GetGameList => "get-game-list",
            Self::GetFavoriteDecks => "get-favorite-decks",
            Self::CreateGame(_) => "create-game",
            Self::JoinGame(_) => "join-game",
            Self::GetLobbyInfo(_) => "get-lobby-info",
            Self::ChooseFirstPlayer(_) => "choose-first-player",
            Self::SubmitSideboard(_) => "submit-sideboard",
        }
    }

    pub fn class(&self) -> OperationClass {
        match self {
            Self::GetPopupContent(_)
            | Self::LoginWithCookie
            | Self::GetGameList
            | Self::GetFavoriteDecks
            | Self::GetLobbyInfo(_) => OperationClass::Query,
            _ => OperationClass::Mutation,
        }
    }

    pub fn error_shape(&self) -> ErrorShape {
        match self {
            Self::CreateGame(_) | Self::JoinGame(_) => ErrorShape::StatusOnly,
            _ => ErrorShape::Full,
        }
    }

    /// The game list bypasses cluster resolution: it is always served by the
    /// production cluster, or by the local proxy in dev mode.
    pub fn base_override<'a>(&self, config: &'a GatewayConfig) -> Option<&'a Url> {
        match self {
            Self::GetGameList => Some(if config.dev_mode {
                &config.game_list_dev_proxy
            } else {
                &config.live_base
            }),
            _ => None,
        }
    }

    /// Lowers the operation to its wire request.
    pub fn wire(&self) -> Result<WireRequest, serde_json::Error> {
        let request = match self {
            Self::GetPopupContent(req) => WireRequest {
                method: Method::GET,
                path: endpoint::GET_POPUP,
                query: vec![
                    ("gameName", req.game_id.to_string()),
                    ("playerID", req.player_id.to_string()),
                    ("authKey", req.auth_key.clone()),
                    ("popupType", req.popup_type.clone()),
                    ("index", req.index.to_string()),
                ],
                body: None,
                credentials: Credentials::Include,
            },
            Self::Login(req) => post(endpoint::LOGIN, with_submit_flag(serde_json::to_value(req)?)),
            Self::LoginWithCookie => post(endpoint::LOGIN_WITH_COOKIE, empty_body()),
            Self::Logout => post(endpoint::LOGOUT, empty_body()),
            Self::SignUp(req) => post(
                endpoint::SIGNUP,
                with_submit_flag(serde_json::to_value(req)?),
            ),
            Self::ForgotPassword(req) => post(endpoint::FORGOT_PASSWORD, to_body(req)?),
            Self::ResetPassword(req) => post(endpoint::RESET_PASSWORD, to_body(req)?),
            Self::SubmitChat(req) => WireRequest {
                method: Method::GET,
                path: endpoint::SUBMIT_CHAT,
                query: vec![
                    ("gameName", req.game_id.to_string()),
                    ("playerID", req.player_id.to_string()),
                    ("authKey", req.auth_key.clone()),
                    ("chatText", req.chat_text.clone()),
                ],
                body: None,
                credentials: Credentials::Include,
            },
            Self::ProcessInput(req) => post(endpoint::PROCESS_INPUT, to_body(req)?),
            Self::GetGameList => WireRequest {
                method: Method::GET,
                path: endpoint::GET_GAME_LIST,
                query: Vec::new(),
                body: None,
                credentials: Credentials::Omit,
            },
            Self::GetFavoriteDecks => WireRequest {
                method: Method::GET,
                path: endpoint::GET_FAVORITE_DECKS,
                query: Vec::new(),
                body: None,
                credentials: Credentials::Include,
            },
            Self::CreateGame(req) => post(endpoint::CREATE_GAME, to_body(req)?),
            Self::JoinGame(req) => post(endpoint::JOIN_GAME, to_body(req)?),
            Self::GetLobbyInfo(req) => post(endpoint::GET_LOBBY_INFO, to_body(req)?),
            Self::ChooseFirstPlayer(req) => post(endpoint::CHOOSE_FIRST_PLAYER, to_body(req)?),
            Self::SubmitSideboard(req) => post(endpoint::SUBMIT_SIDEBOARD, to_body(req)?),
        };
        Ok(request)
    }
}

fn post(path: &'static str, body: Value) -> WireRequest {
    WireRequest {
        method: Method::POST,
        path,
        query: Vec::new(),
        body: Some(body),
        credentials: Credentials::Include,
    }
}

fn to_body<T: Serialize>(request: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(request)
}

fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}

// Login and sign-up forms carry an explicit submit flag alongside the fields.
fn with_submit_flag(mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert("submit".to_string(), Value::Bool(true));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_carries_the_submit_flag() {
        let operation = Operation::Login(LoginRequest {
            user_id: "bravo".to_string(),
            password: "hunter2".to_string(),
            remember_me: true,
        });
        let wire = operation.wire().unwrap();
        assert_eq!(wire.method, Method::POST);
        assert_eq!(wire.path, endpoint::LOGIN);

        let body = wire.body.unwrap();
        assert_eq!(body["submit"], Value::Bool(true));
        assert_eq!(body["userID"], Value::String("bravo".to_string()));
        assert_eq!(body["rememberMe"], Value::Bool(true));
    }

    #[test]
    fn logout_sends_an_empty_object() {
        let wire = Operation::Logout.wire().unwrap();
        assert_eq!(wire.body.unwrap(), serde_json::json!({}));
    }

    #[test]
    fn sideboard_submission_is_forwarded_verbatim() {
        let submission =
            serde_json::to_string(&serde_json::json!({"hero": "ARC002", "deck": ["WTR001"]}))
                .unwrap();
        let operation = Operation::SubmitSideboard(SubmitSideboardRequest {
            game_name: 123,
            player_id: 1,
            auth_key: "key".to_string(),
            submission: submission.clone(),
        });

        let wire = operation.wire().unwrap();
        let body = wire.body.unwrap();
        // Still a JSON string, not an unpacked object.
        assert_eq!(body["submission"], Value::String(submission));
    }

    #[test]
    fn chat_is_a_get_with_query_parameters() {
        let operation = Operation::SubmitChat(SubmitChatRequest {
            game_id: 777,
            player_id: 2,
            auth_key: "key".to_string(),
            chat_text: "good luck!".to_string(),
        });
        let wire = operation.wire().unwrap();
        assert_eq!(wire.method, Method::GET);
        assert!(wire.body.is_none());
        assert!(wire
            .query
            .contains(&("chatText", "good luck!".to_string())));
        assert!(wire.query.contains(&("gameName", "777".to_string())));
    }

    #[test]
    fn game_list_omits_credentials_and_overrides_the_base() {
        let wire = Operation::GetGameList.wire().unwrap();
        assert_eq!(wire.credentials, Credentials::Omit);

        let mut config = GatewayConfig::new(
            Url::parse("https://dev.example.net/game/").unwrap(),
            Url::parse("https://beta.example.net/game/").unwrap(),
            Url::parse("https://play.example.net/game/").unwrap(),
        );
        config.dev_mode = false;
        assert_eq!(
            Operation::GetGameList.base_override(&config).unwrap(),
            &config.live_base
        );
        config.dev_mode = true;
        assert_eq!(
            Operation::GetGameList.base_override(&config).unwrap(),
            &config.game_list_dev_proxy
        );
        assert!(Operation::GetFavoriteDecks.base_override(&config).is_none());
    }

    #[test]
    fn only_lobby_entry_points_narrow_their_errors() {
        let create = Operation::CreateGame(CreateGameRequest {
            deck: String::new(),
            fabdb: "https://decks.example.net/123".to_string(),
            deck_test_mode: false,
            format: "classic".to_string(),
            visibility: "public".to_string(),
            game_description: String::new(),
            favorite_deck: false,
        });
        assert_eq!(create.error_shape(), ErrorShape::StatusOnly);
        assert_eq!(Operation::Logout.error_shape(), ErrorShape::Full);
    }

    #[test]
    fn classes_split_reads_from_writes() {
        assert_eq!(Operation::GetGameList.class(), OperationClass::Query);
        assert_eq!(Operation::LoginWithCookie.class(), OperationClass::Query);
        assert_eq!(Operation::Logout.class(), OperationClass::Mutation);
    }
}
