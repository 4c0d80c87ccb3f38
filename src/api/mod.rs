pub mod auth;
pub mod game;
pub mod lobby;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ResetPasswordRequest, SignUpRequest,
};
pub use game::{
    FavoriteDeck, GameListEntry, GameListResponse, GetFavoriteDecksResponse, PopupContentRequest,
    ProcessInputRequest, SubmitChatRequest,
};
pub use lobby::{
    ChooseFirstPlayerRequest, CreateGameRequest, CreateGameResponse, DeckInfo,
    GetLobbyInfoRequest, GetLobbyInfoResponse, JoinGameRequest, JoinGameResponse,
    SubmitSideboardRequest,
};
