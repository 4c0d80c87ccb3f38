mod dispatch;
pub mod error;
pub mod interceptor;
pub mod invocation;
pub mod operation;
pub mod resolver;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;

use crate::api::{
    ChooseFirstPlayerRequest, CreateGameRequest, CreateGameResponse, ForgotPasswordRequest,
    GameListResponse, GetFavoriteDecksResponse, GetLobbyInfoRequest, GetLobbyInfoResponse,
    JoinGameRequest, JoinGameResponse, LoginRequest, LoginResponse, PopupContentRequest,
    ProcessInputRequest, ResetPasswordRequest, SignUpRequest, SubmitChatRequest,
    SubmitSideboardRequest,
};
use crate::config::GatewayConfig;
use crate::notify::{Notification, NotificationSink, ToastChannel};
use crate::session::Session;

use dispatch::Dispatcher;
use interceptor::FailureInterceptor;
use invocation::{Invocation, NarrowedInvocation, TypedInvocation};
use operation::Operation;

pub use resolver::ClusterTarget;

/// Facade over the remote game platform: resolves a cluster per call from the
/// session's partition key, issues the named operation, and feeds every
/// terminal state through the failure interceptor.
pub struct ApiGateway {
    dispatcher: Arc<Dispatcher>,
}

impl ApiGateway {
    pub fn new(
        config: GatewayConfig,
        session: Session,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let interceptor = FailureInterceptor::new(sink);
        let dispatcher = Dispatcher::new(config, session, interceptor)?;
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// Convenience constructor wiring a toast broadcast channel as the sink.
    pub fn with_toast_channel(
        config: GatewayConfig,
        session: Session,
    ) -> Result<(Self, broadcast::Receiver<Notification>)> {
        let (channel, rx) = ToastChannel::new(config.toast_capacity);
        let gateway = Self::new(config, session, Arc::new(channel))?;
        Ok((gateway, rx))
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    /// Number of invocations currently in flight, for diagnostics.
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn active_operations(&self) -> Vec<&'static str> {
        self.dispatcher.active_operations()
    }

    /// Generic entry point; the typed methods below are thin wrappers.
    pub fn invoke(&self, operation: Operation) -> Invocation {
        self.dispatcher.invoke(operation)
    }

    pub fn get_popup_content(&self, request: PopupContentRequest) -> Invocation {
        self.invoke(Operation::GetPopupContent(request))
    }

    pub fn login(&self, request: LoginRequest) -> TypedInvocation<LoginResponse> {
        TypedInvocation::new(self.invoke(Operation::Login(request)))
    }

    pub fn login_with_cookie(&self) -> TypedInvocation<LoginResponse> {
        TypedInvocation::new(self.invoke(Operation::LoginWithCookie))
    }

    pub fn log_out(&self) -> Invocation {
        self.invoke(Operation::Logout)
    }

    pub fn sign_up(&self, request: SignUpRequest) -> Invocation {
        self.invoke(Operation::SignUp(request))
    }

    pub fn forgot_password(&self, request: ForgotPasswordRequest) -> Invocation {
        self.invoke(Operation::ForgotPassword(request))
    }

    pub fn reset_password(&self, request: ResetPasswordRequest) -> Invocation {
        self.invoke(Operation::ResetPassword(request))
    }

    pub fn submit_chat(&self, request: SubmitChatRequest) -> Invocation {
        self.invoke(Operation::SubmitChat(request))
    }

    pub fn process_input(&self, request: ProcessInputRequest) -> Invocation {
        self.invoke(Operation::ProcessInput(request))
    }

    pub fn get_game_list(&self) -> TypedInvocation<GameListResponse> {
        TypedInvocation::new(self.invoke(Operation::GetGameList))
    }

    pub fn get_favorite_decks(&self) -> TypedInvocation<GetFavoriteDecksResponse> {
        TypedInvocation::new(self.invoke(Operation::GetFavoriteDecks))
    }

    pub fn create_game(&self, request: CreateGameRequest) -> NarrowedInvocation<CreateGameResponse> {
        NarrowedInvocation::new(self.invoke(Operation::CreateGame(request)))
    }

    pub fn join_game(&self, request: JoinGameRequest) -> NarrowedInvocation<JoinGameResponse> {
        NarrowedInvocation::new(self.invoke(Operation::JoinGame(request)))
    }

    pub fn get_lobby_info(&self, request: GetLobbyInfoRequest) -> TypedInvocation<GetLobbyInfoResponse> {
        TypedInvocation::new(self.invoke(Operation::GetLobbyInfo(request)))
    }

    pub fn choose_first_player(&self, request: ChooseFirstPlayerRequest) -> Invocation {
        self.invoke(Operation::ChooseFirstPlayer(request))
    }

    pub fn submit_sideboard(&self, request: SubmitSideboardRequest) -> Invocation {
        self.invoke(Operation::SubmitSideboard(request))
    }
}
