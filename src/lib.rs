pub mod api;
pub mod config;
pub mod gateway;
pub mod notify;
pub mod session;

pub use config::GatewayConfig;
pub use gateway::error::{ApiFailure, StatusSignal};
pub use gateway::invocation::{Invocation, InvocationState, NarrowedInvocation, TypedInvocation};
pub use gateway::operation::Operation;
pub use gateway::resolver::ClusterTarget;
pub use gateway::ApiGateway;
pub use notify::{Notification, NotificationSink, ToastChannel};
pub use session::Session;
