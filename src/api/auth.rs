use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub is_user_logged_in: bool,
    #[serde(rename = "loggedInUserID", default)]
    pub logged_in_user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub password_repeat: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub verification_key: String,
    pub password: String,
    pub password_repeat: String,
}
