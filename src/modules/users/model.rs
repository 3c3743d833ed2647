use std::fmt;

use serde::{Deserialize, Serialize};
use tokengate_db::UserRecord;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "username must be between 3 and 50 characters"
    ))]
    pub username: String,
    #[validate(length(
        min = 3,
        max = 100,
        message = "password must be between 3 and 100 characters"
    ))]
    pub password: String,
    #[validate(length(
        min = 3,
        max = 50,
        message = "nickname must be between 3 and 50 characters"
    ))]
    pub nickname: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("nickname", &self.nickname)
            .finish()
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub nickname: String,
    pub authorities: Vec<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            nickname: record.nickname,
            authorities: record.authorities,
        }
    }
}
