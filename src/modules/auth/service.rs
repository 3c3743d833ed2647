use std::sync::OnceLock;

use anyhow::anyhow;
use tokengate_auth::TokenCodec;
use tokengate_core::{AppError, hash_password, verify_password};
use tokengate_db::UserStore;
use tokengate_observability::{track_jwt_issued, track_user_login_failure, track_user_login_success};
use tracing::instrument;

use super::model::{LoginRequest, TokenResponse};

pub struct AuthService;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash at the default cost, verified against when there is no usable
/// account so that every failed login pays for one bcrypt run.
fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash_password("tokengate-dummy-password").ok())
        .as_deref()
}

fn burn_verification(password: &str, hash: Option<&str>) {
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
}

fn invalid_credentials(reason: &'static str) -> AppError {
    track_user_login_failure(reason);
    AppError::unauthorized(anyhow!("Invalid username or password"))
}

impl AuthService {
    /// Checks credentials against the user store and mints a token carrying
    /// the stored username and authorities.
    ///
    /// Unknown and deactivated accounts still run one password verification
    /// before the `401`.
    #[instrument(skip(users, tokens, dto), fields(username = %dto.username))]
    pub async fn authenticate(
        users: &dyn UserStore,
        tokens: &TokenCodec,
        dto: LoginRequest,
    ) -> Result<TokenResponse, AppError> {
        let Some(user) = users.find_by_username(&dto.username).await? else {
            burn_verification(&dto.password, dummy_hash());
            return Err(invalid_credentials("unknown_user"));
        };

        if !user.activated {
            tracing::info!("login refused for deactivated account");
            burn_verification(&dto.password, Some(&user.password_hash));
            return Err(invalid_credentials("not_activated"));
        }

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(invalid_credentials("bad_password"));
        }

        let access_token = tokens
            .encode(&user.username, &user.authorities)
            .map_err(AppError::internal)?;

        track_user_login_success();
        track_jwt_issued();

        Ok(TokenResponse { access_token })
    }
}
