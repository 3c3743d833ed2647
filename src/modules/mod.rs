pub mod auth;
pub mod hello;
pub mod users;

pub use self::auth::model::{LoginRequest, TokenResponse};
pub use self::users::model::{SignupRequest, UserResponse};
