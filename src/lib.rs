//! # Tokengate API
//!
//! Stateless bearer-token authentication for an HTTP API, built with Axum.
//! Users log in once, receive an HS512-signed JWT, and present it as
//! `Authorization: Bearer <token>` on every later request. The server keeps
//! no session or token store: identity is rebuilt from the token alone.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Authentication gate, access rules, role checks
//! ├── modules/          # Feature modules
//! │   ├── auth/        # POST /api/authenticate
//! │   ├── users/       # Signup and account lookup
//! │   └── hello/       # Public diagnostics
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Route table and middleware ordering
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module follows the same layout: `controller.rs` (handlers),
//! `service.rs` (logic), `model.rs` (DTOs) and `router.rs`.
//!
//! ## Request Pipeline
//!
//! ```text
//! client ─► logging ─► CORS ─► authentication gate ─► access decision ─► role layer ─► handler
//! ```
//!
//! The gate only annotates the request with a [`middleware::SecurityContext`];
//! the access decision turns a missing principal on a protected path into a
//! bare `401`, and role layers turn a missing role into a bare `403`.
//!
//! ## Endpoints
//!
//! | Method | Path | Access |
//! |--------|------|--------|
//! | POST | `/api/authenticate` | public |
//! | POST | `/api/signup` | public |
//! | GET | `/api/hello` | public |
//! | GET | `/api/user` | `ROLE_USER` or `ROLE_ADMIN` |
//! | GET | `/api/user/{username}` | `ROLE_ADMIN` |
//! | GET | `/health`, `/metrics`, `/scalar` | public |
//!
//! ## Quick Start
//!
//! ```bash
//! export JWT_SECRET=$(cargo run -q --bin tokengate-cli -- generate-secret)
//! export JWT_TOKEN_VALIDITY_SECONDS=86400
//! cargo run --bin tokengate
//! ```
//!
//! Without `DATABASE_URL` users live in memory.
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI documentation setup
//! - [`middleware`]: Authentication and authorization middleware
//! - [`modules`]: Feature modules
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`validator`]: Request validation utilities

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use tokengate_auth;
pub use tokengate_config;
pub use tokengate_core;
pub use tokengate_db;
pub use tokengate_observability;
