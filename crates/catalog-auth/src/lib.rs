//! # catalog-auth
//!
//! Authentication for the catalog API: credential lookup, Argon2id
//! password verification and HS256 bearer tokens.
//!
//! ## Modules
//!
//! - `credentials`: account records and the store they are looked up in
//! - `jwt`: access token creation and validation
//! - `password`: Argon2id password hashing
//! - `authenticator`: the login and token verification flows

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;

pub use authenticator::{Authenticator, Principal};
pub use credentials::{Account, CredentialStore, MemoryCredentialStore};
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
