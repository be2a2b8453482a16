//! # pd-auth
//!
//! Session state for the PayDesk client: the access/refresh token pair, the
//! pluggable session store (in-memory and file-backed) and role-gated
//! section access.

pub mod permissions;
pub mod session;
pub mod tokens;

pub use permissions::Section;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SharedSessionStore};
pub use tokens::AuthTokens;
