//! # pd-client
//!
//! The HTTP layer of the PayDesk client: a `reqwest` wrapper that attaches
//! bearer credentials and performs the one-shot 401 refresh-and-retry, plus
//! the fixed-interval status poller used for asynchronous mobile-money
//! confirmation.

pub mod http;
pub mod poller;

pub use http::ApiClient;
pub use poller::{PollOutcome, PollState, StatusPoller};
