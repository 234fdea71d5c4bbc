//! Authentication: credential checks, token issuance/verification, and the
//! bearer-token request gate.

mod extractor;
pub mod handlers;
mod service;
mod token;

pub use service::AuthService;
pub use token::{Claims, Identity, TokenService};
