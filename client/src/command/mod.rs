//! [`Command`] definition.

pub mod exchange_token;
pub mod logout;

/// [`Command`] of the [`Client`].
///
/// [`Client`]: crate::Client
pub use common::Handler as Command;

pub use self::{exchange_token::ExchangeToken, logout::Logout};
