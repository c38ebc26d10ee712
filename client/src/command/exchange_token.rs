//! [`Command`] for exchanging a one-time [`Token`] for a [`SessionRecord`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use url::Url;

#[cfg(doc)]
use crate::store::SessionStore;
use crate::{
    domain::{
        session::{self, Token},
        Identity, SessionRecord,
    },
    infra::api::{self, Api},
    store::{self, Backend},
    Client,
};

use super::Command;

/// [`Command`] for exchanging a one-time [`Token`] for a [`SessionRecord`].
///
/// The raw token is never persisted: only the resulting record lands in the
/// [`SessionStore`]. A failed exchange leaves the store untouched, so a
/// repeated attempt with an already spent token cannot clobber a session
/// established earlier.
#[derive(Clone, Debug, From)]
pub struct ExchangeToken {
    /// One-time [`Token`] to exchange.
    pub token: Token,
}

impl ExchangeToken {
    /// Extracts an [`ExchangeToken`] [`Command`] from the provided landing
    /// page URL.
    ///
    /// [`None`] is returned when the URL carries no token, which is the
    /// no-op path of most page loads.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        Token::from_url(url).map(Self::from)
    }
}

/// Output of [`ExchangeToken`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`SessionRecord`] established by the exchange.
    pub record: SessionRecord,
}

impl<A, S> Command<ExchangeToken> for Client<A, S>
where
    A: Api<
        Select<By<Identity, session::Token>>,
        Ok = Identity,
        Err = Traced<api::Error>,
    >,
    S: Backend,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ExchangeToken,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ExchangeToken { token } = cmd;

        let identity = self
            .api()
            .execute(Select(By::new(token)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let record = self
            .store()
            .write(identity)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output { record })
    }
}

/// Error of [`ExchangeToken`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Content API refused or failed the exchange.
    #[display("token exchange failed: {_0}")]
    Api(api::Error),

    /// [`SessionStore`] failed to persist the record.
    ///
    /// [`SessionStore`]: crate::store::SessionStore
    #[display("`SessionStore` operation failed: {_0}")]
    Store(store::Error),
}
