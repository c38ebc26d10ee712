//! [`Command`] for terminating the current session.

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    infra::api::{self, Api, Credentials},
    store::{self, Backend},
    Client,
};

use super::Command;

/// [`Command`] for terminating the current session.
///
/// The local [`SessionRecord`] is dropped even when the API call fails: the
/// server may have revoked the session already, and the UI must not keep
/// claiming an authentication the server no longer honors.
///
/// [`SessionRecord`]: crate::domain::SessionRecord
#[derive(Clone, Copy, Debug)]
pub struct Logout;

/// Output of [`Logout`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Where the browser is sent after the logout.
    pub redirect: Url,
}

impl<A, S> Command<Logout> for Client<A, S>
where
    A: Api<Delete<Credentials>, Ok = (), Err = Traced<api::Error>>,
    S: Backend,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Logout) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        if let Err(e) = self.api().execute(Delete(Credentials)).await {
            log::warn!("`DELETE /users/logout` failed: {e}");
        }

        self.store()
            .clear()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            redirect: self.config().home_url(),
        })
    }
}

/// Error of [`Logout`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`SessionStore`] failed to clear the record.
    ///
    /// [`SessionStore`]: crate::store::SessionStore
    #[display("`SessionStore` operation failed: {_0}")]
    Store(store::Error),
}

#[cfg(test)]
mod spec {
    use http::StatusCode;
    use serde_json::json;

    use crate::{
        infra::{api::stub::Stub, storage::Memory},
        Config, SessionStore,
    };

    use super::{Client, Command as _, Logout};

    fn client(api: Stub) -> Client<Stub, Memory> {
        Client::new(
            Config {
                api_origin: "http://localhost:8002/api".parse().unwrap(),
                auth_origin: "http://localhost:8001".parse().unwrap(),
                app_origin: "http://localhost:3000".parse().unwrap(),
            },
            api,
            SessionStore::new(
                Memory::default(),
                SessionStore::<Memory>::DEFAULT_TTL,
            ),
        )
    }

    fn identity() -> crate::domain::Identity {
        serde_json::from_value(json!({"id": 7})).unwrap()
    }

    #[tokio::test]
    async fn clears_store_and_redirects_home() {
        let client = client(Stub::default());
        _ = client.store().write(identity()).await.unwrap();

        let output = client.execute(Logout).await.unwrap();

        assert!(client.store().read().await.unwrap().is_none());
        assert_eq!(output.redirect.as_str(), "http://localhost:3000/");
    }

    #[tokio::test]
    async fn clears_store_even_when_api_fails() {
        let client = client(Stub {
            logout: Err(StatusCode::INTERNAL_SERVER_ERROR),
            ..Stub::default()
        });
        _ = client.store().write(identity()).await.unwrap();

        let output = client.execute(Logout).await.unwrap();

        assert!(client.store().read().await.unwrap().is_none());
        assert_eq!(output.redirect.as_str(), "http://localhost:3000/");
    }
}
