//! [`Query`] resolving the current [`AuthStatus`].

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Identity,
    infra::api::{self, Api, Credentials},
    store::Backend,
    Client,
};

use super::Query;

/// Authentication status of the visitor.
///
/// Derived, never persisted: recomputed per page load from the stored
/// [`SessionRecord`] or a live session check.
///
/// [`SessionRecord`]: crate::domain::SessionRecord
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuthStatus {
    /// Status is not known yet: no resolution has completed.
    Unresolved,

    /// Visitor is authenticated as the carried [`Identity`].
    Authenticated(Identity),

    /// Visitor is not authenticated.
    Unauthenticated,
}

/// [`Query`] resolving the current [`AuthStatus`].
///
/// Both strategies fulfill the same contract and are interchangeable; an
/// application picks one and sticks to it. Every failure path terminates in
/// [`AuthStatus::Unauthenticated`] (fail closed), so resolution always
/// completes.
#[derive(Clone, Copy, Debug)]
pub enum ResolveAuthStatus {
    /// Derive the status from the local [`SessionStore`] alone.
    ///
    /// [`SessionStore`]: crate::store::SessionStore
    Local,

    /// Derive the status from a live session check against the content API,
    /// with credentials included.
    Remote,
}

impl<A, S> Query<ResolveAuthStatus> for Client<A, S>
where
    A: Api<
        Select<By<Identity, Credentials>>,
        Ok = Identity,
        Err = Traced<api::Error>,
    >,
    S: Backend,
{
    type Ok = AuthStatus;
    type Err = Infallible;

    async fn execute(
        &self,
        strategy: ResolveAuthStatus,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(match strategy {
            ResolveAuthStatus::Local => match self.store().read().await {
                Ok(Some(record)) => {
                    AuthStatus::Authenticated(record.identity)
                }
                Ok(None) => AuthStatus::Unauthenticated,
                Err(e) => {
                    log::warn!("`SessionStore` read failed: {e}");
                    AuthStatus::Unauthenticated
                }
            },
            ResolveAuthStatus::Remote => {
                match self
                    .api()
                    .execute(Select(By::new(Credentials)))
                    .await
                {
                    Ok(identity) => AuthStatus::Authenticated(identity),
                    Err(e) => {
                        log::debug!("session check failed: {e}");
                        AuthStatus::Unauthenticated
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::Insert,
        DateTime,
    };
    use serde_json::json;

    use crate::{
        infra::{
            api::stub::Stub,
            storage::{Memory, Storage as _},
        },
        store, Config, SessionStore,
    };

    use super::{AuthStatus, Client, Query as _, ResolveAuthStatus};

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
        serde_json::from_value(json!({"id": 7, "nickname": "x"})).unwrap()
    }

    #[tokio::test]
    async fn local_without_record_is_unauthenticated() {
        let client = client(Stub::default());

        let status =
            client.execute(ResolveAuthStatus::Local).await.unwrap();

        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn local_with_live_record_is_authenticated() {
        let client = client(Stub::default());
        _ = client.store().write(identity()).await.unwrap();

        let status =
            client.execute(ResolveAuthStatus::Local).await.unwrap();

        assert_eq!(status, AuthStatus::Authenticated(identity()));
    }

    #[tokio::test]
    async fn local_with_expired_record_is_unauthenticated() {
        let client = client(Stub::default());
        let now = DateTime::now().unix_timestamp_millis();
        let raw = json!({
            "identity": {"id": 7},
            "issuedAt": now - 5_400_000,
            "expiresAt": now - 1,
        })
        .to_string();
        client
            .store()
            .storage()
            .execute(Insert((store::KEY, raw)))
            .await
            .unwrap();

        let status =
            client.execute(ResolveAuthStatus::Local).await.unwrap();

        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn remote_success_is_authenticated() {
        let client = client(Stub {
            session: Ok(identity()),
            ..Stub::default()
        });

        let status =
            client.execute(ResolveAuthStatus::Remote).await.unwrap();

        assert_eq!(status, AuthStatus::Authenticated(identity()));
    }

    #[tokio::test]
    async fn remote_failure_is_unauthenticated() {
        let client = client(Stub::default());

        let status =
            client.execute(ResolveAuthStatus::Remote).await.unwrap();

        assert_eq!(status, AuthStatus::Unauthenticated);
    }
}
