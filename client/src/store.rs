//! [`SessionStore`] definitions.

use std::time::Duration;

use common::{
    operations::{By, Delete, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{Identity, SessionRecord},
    infra::storage::{self, Key, Storage},
};

/// Fixed [`Key`] a [`SessionRecord`] is persisted under.
pub const KEY: Key = "user";

/// Raw key/value backend a [`SessionStore`] operates upon.
///
/// The backend stores opaque strings and is scoped to the browsing tab: it
/// is not shared across tabs and never synced to a server.
pub trait Backend:
    Storage<
        Select<By<Option<String>, Key>>,
        Ok = Option<String>,
        Err = Traced<storage::Error>,
    > + Storage<Insert<(Key, String)>, Ok = (), Err = Traced<storage::Error>>
    + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>
{
}

impl<S> Backend for S where
    S: Storage<
            Select<By<Option<String>, Key>>,
            Ok = Option<String>,
            Err = Traced<storage::Error>,
        > + Storage<Insert<(Key, String)>, Ok = (), Err = Traced<storage::Error>>
        + Storage<Delete<Key>, Ok = (), Err = Traced<storage::Error>>
{
}

/// Tab-scoped store of the current [`SessionRecord`].
///
/// The one shared mutable resource of the subsystem: only the token handoff
/// and an explicit logout write or clear it, every other component is a
/// reader. A write is visible to the very next [`SessionStore::read()`] with
/// no staleness window.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    /// Raw [`Backend`] holding the persisted record.
    storage: S,

    /// Time-to-live of a written [`SessionRecord`].
    ttl: Duration,
}

impl<S> SessionStore<S> {
    /// Default time-to-live of a [`SessionRecord`].
    pub const DEFAULT_TTL: Duration = Duration::from_secs(90 * 60);

    /// Creates a new [`SessionStore`] on top of the provided raw `storage`.
    pub fn new(storage: S, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    /// Returns the raw [`Backend`] of this [`SessionStore`].
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the time-to-live of a written [`SessionRecord`].
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<S: Backend> SessionStore<S> {
    /// Returns the stored [`SessionRecord`], if a live one exists.
    ///
    /// An expired or malformed record is purged and reported as absent:
    /// expiry is an expected lifecycle event, not an error.
    ///
    /// # Errors
    ///
    /// Errors if the underlying [`Backend`] fails.
    pub async fn read(
        &self,
    ) -> Result<Option<SessionRecord>, Traced<Error>> {
        use Error as E;

        let Some(raw) = self
            .storage
            .execute(Select(By::new(KEY)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        else {
            return Ok(None);
        };

        let Ok(record) = serde_json::from_str::<SessionRecord>(&raw) else {
            log::warn!("malformed `SessionRecord` in storage, purging");
            self.clear().await?;
            return Ok(None);
        };

        if record.is_expired(DateTime::now()) {
            self.clear().await?;
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Persists a new [`SessionRecord`] for the provided [`Identity`],
    /// replacing any existing one.
    ///
    /// The record expires exactly [`SessionStore::ttl()`] after the moment
    /// of this call.
    ///
    /// # Errors
    ///
    /// Errors if the record cannot be serialized or the underlying
    /// [`Backend`] fails.
    pub async fn write(
        &self,
        identity: Identity,
    ) -> Result<SessionRecord, Traced<Error>> {
        use Error as E;

        let issued_at = DateTime::now();
        let record = SessionRecord {
            identity,
            issued_at: issued_at.coerce(),
            expires_at: (issued_at + self.ttl).coerce(),
        };

        let raw = serde_json::to_string(&record)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        self.storage
            .execute(Insert((KEY, raw)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(record)
    }

    /// Removes any stored [`SessionRecord`].
    ///
    /// Idempotent: clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Errors if the underlying [`Backend`] fails.
    pub async fn clear(&self) -> Result<(), Traced<Error>> {
        use Error as E;

        self.storage
            .execute(Delete(KEY))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of a [`SessionStore`] operation.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Raw [`Backend`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`SessionRecord`] serialization error.
    #[display("failed to serialize a `SessionRecord`: {_0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::infra::storage::Memory;

    use super::{
        By, DateTime, Delete, Insert, Select, SessionStore, Storage as _,
        KEY,
    };

    fn identity() -> crate::domain::Identity {
        serde_json::from_value(json!({"id": 7, "nickname": "x"})).unwrap()
    }

    fn store() -> SessionStore<Memory> {
        SessionStore::new(Memory::default(), SessionStore::<Memory>::DEFAULT_TTL)
    }

    #[tokio::test]
    async fn round_trips_written_identity() {
        let store = store();

        let written = store.write(identity()).await.unwrap();
        let read = store.read().await.unwrap().unwrap();

        assert_eq!(read.identity, identity());
        assert_eq!(read.identity, written.identity);
    }

    #[tokio::test]
    async fn expiry_equals_ttl_exactly() {
        let store = store();

        _ = store.write(identity()).await.unwrap();
        let record = store.read().await.unwrap().unwrap();

        assert_eq!(
            record.expires_at.coerce::<()>() - record.issued_at.coerce(),
            store.ttl(),
        );
    }

    #[tokio::test]
    async fn expired_record_is_absent_and_purged() {
        let store = store();
        let now = DateTime::now().unix_timestamp_millis();
        let raw = json!({
            "identity": {"id": 7},
            "issuedAt": now - 5_400_000,
            "expiresAt": now - 1,
        })
        .to_string();
        store
            .storage()
            .execute(Insert((KEY, raw)))
            .await
            .unwrap();

        assert!(store.read().await.unwrap().is_none());
        // Idempotent expiry: the record is gone, not just hidden.
        assert!(store.read().await.unwrap().is_none());
        assert!(store
            .storage()
            .execute(Select(By::new(KEY)))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn record_expiring_this_instant_is_absent() {
        let store = store();
        let now = DateTime::now().unix_timestamp_millis();
        let raw = json!({
            "identity": {"id": 7},
            "issuedAt": now - 5_400_000,
            "expiresAt": now,
        })
        .to_string();
        store
            .storage()
            .execute(Insert((KEY, raw)))
            .await
            .unwrap();

        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_record_is_absent_and_purged() {
        let store = store();
        store
            .storage()
            .execute(Insert((KEY, "{not json".to_owned())))
            .await
            .unwrap();

        assert!(store.read().await.unwrap().is_none());
        assert!(store
            .storage()
            .execute(Select(By::new(KEY)))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = store();

        store.clear().await.unwrap();

        _ = store.write(identity()).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_then_read_sees_nothing() {
        let store = store();

        _ = store.write(identity()).await.unwrap();
        store
            .storage()
            .execute(Delete(KEY))
            .await
            .unwrap();

        assert!(store.read().await.unwrap().is_none());
    }
}
