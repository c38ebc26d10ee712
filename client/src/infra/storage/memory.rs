//! In-memory [`Storage`] backend.

use std::{cell::RefCell, collections::HashMap};

use common::operations::{By, Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use super::{Key, Storage};

/// Tab-scoped in-memory [`Storage`] backend.
///
/// The analog of the browser's per-tab session storage: values live for the
/// lifetime of this instance and are never shared across tabs or synced
/// anywhere. Reads observe the latest write immediately.
#[derive(Debug, Default)]
pub struct Memory {
    /// Stored values.
    values: RefCell<HashMap<Key, String>>,
}

impl Storage<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .values
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?
            .get(by.into_inner())
            .cloned())
    }
}

impl Storage<Insert<(Key, String)>> for Memory {
    type Ok = ();
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Insert((key, value)): Insert<(Key, String)>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self
            .values
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?
            .insert(key, value);
        Ok(())
    }
}

impl Storage<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self
            .values
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?
            .remove(key);
        Ok(())
    }
}

/// [`Memory`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Values are borrowed for reading already.
    Borrowed(std::cell::BorrowError),

    /// Values are borrowed for writing already.
    BorrowedMut(std::cell::BorrowMutError),
}

#[cfg(test)]
mod spec {
    use super::{By, Delete, Insert, Memory, Select, Storage as _};

    #[tokio::test]
    async fn insert_select_delete() {
        let memory = Memory::default();

        assert_eq!(
            memory.execute(Select(By::new("k"))).await.unwrap(),
            None,
        );

        memory
            .execute(Insert(("k", "v".to_owned())))
            .await
            .unwrap();
        assert_eq!(
            memory.execute(Select(By::new("k"))).await.unwrap(),
            Some("v".to_owned()),
        );

        memory
            .execute(Insert(("k", "w".to_owned())))
            .await
            .unwrap();
        assert_eq!(
            memory.execute(Select(By::new("k"))).await.unwrap(),
            Some("w".to_owned()),
        );

        memory.execute(Delete("k")).await.unwrap();
        assert_eq!(
            memory.execute(Select(By::new("k"))).await.unwrap(),
            None,
        );
    }
}
