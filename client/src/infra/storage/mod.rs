//! [`Storage`]-related implementations.

pub mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;

/// Storage operation.
pub use common::Handler as Storage;

/// Key of a value kept in a [`Storage`].
///
/// The subsystem persists everything under fixed, compile-time known keys.
pub type Key = &'static str;

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] error.
    Memory(memory::Error),
}
