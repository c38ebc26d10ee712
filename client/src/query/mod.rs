//! [`Query`] definition.

pub mod auth_status;
pub mod navigation;

/// [`Query`] of the [`Client`].
///
/// [`Client`]: crate::Client
pub use common::Handler as Query;

pub use self::{
    auth_status::{AuthStatus, ResolveAuthStatus},
    navigation::{LoadNavigation, Navigation},
};
