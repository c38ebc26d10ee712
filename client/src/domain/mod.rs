//! Domain definitions.

pub mod identity;
pub mod navigation;
pub mod session;

pub use self::{
    identity::Identity,
    navigation::{Catalogue, Tag, UserInfo},
    session::SessionRecord,
};
