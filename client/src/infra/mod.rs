//! Infrastructure layer.

pub mod api;
pub mod storage;

pub use self::{
    api::{Api, Http},
    storage::{Memory, Storage},
};
