//! Core of favlist: the favorite record model, the store collaborator and
//! its backends, the form state holder and the synchronizer that keeps the
//! displayed collection in step with the store.

pub mod error;
pub mod form;
pub mod models;
pub mod storage;
pub mod sync;

pub use error::{Error, Result, SyncError};
