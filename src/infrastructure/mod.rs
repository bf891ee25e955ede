//! Infrastructure layer - concrete storage, credential and logging adapters

pub mod logging;
pub mod user;
