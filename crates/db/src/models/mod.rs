//! Row models for the persistence layer.

pub mod account;
pub mod notification;
pub mod project;
pub mod timeline_entry;
