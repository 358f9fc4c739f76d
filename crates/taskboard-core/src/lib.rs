//! Core task-board logic: the task model, normalization, derived views
//! (overdue, stats, filtering) and the store/repository contracts.
//! Everything here is synchronous and free of I/O except the store trait.

pub mod ops;
pub mod query;
pub mod record;
pub mod repository;
pub mod stats;
pub mod storage;
pub mod tasks;
