//! File-backed storage for the task board: one JSON document holding the
//! whole collection, replaced atomically on every save.

pub mod json_file_store;
