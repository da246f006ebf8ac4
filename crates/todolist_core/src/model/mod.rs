//! Task list domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, storage and FFI.
//! - Own text normalization rules applied before a task is accepted.
//!
//! # Invariants
//! - Every task is identified by an opaque `TaskId` that is never reused.
//! - Accepted task text is trimmed and at least `MIN_TASK_TEXT_CHARS` long.

pub mod task;
