//! Core use-case services.
//!
//! # Responsibility
//! - Own task list state and funnel every mutation through one type.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
