//! State management module
//!
//! This module handles all application state, including:
//! - Shared data structures (data.rs)
//! - Paginated fetch bookkeeping (fetch.rs)
//! - The persisted favorites collection (favorites.rs)
//! - The signed-in user session (session.rs)

pub mod data;
pub mod favorites;
pub mod fetch;
pub mod session;
