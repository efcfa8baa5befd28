//! UI building blocks
//!
//! View-only helpers; all state lives in `crate::state` and every
//! interaction is reported back through `crate::Message`.

pub mod grid;
pub mod viewer;
