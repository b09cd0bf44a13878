//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own storage concerns so route handlers can stay focused
//! on protocol translation.

pub mod store;
