//! Layout store server for the floor-plan editor.
//!
//! Holds one floor plan in process memory and exposes it over HTTP:
//! `POST /api/save-layout` replaces it wholesale, `GET /api/get-layout`
//! returns it. Payloads are validated against the shared [`layout`] model at
//! the boundary, so the store only ever holds well-formed layouts.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Environment-driven server configuration |
//! | [`routes`] | Axum router and request handlers |
//! | [`services`] | The `LayoutStore` capability and its memory backend |
//! | [`state`] | Shared state injected into handlers |
//! | [`error`] | Error codes and HTTP error responses |

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
