//! Canvas editor engine for the floor-plan editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing loop: mapping pointer events to canvas coordinates, hit-testing
//! placed elements, running the drag/resize state machine, drawing the scene,
//! and saving or loading the layout through the store's HTTP API. The host
//! page only mounts [`web::FloorPlanEditor`] into a root element.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Ordered in-memory element store |
//! | [`camera`] | Client-to-canvas coordinate mapping |
//! | [`input`] | UI state and the gesture state machine |
//! | [`hit`] | Hit-testing against element boxes and the resize handle |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`host`] | Palette, control buttons and info panel state |
//! | [`api`] | Save/load client for the layout store |
//! | [`consts`] | Shared numeric and color constants |
//! | `web` | `wasm-bindgen` handle for the host page (feature `web`) |

pub mod api;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod host;
pub mod input;
pub mod render;
#[cfg(feature = "web")]
pub mod web;
