//! Platform layer
//!
//! Browser bindings for the host API plus LocalStorage access. Native builds
//! have no platform layer; the binary drives `RunSimulation` directly.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebRun;

/// LocalStorage, if the browser grants access
#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}
