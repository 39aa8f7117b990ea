pub mod config;
pub mod contact;
pub mod content;
pub mod logging;
pub mod menu;
pub mod reveal;
pub mod router;
pub mod schedule;
pub mod scroll;
pub mod typing;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
