//! Core types - pure abstractions shared by both passes.

mod link;
mod splice;
mod state;

pub use link::LinkKind;
pub use splice::splice;
pub use state::{is_shutdown, setup_shutdown_handler};
