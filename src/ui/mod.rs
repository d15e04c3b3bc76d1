//! Terminal user interface.

mod app;
mod events;
mod layout;
mod render;
mod screen;
mod theme;

pub use app::App;
