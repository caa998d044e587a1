//! Configuration for `cdash`: file schema, loading and XDG paths.

pub mod default;
pub mod error;
pub mod loader;
pub mod schema;
pub mod xdg;
