// Diff-to-markup transform behind the "improved résumé" view.
// Everything here is pure: no I/O, no shared state, safe to call from any handler.

pub mod escape;
pub mod handlers;
pub mod render;
pub mod segments;

pub use render::{transform, transform_blocking, transform_with};
pub use segments::Granularity;
