//! Unicode front-end: turning plain text into resolved levels.

mod bidi;

pub use bidi::{ResolvedText, resolve_levels};
