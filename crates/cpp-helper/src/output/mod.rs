//! Build log helpers: clickable compiler locations and condensed messages.

mod beautify;
mod links;
mod location;

pub use beautify::{BuildMessage, MessageKind, beautify_line, beautify_output};
pub use links::build_output_links;
pub use location::{SourceLocation, parse_location, resolve_build_path};
