//! File naming conventions and compilation database rewriting.

mod compile_commands;
mod mapping;

pub use compile_commands::{
    COMPILE_COMMANDS_FILE, StripError, StripRule, current_platform, resolve_dir, strip_compile_commands,
};
pub use mapping::{
    HeaderSourceMapping, counterpart_extensions, default_mappings, find_counterpart, implementation_target, is_header,
    source_extension_for,
};
