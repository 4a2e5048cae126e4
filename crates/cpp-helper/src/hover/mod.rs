mod markdown;

pub use markdown::{FENCE, HoverBlock, between, fenced_code, quoted_name};
