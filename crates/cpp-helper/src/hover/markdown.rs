//! Field readers for clangd hover markdown.
//!
//! A hover block looks like:
//!
//! ````text
//! ### instance-method `resize`
//!
//! ---
//! → `void`
//!
//! ---
//! ```cpp
//! // In Widget
//! public: void resize(int width, int height)
//! ```
//! ````
//!
//! Every reader returns `None` when its marker is missing so callers can fail
//! closed instead of slicing garbage.

/// Code fence delimiter used by clangd.
pub const FENCE: &str = "```";

const BACKTICK: char = '`';
const SCOPE_COMMENT: &str = "// In ";
const NAMESPACE_COMMENT: &str = "// In namespace ";
const TYPE_FIELD: &str = "Type: `";

/// Text strictly between the first `open` and the next `close` after it.
pub fn between<'a>(
    text: &'a str,
    open: &str,
    close: &str,
) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// Interior of the last fenced code block, without the info string line.
pub fn fenced_code(text: &str) -> Option<&str> {
    let close = text.rfind(FENCE)?;
    let open = text[..close].rfind(FENCE)?;
    let inner = &text[open + FENCE.len()..close];
    // The opening fence line carries the info string (`cpp`).
    let (_, code) = inner.split_once('\n')?;
    Some(code.trim_end_matches(['\n', '\r']))
}

/// Backtick-quoted identifier on a hover title line.
pub fn quoted_name(line: &str) -> Option<&str> {
    let start = line.find(BACKTICK)? + BACKTICK.len_utf8();
    let rest = &line[start..];
    let name = match rest.find(BACKTICK) {
        Some(end) => &rest[..end],
        None => rest.trim_end(),
    };
    (!name.is_empty()).then_some(name)
}

/// Parsed view over one hover block.
#[derive(Debug, Clone, Copy)]
pub struct HoverBlock<'a> {
    text: &'a str,
    title: &'a str,
    code: Option<&'a str>,
}

impl<'a> HoverBlock<'a> {
    pub fn parse(text: &'a str) -> Self {
        let title = text.lines().next().unwrap_or_default();
        Self {
            text,
            title,
            code: fenced_code(text),
        }
    }

    /// First line of the hover, e.g. ``### field `m_name` ``.
    pub fn title(&self) -> &'a str {
        self.title
    }

    pub fn title_has(
        &self,
        key: &str,
    ) -> bool {
        self.title.contains(key)
    }

    /// The identifier quoted on the title line.
    pub fn entity(&self) -> Option<&'a str> {
        quoted_name(self.title)
    }

    /// Interior of the trailing fenced code block.
    pub fn code(&self) -> Option<&'a str> {
        self.code
    }

    /// Enclosing class from a `// In Widget` comment. Namespace comments are not
    /// class scopes and yield `None`.
    pub fn class_name(&self) -> Option<&'a str> {
        let line = self.scope_line()?;
        if line.starts_with(NAMESPACE_COMMENT) {
            return None;
        }
        non_empty(line[SCOPE_COMMENT.len()..].trim())
    }

    /// Enclosing namespace from a `// In namespace a::b` comment.
    pub fn namespace(&self) -> Option<&'a str> {
        let line = self.scope_line()?;
        non_empty(line.strip_prefix(NAMESPACE_COMMENT)?.trim())
    }

    /// Content of the first ``Type: `...` `` line in the hover body.
    pub fn type_field(&self) -> Option<&'a str> {
        self.text
            .lines()
            .skip(1)
            .find_map(|line| between(line, TYPE_FIELD, "`"))
            .and_then(|ty| non_empty(ty.trim()))
    }

    fn scope_line(&self) -> Option<&'a str> {
        self.code?.lines().map(str::trim).find(|line| line.starts_with(SCOPE_COMMENT))
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
#[path = "../../tests/src/hover/markdown_tests.rs"]
mod tests;
