//! A single resolved stack frame

use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved call site.
///
/// Serialized with the field names crash-reporting services expect
/// (`function`, `module`, `filename`, `lineno`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StackFrame {
    /// Bare function name, e.g. `load_user` or `{{closure}}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function: String,
    /// Path leading to the function, e.g. `my_app::users::Repo`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
    /// Source file the frame resolved to
    #[serde(rename = "filename", default, skip_serializing_if = "String::is_empty")]
    pub file_path: String,
    /// 1-based line number, 0 when unknown
    #[serde(rename = "lineno", default, skip_serializing_if = "is_zero")]
    pub line: u32,
}

fn is_zero(line: &u32) -> bool {
    *line == 0
}

impl StackFrame {
    /// Create a frame from its parts
    pub fn new(
        function: impl Into<String>,
        module: impl Into<String>,
        file_path: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            function: function.into(),
            module: module.into(),
            file_path: file_path.into(),
            line,
        }
    }

    /// Build a frame from a demangled symbol path, splitting the module
    /// off the last `::` segment.
    pub fn from_symbol(symbol: &str, file_path: impl Into<String>, line: u32) -> Self {
        let (module, function) = split_symbol(symbol);
        Self::new(function, module, file_path, line)
    }

    /// Fully-qualified name (`module::function`)
    pub fn qualified_name(&self) -> String {
        if self.module.is_empty() {
            self.function.clone()
        } else {
            format!("{}::{}", self.module, self.function)
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.function, self.file_path, self.line)
    }
}

/// Split `a::b::c` into (`a::b`, `c`).
///
/// Separators nested inside `<...>` belong to a type path and are not split on,
/// so `<T as core::fmt::Debug>::fmt` yields (`<T as core::fmt::Debug>`, `fmt`).
pub(crate) fn split_symbol(symbol: &str) -> (&str, &str) {
    let bytes = symbol.as_bytes();
    let mut depth = 0usize;
    let mut split_at = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && i + 1 < bytes.len() && bytes[i + 1] == b':' => {
                split_at = Some(i);
            }
            _ => {}
        }
    }

    match split_at {
        Some(i) => (&symbol[..i], &symbol[i + 2..]),
        None => ("", symbol),
    }
}
