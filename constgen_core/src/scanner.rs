//! Extraction of enumerator definitions from header text.
//!
//! A line counts as a definition when, after optional leading whitespace, it
//! starts with an identifier matching the class pattern that is followed by
//! `=` or `,`. Anything else (comments, macros that merely mention the
//! prefix, the last enumerator of a list without a trailing comma) is ignored.

use crate::error::{ConstgenError, Result};
use crate::registry::ConstantClass;
use regex::Regex;
use tracing::trace;

/// One named value found for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// Short Python-side name, e.g. `X86_64` for `DRGN_ARCH_X86_64`.
    pub name: String,
    /// C expression passed through to the generated code untouched.
    pub value: String,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Compiled matcher for a single [`ConstantClass`].
#[derive(Debug)]
pub struct HeaderScanner<'a> {
    class: &'a ConstantClass,
    regex: Regex,
    name_groups: usize,
}

impl<'a> HeaderScanner<'a> {
    pub fn new(class: &'a ConstantClass) -> Result<Self> {
        let name_groups = Regex::new(class.pattern)
            .map_err(|e| ConstgenError::regex(class.name, e))?
            .captures_len()
            - 1;

        // Group 1 is the whole identifier, groups 2..=name_groups+1 belong to
        // the class pattern, `rest` is the remainder of the line after `=`.
        let line = format!(
            r"(?mR)^\s*({})\s*(?:,|=(?P<rest>[^\r\n]*))",
            class.pattern
        );
        let regex = Regex::new(&line).map_err(|e| ConstgenError::regex(class.name, e))?;

        Ok(Self {
            class,
            regex,
            name_groups,
        })
    }

    /// Returns the scanned constants in header order. Seeded constants are
    /// not included.
    pub fn scan(&self, header: &str) -> Vec<Constant> {
        let mut constants = Vec::new();

        for caps in self.regex.captures_iter(header) {
            let Some(identifier) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };

            if let Some(excluded) = self.class.exclude {
                if identifier.ends_with(excluded) {
                    trace!(class = self.class.name, identifier, "Skipping excluded identifier");
                    continue;
                }
            }

            let name = (2..2 + self.name_groups)
                .map(|i| caps.get(i).map_or("", |m| m.as_str()))
                .collect::<Vec<_>>()
                .join("_");

            let value = match caps.name("rest") {
                Some(rest) => assigned_value(rest.as_str()).unwrap_or_else(|| {
                    trace!(
                        class = self.class.name,
                        identifier,
                        "No complete value on the definition line, using identifier"
                    );
                    identifier
                }),
                None => identifier,
            };

            trace!(class = self.class.name, %name, value, "Matched enumerator");
            constants.push(Constant::new(name, value));
        }

        constants
    }

    /// Seeded constants followed by everything [`scan`](Self::scan) finds.
    pub fn collect(&self, header: &str) -> Vec<Constant> {
        let mut constants: Vec<Constant> = self
            .class
            .seeded
            .iter()
            .map(|(name, value)| Constant::new(*name, *value))
            .collect();
        constants.extend(self.scan(header));
        constants
    }
}

/// Expression text of an assignment, given the rest of the line after `=`.
///
/// The expression ends at the first comma outside parentheses, at a comment
/// opener, or at the end of the line. Returns `None` when it is empty or its
/// parentheses do not balance on this line, e.g. a macro call whose arguments
/// continue on the next line.
fn assigned_value(rest: &str) -> Option<&str> {
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut end = bytes.len();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.checked_sub(1)?,
            b',' if depth == 0 => {
                end = i;
                break;
            }
            b'/' if matches!(bytes.get(i + 1), Some(b'/' | b'*')) => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    let value = rest[..end].trim();
    (!value.is_empty()).then_some(value)
}

/// Scans `header` for the definitions of `class`.
pub fn scan(header: &str, class: &ConstantClass) -> Result<Vec<Constant>> {
    Ok(HeaderScanner::new(class)?.scan(header))
}

/// Like [`scan`], with the class's seeded constants prepended.
pub fn collect_constants(header: &str, class: &ConstantClass) -> Result<Vec<Constant>> {
    Ok(HeaderScanner::new(class)?.collect(header))
}
