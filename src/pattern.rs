// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout patterns that render contextual data into log lines.
//!
//! | Token | Renders |
//! |---|---|
//! | `%vcl{key}` | the value of `key`, or nothing |
//! | `%vcl{key:-default}` | the value of `key`, or `default` |
//! | `%vcl` | every entry as `key=value`, sorted by key, space separated |
//! | `%%` | a literal `%` |
//!
//! Everything else is copied verbatim.  Outside of a context every key renders
//! its default and `%vcl` renders nothing.
//!
//! ```rust
//! use contextual_logging::context::Context;
//! use contextual_logging::contextual_data;
//! use contextual_logging::pattern::Pattern;
//!
//! let pattern = Pattern::parse("[req=%vcl{requestId:-none}]").unwrap();
//! assert_eq!(pattern.render_current(), "[req=none]");
//!
//! let ctx = Context::new("request".to_string());
//! ctx.scope(|| {
//!     contextual_data::put("requestId", "abc123");
//!     assert_eq!(pattern.render_current(), "[req=abc123]");
//! });
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::contextual_data;
use crate::error::PatternError;

const MARKER: &str = "%vcl";
const DEFAULT_SEPARATOR: &str = ":-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Literal(String),
    Key {
        key: String,
        default: Option<String>,
    },
    All,
}

/// A parsed layout pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses `source`.
    ///
    /// ```rust
    /// use contextual_logging::pattern::Pattern;
    /// use contextual_logging::error::PatternError;
    ///
    /// assert!(Pattern::parse("%vcl{tenant} 100%% done").is_ok());
    /// assert_eq!(Pattern::parse("%vcl{tenant"), Err(PatternError::Unterminated { offset: 0 }));
    /// assert_eq!(Pattern::parse("x %vcl{}"), Err(PatternError::EmptyKey { offset: 2 }));
    /// ```
    pub fn parse(source: &str) -> Result<Pattern, PatternError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        while let Some(percent) = rest.find('%') {
            literal.push_str(&rest[..percent]);
            let offset = source.len() - rest.len() + percent;
            let tail = &rest[percent..];
            if let Some(after) = tail.strip_prefix("%%") {
                literal.push('%');
                rest = after;
            } else if let Some(after) = tail.strip_prefix(MARKER) {
                flush(&mut literal, &mut segments);
                match after.strip_prefix('{') {
                    Some(body) => {
                        let close = body.find('}').ok_or(PatternError::Unterminated { offset })?;
                        segments.push(parse_key(&body[..close], offset)?);
                        rest = &body[close + 1..];
                    }
                    None => {
                        segments.push(Segment::All);
                        rest = after;
                    }
                }
            } else {
                literal.push('%');
                rest = &tail[1..];
            }
        }
        literal.push_str(rest);
        flush(&mut literal, &mut segments);
        Ok(Pattern {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern rendering every entry, `%vcl`.
    pub fn all() -> Pattern {
        Pattern {
            source: MARKER.to_string(),
            segments: vec![Segment::All],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders against `data`; `None` means "no context".
    pub fn render(&self, data: Option<&HashMap<String, String>>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Key { key, default } => {
                    if let Some(value) = data.and_then(|d| d.get(key)).or(default.as_ref()) {
                        out.push_str(value);
                    }
                }
                Segment::All => {
                    if let Some(data) = data {
                        let mut entries: Vec<_> = data.iter().collect();
                        entries.sort();
                        for (i, (key, value)) in entries.into_iter().enumerate() {
                            if i > 0 {
                                out.push(' ');
                            }
                            out.push_str(key);
                            out.push('=');
                            out.push_str(value);
                        }
                    }
                }
            }
        }
        out
    }

    /// Renders against the current context's data.
    pub fn render_current(&self) -> String {
        self.render(contextual_data::get_all().as_ref())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::all()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn parse_key(body: &str, offset: usize) -> Result<Segment, PatternError> {
    let (key, default) = match body.split_once(DEFAULT_SEPARATOR) {
        Some((key, default)) => (key, Some(default.to_string())),
        None => (body, None),
    };
    if key.is_empty() {
        return Err(PatternError::EmptyKey { offset });
    }
    Ok(Segment::Key {
        key: key.to_string(),
        default,
    })
}
