//! # Paths
//!
//! A [`Path`] addresses one location in a [`Node`](crate::model::Node) tree as a
//! list of [`PathSegment`]s. Its canonical text form is the one the flat graph
//! is keyed by:
//!
//! ```text
//! spec.template.spec.containers[0].image
//! └─┬┘ └──┬───┘ └┬─┘ └───┬───┘└┬┘ └─┬─┘
//!  Key    Key   Key     Key  Index Key
//! ```
//!
//! Keys are joined with `.`; an index is appended directly to whatever
//! precedes it as `[i]`. Parsing the text form gives back the same segments,
//! which is what lets the rebuilder recreate sequences where the source had
//! them.

use crate::error::{Result, SiftError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(name.into()));
        self
    }

    pub fn index(mut self, i: usize) -> Self {
        self.segments.push(PathSegment::Index(i));
        self
    }

    /// Returns the path up to (and including) the segment at `end`. The root
    /// path has no segments and yields itself.
    pub fn prefix(&self, end: usize) -> Path {
        let take = end.saturating_add(1).min(self.segments.len());
        Path {
            segments: self.segments[..take].to_vec(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, segment) in self.segments.iter().enumerate() {
            if pos > 0 && matches!(segment, PathSegment::Key(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = SiftError;

    /// Parses the canonical text form.
    ///
    /// A key runs until the next `.` or `[`; `[digits]` is an index. A path
    /// may open with an index (sequence roots). Empty keys (`a..b`, leading
    /// `.`) and malformed brackets are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |why: &str| SiftError::InvalidPath(format!("{} in '{}'", why, s));

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = s.chars().peekable();
        // true right after '.', or at the start: a key must follow
        let mut expect_key = true;

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if key.is_empty() && expect_key {
                        return Err(invalid("empty key"));
                    }
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    expect_key = true;
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    } else if expect_key && !segments.is_empty() {
                        return Err(invalid("index without a parent"));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            Some(_) => return Err(invalid("non-numeric index")),
                            None => return Err(invalid("unclosed '['")),
                        }
                    }
                    if digits.is_empty() {
                        return Err(invalid("empty index"));
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| invalid("index out of range"))?;
                    segments.push(PathSegment::Index(index));
                    expect_key = false;
                    if let Some(&next) = chars.peek() {
                        if next != '.' && next != '[' {
                            return Err(invalid("missing '.' after index"));
                        }
                    }
                }
                ']' => return Err(invalid("unexpected ']'")),
                other => {
                    key.push(other);
                    expect_key = false;
                }
            }
        }

        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        } else if expect_key && !segments.is_empty() {
            return Err(invalid("trailing '.'"));
        }

        Ok(Path { segments })
    }
}
