//! Path templates.
//!
//! A pattern is a slash-separated template such as `/users/:id/posts`.
//! Literal segments compare exactly; a `:name` segment binds exactly one
//! non-empty path segment. There is no wildcard suffix: segment counts must
//! be equal for a match.

use std::fmt;
use thiserror::Error;

use crate::routing::params::Params;

/// Rejected pattern at registration time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {pattern:?} must start with '/'")]
    MissingLeadingSlash { pattern: String },

    #[error("pattern {pattern:?} contains a parameter without a name")]
    UnnamedParam { pattern: String },

    #[error("pattern {pattern:?} binds parameter {name:?} more than once")]
    DuplicateParam { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed, immutable path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse and validate a template.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash {
                pattern: raw.to_string(),
            });
        }

        let mut segments = Vec::new();
        for part in split_segments(normalize(raw)) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(PatternError::UnnamedParam {
                        pattern: raw.to_string(),
                    })
                }
                Some(name) => {
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if taken {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters this pattern binds, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Positionally match a normalized path, returning the bound parameters.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let mut parts = split_segments(path);
        let mut params = Params::new();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        // Segment counts must agree.
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Strip a single trailing slash, leaving the root path untouched.
pub fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Split a path into segments. The root path has none.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/test/"), "/test");
        assert_eq!(normalize("/test"), "/test");
    }

    #[test]
    fn test_literal_match() {
        let pattern = Pattern::parse("/test").unwrap();
        assert!(pattern.captures("/test").is_some());
        assert!(pattern.captures("/tes").is_none());
        assert!(pattern.captures("/test/more").is_none());
        assert!(pattern.captures("/").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = Pattern::parse("/").unwrap();
        assert!(pattern.captures("/").unwrap().is_empty());
        assert!(pattern.captures("/a").is_none());
    }

    #[test]
    fn test_param_binding() {
        let pattern = Pattern::parse("/users/:id/posts/:post").unwrap();
        let params = pattern.captures("/users/42/posts/hello").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("post"), Some("hello"));
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id", "post"]);
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        let pattern = Pattern::parse("/users/:id/posts").unwrap();
        assert!(pattern.captures("/users//posts").is_none());
    }

    #[test]
    fn test_trailing_slash_pattern_is_normalized() {
        let pattern = Pattern::parse("/items/").unwrap();
        assert!(pattern.captures("/items").is_some());
        assert_eq!(pattern.as_str(), "/items/");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            Pattern::parse("test"),
            Err(PatternError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            Pattern::parse("/a/:"),
            Err(PatternError::UnnamedParam { .. })
        ));
        assert!(matches!(
            Pattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }
}
