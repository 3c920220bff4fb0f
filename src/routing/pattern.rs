//! Route path patterns.
//!
//! # Responsibilities
//! - Parse `/users/:id` and `/users/{id}` into literal and parameter segments
//! - Join group prefixes with route paths
//! - Render the canonical form handed to the axum router
//! - Detect patterns that cannot coexist in one table
//!
//! # Design Decisions
//! - Literal segments match case-sensitively
//! - A literal segment outranks a parameter at the same position
//! - Wildcards are not supported

use std::fmt;

/// A single `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// Why a pattern was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    MissingLeadingSlash,
    EmptySegment,
    EmptyParamName,
    InvalidParamName,
    DuplicateParamName,
    Wildcard,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PatternError::MissingLeadingSlash => "pattern must start with `/`",
            PatternError::EmptySegment => "empty path segment",
            PatternError::EmptyParamName => "parameter has no name",
            PatternError::InvalidParamName => "parameter names may only use ASCII letters, digits and `_`",
            PatternError::DuplicateParamName => "parameter name used twice",
            PatternError::Wildcard => "wildcard segments are not supported",
        };
        f.write_str(reason)
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl PathPattern {
    /// Parse a pattern such as `/user/:id`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;

        if rest.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
                trailing_slash: false,
            });
        }

        let (body, trailing_slash) = match rest.strip_suffix('/') {
            Some(body) => (body, true),
            None => (rest, false),
        };

        let mut segments = Vec::new();
        for piece in body.split('/') {
            let segment = parse_segment(piece)?;
            if let Segment::Param(name) = &segment {
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                {
                    return Err(PatternError::DuplicateParamName);
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            segments,
            trailing_slash,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in positional order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render using axum's `{name}` parameter syntax.
    pub fn to_axum_path(&self) -> String {
        self.to_string()
    }

    /// True when both patterns match exactly the same set of request paths.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.trailing_slash == other.trailing_slash
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// First position where both patterns share a prefix but name the
    /// parameter differently, as `(ours, theirs)`.
    pub fn param_name_clash<'a>(&'a self, other: &'a Self) -> Option<(&'a str, &'a str)> {
        for pair in self.segments.iter().zip(&other.segments) {
            match pair {
                (Segment::Literal(a), Segment::Literal(b)) if a == b => continue,
                (Segment::Param(a), Segment::Param(b)) if a == b => continue,
                (Segment::Param(a), Segment::Param(b)) => return Some((a.as_str(), b.as_str())),
                _ => return None,
            }
        }
        None
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "/{}", text)?,
                Segment::Param(name) => write!(f, "/{{{}}}", name)?,
            }
        }
        if self.trailing_slash {
            f.write_str("/")?;
        }
        Ok(())
    }
}

fn parse_segment(piece: &str) -> Result<Segment, PatternError> {
    if piece.is_empty() {
        return Err(PatternError::EmptySegment);
    }
    if piece.starts_with('*') || piece.starts_with("{*") {
        return Err(PatternError::Wildcard);
    }

    let name = if let Some(name) = piece.strip_prefix(':') {
        Some(name)
    } else if let Some(inner) = piece.strip_prefix('{') {
        Some(inner.strip_suffix('}').ok_or(PatternError::InvalidParamName)?)
    } else {
        None
    };

    match name {
        Some("") => Err(PatternError::EmptyParamName),
        Some(name) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
            Err(PatternError::InvalidParamName)
        }
        Some(name) => Ok(Segment::Param(name.to_string())),
        None if piece.contains(|c: char| c == '{' || c == '}') => Err(PatternError::InvalidParamName),
        None => Ok(Segment::Literal(piece.to_string())),
    }
}

/// Concatenate a group prefix and a route path the way nested groups do.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if path.starts_with('/') => format!("{}{}", prefix, path),
        (false, false) => format!("{}/{}", prefix, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_and_brace_syntax_are_equivalent() {
        let colon = PathPattern::parse("/user/:id").unwrap();
        let brace = PathPattern::parse("/user/{id}").unwrap();
        assert_eq!(colon, brace);
        assert_eq!(colon.to_axum_path(), "/user/{id}");
        assert_eq!(colon.param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_root_and_trailing_slash() {
        assert_eq!(PathPattern::parse("/").unwrap().to_axum_path(), "/");

        let pattern = PathPattern::parse("/user/").unwrap();
        assert_eq!(pattern.segments(), &[Segment::Literal("user".into())]);
        assert_eq!(pattern.to_axum_path(), "/user/");
        assert!(!pattern.same_shape(&PathPattern::parse("/user").unwrap()));
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert_eq!(PathPattern::parse("user"), Err(PatternError::MissingLeadingSlash));
        assert_eq!(PathPattern::parse("/a//b"), Err(PatternError::EmptySegment));
        assert_eq!(PathPattern::parse("/a/:"), Err(PatternError::EmptyParamName));
        assert_eq!(PathPattern::parse("/a/{id"), Err(PatternError::InvalidParamName));
        assert_eq!(PathPattern::parse("/a/:i-d"), Err(PatternError::InvalidParamName));
        assert_eq!(PathPattern::parse("/a/*rest"), Err(PatternError::Wildcard));
        assert_eq!(PathPattern::parse("/a/{*rest}"), Err(PatternError::Wildcard));
        assert_eq!(
            PathPattern::parse("/a/:id/b/:id"),
            Err(PatternError::DuplicateParamName)
        );
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        let a = PathPattern::parse("/user/:id").unwrap();
        let b = PathPattern::parse("/user/:name").unwrap();
        let c = PathPattern::parse("/user/me").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn test_param_name_clash() {
        let a = PathPattern::parse("/user/:id/posts").unwrap();
        let b = PathPattern::parse("/user/:name").unwrap();
        assert_eq!(a.param_name_clash(&b), Some(("id", "name")));

        let c = PathPattern::parse("/users/:name").unwrap();
        assert_eq!(a.param_name_clash(&c), None);

        let d = PathPattern::parse("/user/:id").unwrap();
        assert_eq!(a.param_name_clash(&d), None);
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("", ""), "/");
        assert_eq!(join_paths("", "/search"), "/search");
        assert_eq!(join_paths("/public", "/info"), "/public/info");
        assert_eq!(join_paths("/public/", "/info"), "/public/info");
        assert_eq!(join_paths("/api", "data"), "/api/data");
        assert_eq!(join_paths("/api", ""), "/api");
        assert_eq!(join_paths("/api", "/"), "/api/");
    }
}
