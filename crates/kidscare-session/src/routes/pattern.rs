//! Path patterns with `:param` segments.

/// One segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A parsed route pattern such as `/admin/children/edit/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: &'static str,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Segments starting with `:` are parameters.
    pub fn parse(raw: &'static str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &'static str {
        self.raw
    }

    /// Number of literal segments; more literals means more specific.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Match normalized path segments, returning captured parameters.
    ///
    /// Literal comparison is exact and case-sensitive.
    pub fn matches(&self, path: &[&str]) -> Option<Vec<(String, String)>> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (segment, actual) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(lit) if lit == actual => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.push((name.to_string(), actual.to_string())),
            }
        }
        Some(params)
    }
}

/// Normalize a requested path into its segments.
///
/// Drops any query string or fragment, empty segments and trailing slashes.
pub fn normalize(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

/// Rebuild a canonical path string from segments.
pub fn join(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/admin/billing/"), vec!["admin", "billing"]);
        assert_eq!(normalize("/staff//children?x=1#top"), vec!["staff", "children"]);
        assert!(normalize("/").is_empty());
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_match_captures_params() {
        let pattern = PathPattern::parse("/admin/children/edit/:id");
        let params = pattern
            .matches(&["admin", "children", "edit", "12"])
            .unwrap();
        assert_eq!(params, vec![("id".to_string(), "12".to_string())]);
        assert!(pattern.matches(&["admin", "children", "edit"]).is_none());
        assert!(pattern.matches(&["Admin", "children", "edit", "12"]).is_none());
        assert_eq!(pattern.specificity(), 3);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[]), "/");
        assert_eq!(join(&["staff", "health"]), "/staff/health");
    }
}
