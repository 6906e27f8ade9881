use crate::error::ConfigError;
use regex::Regex;

/// Regex rules restricting which internal links the crawler follows.
///
/// An empty filter follows everything. Exclusions take precedence over
/// inclusions; when include patterns are present at least one must match.
#[derive(Debug, Default)]
pub struct FollowFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl FollowFilter {
    /// Compile a filter from include and exclude patterns
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self, ConfigError> {
        let mut include_regexes = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a resolved URL may be followed
    pub fn should_follow(&self, url: &str) -> bool {
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|regex| regex.is_match(url))
    }

    pub fn is_empty(&self) -> bool {
        self.include_regexes.is_empty() && self.exclude_regexes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_follows_everything() {
        let filter = FollowFilter::default();
        assert!(filter.is_empty());
        assert!(filter.should_follow("https://example.com/anything.pdf"));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = FollowFilter::new(
            &[],
            &patterns(&[r"\.(jpg|jpeg|png|gif|css|js|ico|svg|pdf)$"]),
        )
        .unwrap();

        assert!(!filter.should_follow("https://example.com/logo.png"));
        assert!(filter.should_follow("https://example.com/about"));
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let filter = FollowFilter::new(
            &patterns(&[r"/docs/"]),
            &patterns(&[r"/docs/draft/"]),
        )
        .unwrap();

        assert!(filter.should_follow("https://example.com/docs/page"));
        assert!(!filter.should_follow("https://example.com/blog/post"));
        // Exclusion wins even though the include pattern matches
        assert!(!filter.should_follow("https://example.com/docs/draft/page"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = FollowFilter::new(&patterns(&["("]), &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern(_)));
    }
}
