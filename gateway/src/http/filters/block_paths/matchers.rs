use super::BlockPathsFilterError;
use regex::Regex;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Result<Self, BlockPathsFilterError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| BlockPathsFilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    #[instrument(
        skip(self, path),
        level = "debug",
        name = "PathMatcher::matches",
        fields(pattern = %self.regex)
    )]
    pub fn matches(&self, path: &str) -> bool {
        let is_match = self.regex.is_match(path);
        if is_match {
            debug!("Path matched");
        }
        is_match
    }
}

/// Ordered, non-empty set of compiled path patterns.
#[derive(Debug, Clone)]
pub struct PathMatchers {
    matchers: Vec<PathMatcher>,
}

impl PathMatchers {
    /// Compiles every pattern in order. The first pattern that fails to
    /// compile aborts the whole set.
    pub fn compile<I, S>(patterns: I) -> Result<Self, BlockPathsFilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .map(|pattern| PathMatcher::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if matchers.is_empty() {
            return Err(BlockPathsFilterError::EmptyRuleSet);
        }

        Ok(Self { matchers })
    }

    /// First matcher in list order that matches `path`.
    pub fn find(&self, path: &str) -> Option<&PathMatcher> {
        self.matchers.iter().find(|matcher| matcher.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathMatcher> {
        self.matchers.iter()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
