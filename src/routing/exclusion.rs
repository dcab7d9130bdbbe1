//! Paths forwarded without consulting the access gateway.
//!
//! API routes, build-internal assets, the favicon and static images are
//! served straight through; everything else is classified.

use crate::config::schema::ExclusionConfig;
use crate::routing::matcher::{AnyMatcher, ExtensionMatcher, Matcher, PathMatcher};

/// Compiled exclusion set. Immutable after construction.
#[derive(Debug)]
pub struct Exclusions {
    matcher: AnyMatcher,
}

impl Exclusions {
    pub fn from_config(config: &ExclusionConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
        for prefix in &config.prefixes {
            matchers.push(Box::new(PathMatcher::prefix(prefix.as_str())));
        }
        for path in &config.exact {
            matchers.push(Box::new(PathMatcher::exact(path.as_str())));
        }
        if !config.extensions.is_empty() {
            matchers.push(Box::new(ExtensionMatcher::new(&config.extensions)));
        }

        Self {
            matcher: AnyMatcher::new(matchers),
        }
    }

    /// Returns true if the path bypasses the gateway.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}
