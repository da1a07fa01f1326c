//! Managed path scope
//!
//! The shell only handles paths under its managed prefix. Within that prefix:
//! 1. Exact shell-home paths → no document mounted
//! 2. Paths matching the content pattern → fetchable documents
//! 3. Anything else → plain links, left to the browser

use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// Classification of a link destination relative to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Handled by the shell; carries the destination path
    Internal(String),
    /// Left to default browser navigation
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathScope {
    /// Path prefix under which the shell owns navigation
    managed_prefix: String,
    /// Pattern a path must contain to be a content document
    content_pattern: String,
    /// Exact-match paths that denote the shell home
    home_paths: Vec<String>,
}

impl PathScope {
    pub fn new(
        managed_prefix: impl Into<String>,
        content_pattern: impl Into<String>,
        home_paths: Vec<String>,
    ) -> Result<Self> {
        let managed_prefix = managed_prefix.into();
        let content_pattern = content_pattern.into();

        if !managed_prefix.starts_with('/') {
            return Err(NavigationError::InvalidScope(format!(
                "managed prefix must start with '/': {}",
                managed_prefix
            )));
        }
        if content_pattern.is_empty() {
            return Err(NavigationError::InvalidScope(
                "content pattern cannot be empty".to_string(),
            ));
        }
        if home_paths.is_empty() {
            return Err(NavigationError::InvalidScope(
                "at least one shell home path is required".to_string(),
            ));
        }

        Ok(Self {
            managed_prefix,
            content_pattern,
            home_paths,
        })
    }

    pub fn managed_prefix(&self) -> &str {
        &self.managed_prefix
    }

    pub fn content_pattern(&self) -> &str {
        &self.content_pattern
    }

    pub fn home_paths(&self) -> &[String] {
        &self.home_paths
    }

    /// Exact match against the shell-home allowlist
    pub fn is_shell_home(&self, path: &str) -> bool {
        self.home_paths.iter().any(|home| home == path)
    }

    /// A managed path that names a content document
    pub fn is_content_path(&self, path: &str) -> bool {
        path.starts_with(&self.managed_prefix) && path.contains(&self.content_pattern)
    }

    /// Decide whether a link from `page` to `destination` stays in the shell
    pub fn classify(&self, page: &Url, destination: &Url) -> LinkClass {
        if destination.origin() != page.origin() {
            return LinkClass::External;
        }

        let path = destination.path();
        if self.is_content_path(path) {
            LinkClass::Internal(path.to_string())
        } else {
            LinkClass::External
        }
    }
}

impl Default for PathScope {
    fn default() -> Self {
        Self {
            managed_prefix: "/pwa/".to_string(),
            content_pattern: "amp.max.html".to_string(),
            home_paths: vec!["/pwa".to_string(), "/pwa/".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/pwa/").unwrap()
    }

    #[test]
    fn test_shell_home_is_exact_match() {
        let scope = PathScope::default();

        assert!(scope.is_shell_home("/pwa"));
        assert!(scope.is_shell_home("/pwa/"));
        assert!(!scope.is_shell_home("/pwa//"));
        assert!(!scope.is_shell_home("/pwa/index.html"));
        assert!(!scope.is_shell_home("/"));
    }

    #[test]
    fn test_classify_internal() {
        let scope = PathScope::default();
        let dest = Url::parse("https://example.com/pwa/articles/foo.amp.max.html").unwrap();

        assert_eq!(
            scope.classify(&page(), &dest),
            LinkClass::Internal("/pwa/articles/foo.amp.max.html".to_string())
        );
    }

    #[test]
    fn test_classify_external() {
        let scope = PathScope::default();

        // Other origin
        let dest = Url::parse("https://other.com/pwa/articles/foo.amp.max.html").unwrap();
        assert_eq!(scope.classify(&page(), &dest), LinkClass::External);

        // Same host, other scheme
        let dest = Url::parse("http://example.com/pwa/articles/foo.amp.max.html").unwrap();
        assert_eq!(scope.classify(&page(), &dest), LinkClass::External);

        // Outside the managed prefix
        let dest = Url::parse("https://example.com/articles/foo.amp.max.html").unwrap();
        assert_eq!(scope.classify(&page(), &dest), LinkClass::External);

        // Plain page inside the prefix
        let dest = Url::parse("https://example.com/pwa/about.html").unwrap();
        assert_eq!(scope.classify(&page(), &dest), LinkClass::External);
    }

    #[test]
    fn test_invalid_scope() {
        assert!(PathScope::new("pwa/", "amp.max.html", vec!["/pwa".into()]).is_err());
        assert!(PathScope::new("/pwa/", "", vec!["/pwa".into()]).is_err());
        assert!(PathScope::new("/pwa/", "amp.max.html", vec![]).is_err());
    }
}
