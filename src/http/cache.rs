//! HTTP cache control module
//!
//! Builds `Cache-Control` values for responses that expire at a known instant.

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u64),
    /// No store
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoStore => "no-store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::Public(3600).to_header_value(),
            "public, max-age=3600"
        );
        assert_eq!(CachePolicy::Public(1).to_header_value(), "public, max-age=1");
        assert_eq!(CachePolicy::NoStore.to_header_value(), "no-store");
    }
}
