use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref RESOURCE: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

/// Cache key identifying a logical resource, rendered as `<resource>:<id>`
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey {
    resource: String,
    id: String,
}

impl CacheKey {
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Generate a cache key for a filtered list query.
    ///
    /// The id is a hash of the sorted parameters, so the order in which the
    /// caller lists them does not matter.
    pub fn from_query<I, N, V>(resource: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_string(), value.as_ref().to_string()))
            .collect();
        pairs.sort();

        // Length prefixes keep `a=b` from colliding with `a` + `=b`.
        let mut hasher = Sha256::new();
        for (name, value) in &pairs {
            for part in [name, value] {
                hasher.update((part.len() as u64).to_be_bytes());
                hasher.update(part.as_bytes());
            }
        }

        Self::new(resource, hex::encode(hasher.finalize()))
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.id)
    }
}

impl FromStr for CacheKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| Error::InvalidKey {
            key: s.to_string(),
            reason,
        };

        let (resource, id) = s.split_once(':').ok_or_else(|| invalid("missing `:`"))?;
        if !RESOURCE.is_match(resource) {
            return Err(invalid("resource must be lowercase alphanumeric"));
        }
        if id.is_empty() {
            return Err(invalid("empty id"));
        }

        Ok(Self::new(resource, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let key: CacheKey = "job:42".parse().unwrap();

        assert_eq!(key.resource(), "job");
        assert_eq!(key.id(), "42");
        assert_eq!(key.to_string(), "job:42");
        assert_eq!(key, CacheKey::new("job", "42"));
    }

    #[test]
    fn test_id_may_contain_separator() {
        let key: CacheKey = "invoice:2024:17".parse().unwrap();

        assert_eq!(key.resource(), "invoice");
        assert_eq!(key.id(), "2024:17");
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for raw in ["job", ":42", "Job:42", "job-line:1", "job:"] {
            assert!(
                matches!(raw.parse::<CacheKey>(), Err(Error::InvalidKey { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_query_key_ignores_parameter_order() {
        let key1 = CacheKey::from_query("jobs", [("status", "open"), ("client", "7")]);
        let key2 = CacheKey::from_query("jobs", [("client", "7"), ("status", "open")]);
        let key3 = CacheKey::from_query("jobs", [("status", "closed"), ("client", "7")]);

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_eq!(key1.resource(), "jobs");
        assert_eq!(key1.id().len(), 64);
    }

    #[test]
    fn test_query_key_separators_do_not_collide() {
        assert_ne!(
            CacheKey::from_query("jobs", [("status", "open=x")]),
            CacheKey::from_query("jobs", [("status=open", "x")])
        );
        assert_ne!(
            CacheKey::from_query("jobs", [("status", "open\nclient=7")]),
            CacheKey::from_query("jobs", [("status", "open"), ("client", "7")])
        );
        assert_ne!(
            CacheKey::from_query("jobs", [("status", "")]),
            CacheKey::from_query("jobs", Vec::<(&str, &str)>::new())
        );
    }
}
