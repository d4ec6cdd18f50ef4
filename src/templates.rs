//! Per-service instruction snippets and matching against compose files

use std::fs;
use std::path::Path;
use log::{debug, trace};

/// Suffix stripped from snippet file names to get the service key
pub const TEMPLATE_SUFFIX: &str = ".md";

/// Snippets compiled into the binary, sorted by file name
const BUNDLED: &[(&str, &str)] = &[
    ("mongo.md", include_str!("../instructions/mongo.md")),
    ("mysql.md", include_str!("../instructions/mysql.md")),
    ("postgres.md", include_str!("../instructions/postgres.md")),
    ("redis.md", include_str!("../instructions/redis.md")),
];

/// A service key and the template text for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry
{   pub service_key: String
  , pub body: String
}

impl TemplateEntry
{   fn from_file_name(file_name: &str, body: String) -> Self
    {   let service_key = file_name
          .strip_suffix(TEMPLATE_SUFFIX)
          .unwrap_or(file_name)
          .to_string();
        TemplateEntry
        {   service_key
          , body
        }
    }
}

/// Read-only set of template entries, loaded once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateStore
{   entries: Vec<TemplateEntry>
}

impl TemplateStore
{   /// Store from explicit entries, kept in the given order
    pub fn new(entries: Vec<TemplateEntry>) -> Self
    {   TemplateStore { entries }
    }

    /// The snippets shipped with the binary
    pub fn bundled() -> Self
    {   let entries = BUNDLED
          .iter()
          .map(|(name, body)| {
            TemplateEntry::from_file_name(name, body.to_string())
          })
          .collect::<Vec<_>>();
        debug!("Loaded {} bundled templates", entries.len());
        TemplateStore { entries }
    }

    /// Load every `*.md` file in `dir`, ordered by file name
    pub fn from_dir(dir: &Path)
      -> Result<Self, crate::error::Error>
    {   debug!("Loading templates from {}", dir.display());
        let read_dir = fs::read_dir(dir).map_err(|e| {
          crate::error::Error::Io(format!(
            "error reading instructions directory {}: {}",
            dir.display(), e
          ))
        })?;

        let mut names = Vec::new();
        for entry in read_dir
        {   let entry = entry.map_err(|e| {
              crate::error::Error::Io(format!(
                "error reading instructions directory {}: {}",
                dir.display(), e
              ))
            })?;
            if !entry.path().is_file()
            {   continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(TEMPLATE_SUFFIX)
            {   names.push(name);
            }
        }
        names.sort();

        let mut entries = Vec::with_capacity(names.len());
        for name in names
        {   let body = fs::read_to_string(dir.join(&name)).map_err(|e| {
              crate::error::Error::Io(format!(
                "error reading template {}: {}", name, e
              ))
            })?;
            entries.push(TemplateEntry::from_file_name(&name, body));
        }

        debug!("Loaded {} templates from disk", entries.len());
        Ok(TemplateStore { entries })
    }

    pub fn entries(&self) -> &[TemplateEntry]
    {   &self.entries
    }

    pub fn len(&self) -> usize
    {   self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {   self.entries.is_empty()
    }

    /// Entries whose key occurs in the compose text, ignoring case.
    /// Store order is preserved.
    pub fn matching(&self, compose_text: &str) -> Vec<&TemplateEntry>
    {   let haystack = compose_text.to_lowercase();
        self.entries
          .iter()
          .filter(|entry| {
            let hit = haystack.contains(&entry.service_key.to_lowercase());
            trace!("Template {} matched: {}", entry.service_key, hit);
            hit
          })
          .collect()
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    fn entry(key: &str) -> TemplateEntry
    {   TemplateEntry
        {   service_key: key.to_string()
          , body: format!("{} body", key)
        }
    }

    #[test]
    fn bundled_keys_drop_suffix_and_stay_sorted()
    {   let store = TemplateStore::bundled();
        let keys: Vec<&str> = store.entries()
          .iter()
          .map(|e| e.service_key.as_str())
          .collect();
        assert_eq!(keys, vec!["mongo", "mysql", "postgres", "redis"]);
        assert!(store.entries().iter().all(|e| !e.body.is_empty()));
    }

    #[test]
    fn matching_ignores_case()
    {   let store = TemplateStore::new(vec![entry("redis"), entry("MySQL")]);
        let compose = "services:\n  cache:\n    image: REDIS:7\n  db:\n    image: mysql:8";
        let keys: Vec<&str> = store.matching(compose)
          .iter()
          .map(|e| e.service_key.as_str())
          .collect();
        assert_eq!(keys, vec!["redis", "MySQL"]);
    }

    #[test]
    fn matching_keeps_store_order_and_no_duplicates()
    {   let store = TemplateStore::new(vec![
          entry("postgres"), entry("mongo"), entry("redis")
        ]);
        let compose = "redis redis mongo postgres redis";
        let keys: Vec<&str> = store.matching(compose)
          .iter()
          .map(|e| e.service_key.as_str())
          .collect();
        assert_eq!(keys, vec!["postgres", "mongo", "redis"]);
    }

    #[test]
    fn unknown_services_match_nothing()
    {   let store = TemplateStore::bundled();
        assert!(store.matching("services:\n  web:\n    image: nginx").is_empty());
    }

    #[test]
    fn missing_directory_is_io_error()
    {   let err = TemplateStore::from_dir(Path::new("/definitely/not/here"))
          .unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
