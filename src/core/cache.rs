//! SQLite-backed entity cache for fast lookups
//!
//! A local cache that mirrors the catalog's YAML tree so search and list
//! commands don't re-parse every file:
//! - caches entity metadata (name, slug, description, category, stars)
//! - caches links and capability implementations for relationship queries
//! - auto-detects file changes via mtime + content hash and syncs
//!   incrementally
//!
//! IMPORTANT: The cache is user-local and gitignored. The YAML files remain
//! the source of truth; the cache can be deleted and rebuilt at any time.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use miette::{IntoDiagnostic, Result};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use crate::core::filter::matches_query;
use crate::core::identity::EntityPrefix;
use crate::core::project::Project;

/// Cache file location within a catalog
const CACHE_FILE: &str = ".osb/cache.db";

/// Current schema version - cache is rebuilt on version mismatch
const SCHEMA_VERSION: i32 = 1;

/// Cached entity metadata (common fields for all entity types)
#[derive(Debug, Clone)]
pub struct CachedEntity {
    pub id: String,
    pub prefix: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub author: String,
    pub created: String,
    pub stars: Option<i64>,
    pub file_path: String,
}

/// A cached link between two entities
#[derive(Debug, Clone)]
pub struct CachedLink {
    pub source_id: String,
    pub target_id: String,
    pub link_type: String,
}

/// Result of an incremental sync
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// The entity cache backed by SQLite
pub struct EntityCache {
    conn: Connection,
}

impl EntityCache {
    /// Open or create the cache for a catalog.
    ///
    /// The cache is created and populated on first open, and incrementally
    /// synced against the file tree on every open after that.
    pub fn open(project: &Project) -> Result<Self> {
        let cache_path = project.root().join(CACHE_FILE);

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }

        let conn = Connection::open(&cache_path).into_diagnostic()?;
        let mut cache = Self { conn };

        let version: Option<i32> = cache
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .optional()
            .into_diagnostic()?;

        if version != Some(SCHEMA_VERSION) {
            cache.reset_schema()?;
        }

        cache.sync(project)?;
        Ok(cache)
    }

    fn reset_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            DROP TABLE IF EXISTS entities;
            DROP TABLE IF EXISTS links;
            DROP TABLE IF EXISTS implementations;

            CREATE TABLE entities (
                id TEXT PRIMARY KEY,
                prefix TEXT NOT NULL,
                name TEXT NOT NULL,
                slug TEXT NOT NULL,
                description TEXT,
                category TEXT,
                status TEXT,
                author TEXT NOT NULL,
                created TEXT NOT NULL,
                stars INTEGER,
                file_path TEXT NOT NULL,
                file_mtime INTEGER NOT NULL,
                file_hash TEXT NOT NULL
            );
            CREATE INDEX idx_entities_prefix ON entities(prefix);
            CREATE INDEX idx_entities_slug ON entities(slug);
            CREATE INDEX idx_entities_file_path ON entities(file_path);

            CREATE TABLE links (
                source_id TEXT NOT NULL,
                target_id TEXT NOT NULL,
                link_type TEXT NOT NULL,
                PRIMARY KEY (source_id, target_id, link_type)
            );
            CREATE INDEX idx_links_target ON links(target_id);

            CREATE TABLE implementations (
                oss_id TEXT NOT NULL,
                cap_id TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                PRIMARY KEY (oss_id, cap_id)
            );
            CREATE INDEX idx_impl_cap ON implementations(cap_id);
            "#,
            )
            .into_diagnostic()?;

        self.conn
            .execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .into_diagnostic()?;

        Ok(())
    }

    /// Incrementally sync the cache against the catalog file tree
    pub fn sync(&mut self, project: &Project) -> Result<SyncStats> {
        let mut stats = SyncStats::default();

        // Snapshot cached file state
        let mut cached: HashMap<String, (String, i64, String)> = HashMap::new();
        {
            let mut stmt = self
                .conn
                .prepare("SELECT id, file_path, file_mtime, file_hash FROM entities")
                .into_diagnostic()?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        (row.get(1)?, row.get(2)?, row.get(3)?),
                    ))
                })
                .into_diagnostic()?;
            for row in rows {
                let (id, state) = row.into_diagnostic()?;
                cached.insert(id, state);
            }
        }

        let mut seen: Vec<String> = Vec::new();

        for prefix in EntityPrefix::all() {
            for path in project.iter_entity_files(*prefix) {
                let Ok(content) = fs::read_to_string(&path) else {
                    continue;
                };
                let Ok(value) = serde_yml::from_str::<serde_yml::Value>(&content) else {
                    continue;
                };
                let Some(id) = value.get("id").and_then(|v| v.as_str()).map(String::from) else {
                    continue;
                };

                seen.push(id.clone());

                let mtime = file_mtime(&path);
                if let Some((_, cached_mtime, cached_hash)) = cached.get(&id) {
                    if *cached_mtime == mtime {
                        stats.unchanged += 1;
                        continue;
                    }
                    let hash = content_hash(&content);
                    if *cached_hash == hash {
                        // mtime drifted (e.g., git checkout) but content is the same
                        self.conn
                            .execute(
                                "UPDATE entities SET file_mtime = ?1 WHERE id = ?2",
                                params![mtime, id],
                            )
                            .into_diagnostic()?;
                        stats.unchanged += 1;
                        continue;
                    }
                    self.upsert_entity(*prefix, &id, &value, &path, mtime, &hash)?;
                    stats.updated += 1;
                } else {
                    let hash = content_hash(&content);
                    self.upsert_entity(*prefix, &id, &value, &path, mtime, &hash)?;
                    stats.added += 1;
                }
            }
        }

        // Drop entities whose files disappeared
        for (id, _) in cached {
            if !seen.contains(&id) {
                self.delete_entity(&id)?;
                stats.removed += 1;
            }
        }

        Ok(stats)
    }

    fn upsert_entity(
        &mut self,
        prefix: EntityPrefix,
        id: &str,
        value: &serde_yml::Value,
        path: &std::path::Path,
        mtime: i64,
        hash: &str,
    ) -> Result<()> {
        let get_str = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);

        let name = get_str("name").unwrap_or_default();
        let slug = get_str("slug").unwrap_or_default();
        let stars = value.get("github_stars").and_then(|v| v.as_i64());
        let file_path = path.to_string_lossy().to_string();

        self.conn
            .execute(
                "INSERT OR REPLACE INTO entities
                 (id, prefix, name, slug, description, category, status, author, created, stars, file_path, file_mtime, file_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    id,
                    prefix.as_str(),
                    name,
                    slug,
                    get_str("description"),
                    get_str("category"),
                    get_str("status"),
                    get_str("author").unwrap_or_default(),
                    get_str("created").unwrap_or_default(),
                    stars,
                    file_path,
                    mtime,
                    hash,
                ],
            )
            .into_diagnostic()?;

        // Re-derive links and implementations for this entity
        self.conn
            .execute("DELETE FROM links WHERE source_id = ?1", params![id])
            .into_diagnostic()?;
        self.conn
            .execute("DELETE FROM implementations WHERE oss_id = ?1", params![id])
            .into_diagnostic()?;

        if let Some(links) = value.get("links").and_then(|v| v.as_mapping()) {
            for (link_type, targets) in links {
                let link_type = link_type.as_str();
                let Some(targets) = targets.as_sequence() else {
                    continue;
                };
                for target in targets {
                    if let Some(target_id) = target.as_str() {
                        self.conn
                            .execute(
                                "INSERT OR IGNORE INTO links (source_id, target_id, link_type)
                                 VALUES (?1, ?2, ?3)",
                                params![id, target_id, link_type],
                            )
                            .into_diagnostic()?;
                    }
                }
            }
        }

        if let Some(impls) = value.get("implementations").and_then(|v| v.as_sequence()) {
            for imp in impls {
                let Some(cap_id) = imp.get("capability").and_then(|v| v.as_str()) else {
                    continue;
                };
                let is_active = imp
                    .get("is_active")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true);
                self.conn
                    .execute(
                        "INSERT OR REPLACE INTO implementations (oss_id, cap_id, is_active)
                         VALUES (?1, ?2, ?3)",
                        params![id, cap_id, is_active],
                    )
                    .into_diagnostic()?;
            }
        }

        Ok(())
    }

    fn delete_entity(&mut self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM entities WHERE id = ?1", params![id])
            .into_diagnostic()?;
        self.conn
            .execute("DELETE FROM links WHERE source_id = ?1", params![id])
            .into_diagnostic()?;
        self.conn
            .execute("DELETE FROM implementations WHERE oss_id = ?1", params![id])
            .into_diagnostic()?;
        Ok(())
    }

    /// Get a single cached entity by full ID
    pub fn get_entity(&self, id: &str) -> Option<CachedEntity> {
        self.conn
            .query_row(
                "SELECT id, prefix, name, slug, description, category, status, author, created, stars, file_path
                 FROM entities WHERE id = ?1",
                params![id],
                row_to_entity,
            )
            .optional()
            .ok()
            .flatten()
    }

    /// All cached entities of a prefix, ordered by name
    pub fn list_by_prefix(&self, prefix: EntityPrefix) -> Vec<CachedEntity> {
        let Ok(mut stmt) = self.conn.prepare(
            "SELECT id, prefix, name, slug, description, category, status, author, created, stars, file_path
             FROM entities WHERE prefix = ?1 ORDER BY name COLLATE NOCASE",
        ) else {
            return Vec::new();
        };

        stmt.query_map(params![prefix.as_str()], row_to_entity)
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    /// Search every entity type with the shared substring filter.
    ///
    /// Structural filters run in SQL; the text match runs through
    /// `core::filter` so search behaves exactly like the list filters.
    #[allow(clippy::too_many_arguments)]
    pub fn search_all(
        &self,
        query: &str,
        type_prefixes: Option<&[&str]>,
        category: Option<&str>,
        author: Option<&str>,
        case_sensitive: bool,
        limit: usize,
    ) -> Vec<CachedEntity> {
        let Ok(mut stmt) = self.conn.prepare(
            "SELECT id, prefix, name, slug, description, category, status, author, created, stars, file_path
             FROM entities ORDER BY prefix, name COLLATE NOCASE",
        ) else {
            return Vec::new();
        };

        let Ok(rows) = stmt.query_map([], row_to_entity) else {
            return Vec::new();
        };

        rows.filter_map(|r| r.ok())
            .filter(|e| {
                type_prefixes
                    .map(|prefixes| prefixes.contains(&e.prefix.as_str()))
                    .unwrap_or(true)
            })
            .filter(|e| {
                category
                    .map(|c| {
                        e.category
                            .as_deref()
                            .is_some_and(|ec| ec.eq_ignore_ascii_case(c))
                    })
                    .unwrap_or(true)
            })
            .filter(|e| {
                author
                    .map(|a| e.author.to_lowercase().contains(&a.to_lowercase()))
                    .unwrap_or(true)
            })
            .filter(|e| {
                if case_sensitive {
                    let q = query.trim();
                    q.is_empty()
                        || e.name.contains(q)
                        || e.slug.contains(q)
                        || e.description.as_deref().is_some_and(|d| d.contains(q))
                } else {
                    matches_query(
                        query,
                        &[Some(&e.name), Some(&e.slug), e.description.as_deref()],
                    )
                }
            })
            .take(limit)
            .collect()
    }

    /// Incoming links: every entity that references `id`
    pub fn get_links_to(&self, id: &str) -> Vec<CachedLink> {
        let Ok(mut stmt) = self
            .conn
            .prepare("SELECT source_id, target_id, link_type FROM links WHERE target_id = ?1")
        else {
            return Vec::new();
        };

        stmt.query_map(params![id], |row| {
            Ok(CachedLink {
                source_id: row.get(0)?,
                target_id: row.get(1)?,
                link_type: row.get(2)?,
            })
        })
        .map(|rows| rows.filter_map(|r| r.ok()).collect())
        .unwrap_or_default()
    }

    /// Number of entities cached per prefix
    pub fn count_by_prefix(&self, prefix: EntityPrefix) -> usize {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM entities WHERE prefix = ?1",
                params![prefix.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .unwrap_or(0) as usize
    }

    /// Alternatives that implement a capability
    pub fn implementers_of(&self, cap_id: &str) -> Vec<String> {
        let Ok(mut stmt) = self
            .conn
            .prepare("SELECT oss_id FROM implementations WHERE cap_id = ?1")
        else {
            return Vec::new();
        };

        stmt.query_map(params![cap_id], |row| row.get::<_, String>(0))
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    /// Number of `alternatives` links declared by a proprietary app
    pub fn alternatives_count(&self, app_id: &str) -> usize {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM links WHERE source_id = ?1 AND link_type = 'alternatives'",
                params![app_id],
                |row| row.get::<_, i64>(0),
            )
            .unwrap_or(0) as usize
    }

    /// Number of active capability implementations on an alternative
    pub fn implementation_count(&self, oss_id: &str) -> usize {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM implementations WHERE oss_id = ?1 AND is_active = 1",
                params![oss_id],
                |row| row.get::<_, i64>(0),
            )
            .unwrap_or(0) as usize
    }

    /// Drop all cached data; the next sync repopulates from files
    pub fn clear(&mut self) -> Result<()> {
        self.conn
            .execute_batch("DELETE FROM entities; DELETE FROM links; DELETE FROM implementations;")
            .into_diagnostic()
    }

    /// Total number of cached entities
    pub fn total_entities(&self) -> usize {
        self.conn
            .query_row("SELECT COUNT(*) FROM entities", [], |row| {
                row.get::<_, i64>(0)
            })
            .unwrap_or(0) as usize
    }
}

fn row_to_entity(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedEntity> {
    Ok(CachedEntity {
        id: row.get(0)?,
        prefix: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        description: row.get(4)?,
        category: row.get(5)?,
        status: row.get(6)?,
        author: row.get(7)?,
        created: row.get(8)?,
        stars: row.get(9)?,
        file_path: row.get(10)?,
    })
}

fn file_mtime(path: &std::path::Path) -> i64 {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Path of the cache database within a catalog
pub fn cache_path(project: &Project) -> PathBuf {
    project.root().join(CACHE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Alternative, Capability, ProprietaryApp};
    use tempfile::tempdir;

    fn write_entity<T: serde::Serialize>(project: &Project, prefix: EntityPrefix, entity: &T, id: &str) {
        let path = project
            .entity_dir(prefix)
            .join(format!("{}.osb.yaml", id));
        fs::write(path, serde_yml::to_string(entity).unwrap()).unwrap();
    }

    fn seeded_project() -> (tempfile::TempDir, Project) {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let cap = Capability::new("Checkout".to_string(), "test".to_string());
        let mut alt = Alternative::new("Medusa".to_string(), "test".to_string());
        alt.github_stars = Some(24000);
        alt.implementations
            .push(crate::entities::CapabilityImplementation::new(cap.id.clone()));
        let mut app = ProprietaryApp::new("Shopify".to_string(), "test".to_string());
        app.description = Some("E-commerce platform".to_string());
        app.links.capabilities.push(cap.id.clone());
        app.links.alternatives.push(alt.id.clone());

        write_entity(&project, EntityPrefix::Cap, &cap, &cap.id.to_string());
        write_entity(&project, EntityPrefix::Oss, &alt, &alt.id.to_string());
        write_entity(&project, EntityPrefix::App, &app, &app.id.to_string());

        (tmp, project)
    }

    #[test]
    fn test_open_populates_cache() {
        let (_tmp, project) = seeded_project();
        let cache = EntityCache::open(&project).unwrap();

        assert_eq!(cache.total_entities(), 3);
        assert_eq!(cache.count_by_prefix(EntityPrefix::App), 1);
        assert_eq!(cache.count_by_prefix(EntityPrefix::Oss), 1);
        assert_eq!(cache.count_by_prefix(EntityPrefix::Cap), 1);
    }

    #[test]
    fn test_search_matches_description() {
        let (_tmp, project) = seeded_project();
        let cache = EntityCache::open(&project).unwrap();

        let results = cache.search_all("commerce", None, None, None, false, 50);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Shopify");
    }

    #[test]
    fn test_search_type_filter() {
        let (_tmp, project) = seeded_project();
        let cache = EntityCache::open(&project).unwrap();

        let results = cache.search_all("", Some(&["OSS"]), None, None, false, 50);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Medusa");
    }

    #[test]
    fn test_search_case_sensitive() {
        let (_tmp, project) = seeded_project();
        let cache = EntityCache::open(&project).unwrap();

        assert!(cache
            .search_all("shopify", None, None, None, true, 50)
            .is_empty());
        assert_eq!(
            cache.search_all("Shopify", None, None, None, true, 50).len(),
            1
        );
    }

    #[test]
    fn test_links_and_implementations_cached() {
        let (_tmp, project) = seeded_project();
        let cache = EntityCache::open(&project).unwrap();

        let apps = cache.list_by_prefix(EntityPrefix::App);
        let alts = cache.list_by_prefix(EntityPrefix::Oss);
        assert_eq!(cache.alternatives_count(&apps[0].id), 1);
        assert_eq!(cache.implementation_count(&alts[0].id), 1);

        let incoming = cache.get_links_to(&alts[0].id);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].link_type, "alternatives");
    }

    #[test]
    fn test_sync_removes_deleted_files() {
        let (_tmp, project) = seeded_project();
        {
            let _cache = EntityCache::open(&project).unwrap();
        }

        for path in project.iter_entity_files(EntityPrefix::Cap) {
            fs::remove_file(path).unwrap();
        }

        let cache = EntityCache::open(&project).unwrap();
        assert_eq!(cache.count_by_prefix(EntityPrefix::Cap), 0);
        assert_eq!(cache.total_entities(), 2);
    }
}
