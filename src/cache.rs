//! Copy cache for incremental site builds.
//!
//! Pictures are copied verbatim into the output — no resizing, no
//! re-encoding — so the only work worth skipping is the copy itself when a
//! source file hasn't changed since the last run.
//!
//! # Design
//!
//! The cache is content-addressed: the manifest maps output-relative paths to
//! the SHA-256 of the source file that produced them. Content hashes rather
//! than mtimes, so the cache survives `git checkout` (which resets
//! modification times).
//!
//! A cache hit requires:
//! 1. An entry for the output path with a matching source hash
//! 2. The output file still existing on disk
//!
//! The manifest is a JSON file in the cache directory. A missing, corrupt,
//! or version-mismatched manifest loads as empty and every picture is copied
//! again — the worst case is a full copy, never a wrong site.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the manifest file within the cache directory.
const MANIFEST_FILENAME: &str = "copy-manifest.json";

/// Bump to invalidate all existing caches when the format changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk manifest mapping output-relative paths to source content hashes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CopyCache {
    pub version: u32,
    pub entries: HashMap<String, String>,
}

impl CopyCache {
    /// Create an empty cache (first build, or cache dir wiped).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the cache directory, falling back to empty on any failure.
    pub fn load(cache_dir: &Path) -> Self {
        let path = cache_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let cache: Self = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        if cache.version != MANIFEST_VERSION {
            return Self::empty();
        }
        cache
    }

    /// Save to the cache directory, creating it if needed.
    pub fn save(&self, cache_dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(cache_dir)?;
        let path = cache_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Whether the output at `output_rel` is already a copy of the source
    /// with hash `source_hash`.
    pub fn is_fresh(&self, output_rel: &str, source_hash: &str, output_dir: &Path) -> bool {
        match self.entries.get(output_rel) {
            Some(stored) => stored == source_hash && output_dir.join(output_rel).exists(),
            None => false,
        }
    }

    /// Record that `output_rel` now holds a copy of the source with `source_hash`.
    pub fn insert(&mut self, output_rel: String, source_hash: String) {
        self.entries.insert(output_rel, source_hash);
    }
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub copies: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn copy(&mut self) {
        self.copies += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.copies
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} copied ({} total)",
                self.hits,
                self.copies,
                self.total()
            )
        } else {
            write!(f, "{} copied", self.copies)
        }
    }
}
