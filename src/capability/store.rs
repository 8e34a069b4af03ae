//! Capability store: read-only id → metadata lookup.
//!
//! Built once per invocation from all on-disk declarations. After load the
//! store is immutable and safe to share read-only across concurrent callers;
//! no composition operation retains cross-call state.

use crate::capability::metadata::CapabilityMetadata;
use crate::capability::{parser, validator};
use crate::error::LoadoutError;
use crate::types::{CapabilityId, Diagnostic};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// In-memory capability lookup, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CapabilityStore {
    records: BTreeMap<CapabilityId, CapabilityMetadata>,
}

impl CapabilityStore {
    /// Build a store from already-parsed records (tests, incremental loads).
    pub fn from_records(records: impl IntoIterator<Item = CapabilityMetadata>) -> Self {
        let mut store = Self::default();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert a record, replacing any previous record with the same id.
    pub fn insert(&mut self, record: CapabilityMetadata) -> Option<CapabilityMetadata> {
        self.records.insert(record.id.clone(), record)
    }

    /// Best-effort lookup; absence is ordinary data during bulk operations.
    pub fn get(&self, id: &CapabilityId) -> Option<&CapabilityMetadata> {
        self.records.get(id)
    }

    /// Explicit single-id lookup. The only point in the core that raises
    /// for a missing capability.
    pub fn get_metadata(&self, id: &CapabilityId) -> Result<&CapabilityMetadata, LoadoutError> {
        self.records
            .get(id)
            .ok_or_else(|| LoadoutError::CapabilityNotFound(id.clone()))
    }

    pub fn contains(&self, id: &CapabilityId) -> bool {
        self.records.contains_key(id)
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CapabilityMetadata> {
        self.records.values()
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &CapabilityId> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One declaration file that failed to load; the batch continues without it.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Outcome of a batch load: counts, hard per-file failures, and per-capability
/// semantic validation messages for the caller to surface.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub files_scanned: usize,
    pub loaded: usize,
    pub failures: Vec<LoadFailure>,
    pub messages: Vec<(CapabilityId, Vec<Diagnostic>)>,
}

impl LoadReport {
    /// Total warning count across all capabilities.
    pub fn warning_count(&self) -> usize {
        self.messages.iter().map(|(_, m)| m.len()).sum()
    }
}

/// Load every `*.yaml`/`*.yml` declaration under `dir` into a store.
///
/// Malformed declarations are skipped and reported in the [`LoadReport`];
/// loading never aborts on a single bad file. The semantic validation pass
/// runs once over the fully-populated store so cross-record checks (dangling
/// references, asymmetric conflicts) see every record.
pub fn load_dir(dir: &Path) -> Result<(CapabilityStore, LoadReport), LoadoutError> {
    if !dir.exists() {
        return Err(LoadoutError::ConfigError(format!(
            "capabilities directory not found: {}",
            dir.display()
        )));
    }

    let mut store = CapabilityStore::default();
    let mut report = LoadReport::default();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("failed to read directory entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_declaration(entry.path()) {
            continue;
        }
        report.files_scanned += 1;

        match parser::parse_file(entry.path()) {
            Ok(meta) => {
                debug!(id = %meta.id, file = %entry.path().display(), "loaded capability");
                if let Some(previous) = store.insert(meta) {
                    warn!(
                        id = %previous.id,
                        "duplicate capability declaration; later file wins"
                    );
                }
                report.loaded += 1;
            }
            Err(e) => {
                warn!(file = %entry.path().display(), "skipping declaration: {}", e);
                report.failures.push(LoadFailure {
                    file: entry.path().to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }

    report.messages = validator::validate_store(&store);
    info!(
        capabilities = store.len(),
        failures = report.failures.len(),
        warnings = report.warning_count(),
        "capability store loaded from {}",
        dir.display()
    );

    Ok((store, report))
}

fn is_declaration(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
