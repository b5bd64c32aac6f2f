//! Numbered level files with a sha256 hash chain.
//!
//! A store directory holds:
//! ```text
//! store.meta.json              - format version and level count
//! levels/000001.level.cbor.zst - one compressed CBOR file per saved level
//! integrity/manifest.json      - per-level digests, each linked to the previous one
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use levelgen_kernel::World;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// On-disk format version written to `store.meta.json`.
const LEVEL_SCHEMA_VERSION: u32 = 1;
const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("level store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode level: {0}")]
    CborEncode(String),
    #[error("could not decode level: {0}")]
    CborDecode(String),
    #[error("bad store metadata: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level data mismatch: recorded {expected}, found {actual}")]
    IntegrityMismatch { expected: String, actual: String },
    #[error("store format v{file_version} cannot be read (this build reads v{expected_version})")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("the store holds no levels")]
    NoLevels,
    #[error("level #{0} is not in the store")]
    LevelNotFound(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub schema_version: u32,
    pub level_count: u32,
}

/// Manifest record for one saved level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    /// Digest of the compressed file.
    pub sha256: String,
    /// Digest of the level saved just before this one.
    pub prev_hash: Option<String>,
    pub seed: u32,
    /// `World::state_hash` at save time, checked again after decoding.
    pub state_hash: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrityManifest {
    pub entries: Vec<ManifestEntry>,
}

impl IntegrityManifest {
    fn entry(&self, filename: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    fn head(&self) -> Option<&str> {
        self.entries.last().map(|e| e.sha256.as_str())
    }
}

/// Append-only store of generated levels.
///
/// Every read is checked against the manifest; a level whose file or content
/// no longer matches its record is refused.
pub struct LevelStore {
    root: PathBuf,
    meta: StoreMeta,
    manifest: IntegrityManifest,
}

impl LevelStore {
    /// Open the store in `path`, creating an empty one if none exists yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        for dir in ["levels", "integrity"] {
            std::fs::create_dir_all(root.join(dir))?;
        }

        let store = if root.join("store.meta.json").exists() {
            let meta: StoreMeta = read_json(&root.join("store.meta.json"))?;
            if meta.schema_version != LEVEL_SCHEMA_VERSION {
                return Err(StoreError::SchemaMismatch {
                    file_version: meta.schema_version,
                    expected_version: LEVEL_SCHEMA_VERSION,
                });
            }
            let manifest_path = manifest_path(&root);
            let manifest = if manifest_path.exists() {
                read_json(&manifest_path)?
            } else {
                IntegrityManifest::default()
            };
            Self {
                root,
                meta,
                manifest,
            }
        } else {
            let store = Self {
                root,
                meta: StoreMeta {
                    schema_version: LEVEL_SCHEMA_VERSION,
                    level_count: 0,
                },
                manifest: IntegrityManifest::default(),
            };
            store.flush()?;
            store
        };
        tracing::debug!(root = %store.root.display(), levels = store.meta.level_count, "level store opened");
        Ok(store)
    }

    /// Save `world` as the next level and return its 1-based number.
    pub fn save_level(&mut self, world: &World) -> Result<u32, StoreError> {
        let index = self.meta.level_count + 1;
        let filename = level_filename(index);
        let bytes = encode_level(world)?;
        std::fs::write(self.level_path(&filename), &bytes)?;

        let entry = ManifestEntry {
            sha256: digest_hex(&bytes),
            prev_hash: self.manifest.head().map(str::to_owned),
            filename,
            seed: world.seed(),
            state_hash: world.state_hash(),
        };
        self.manifest.entries.push(entry);
        self.meta.level_count = index;
        self.flush()?;

        tracing::debug!(index, seed = world.seed(), bytes = bytes.len(), "level saved");
        Ok(index)
    }

    /// Load level number `index`.
    pub fn load_level(&self, index: u32) -> Result<World, StoreError> {
        let filename = level_filename(index);
        let entry = self
            .manifest
            .entry(&filename)
            .ok_or(StoreError::LevelNotFound(index))?;

        let bytes = std::fs::read(self.level_path(&filename))?;
        check_digest(entry, &bytes)?;
        let world = decode_level(&bytes)?;
        if world.state_hash() != entry.state_hash {
            return Err(StoreError::IntegrityMismatch {
                expected: format!("{:#x}", entry.state_hash),
                actual: format!("{:#x}", world.state_hash()),
            });
        }
        Ok(world)
    }

    pub fn load_latest(&self) -> Result<World, StoreError> {
        match self.meta.level_count {
            0 => Err(StoreError::NoLevels),
            latest => self.load_level(latest),
        }
    }

    /// Re-hash every level file and check that the manifest chain is unbroken.
    pub fn verify_integrity(&self) -> Result<(), StoreError> {
        let none = || "none".to_string();
        let mut prev: Option<&str> = None;
        for entry in &self.manifest.entries {
            if entry.prev_hash.as_deref() != prev {
                return Err(StoreError::IntegrityMismatch {
                    expected: prev.map_or_else(none, str::to_owned),
                    actual: entry.prev_hash.clone().unwrap_or_else(none),
                });
            }
            check_digest(entry, &std::fs::read(self.level_path(&entry.filename))?)?;
            prev = Some(entry.sha256.as_str());
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta(&self) -> &StoreMeta {
        &self.meta
    }

    pub fn manifest(&self) -> &IntegrityManifest {
        &self.manifest
    }

    fn level_path(&self, filename: &str) -> PathBuf {
        self.root.join("levels").join(filename)
    }

    /// Write metadata and manifest back to disk.
    fn flush(&self) -> Result<(), StoreError> {
        write_json(&self.root.join("store.meta.json"), &self.meta)?;
        write_json(&manifest_path(&self.root), &self.manifest)
    }
}

fn level_filename(index: u32) -> String {
    format!("{index:06}.level.cbor.zst")
}

fn manifest_path(root: &Path) -> PathBuf {
    root.join("integrity").join("manifest.json")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(())
}

fn check_digest(entry: &ManifestEntry, bytes: &[u8]) -> Result<(), StoreError> {
    let actual = digest_hex(bytes);
    if actual == entry.sha256 {
        Ok(())
    } else {
        Err(StoreError::IntegrityMismatch {
            expected: entry.sha256.clone(),
            actual,
        })
    }
}

/// CBOR-encode a level without compression.
pub(crate) fn level_cbor(world: &World) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(world, &mut buf).map_err(|e| StoreError::CborEncode(e.to_string()))?;
    Ok(buf)
}

fn encode_level(world: &World) -> Result<Vec<u8>, StoreError> {
    Ok(zstd::encode_all(level_cbor(world)?.as_slice(), ZSTD_LEVEL)?)
}

fn decode_level(bytes: &[u8]) -> Result<World, StoreError> {
    let cbor = zstd::decode_all(bytes)?;
    ciborium::from_reader(cbor.as_slice()).map_err(|e| StoreError::CborDecode(e.to_string()))
}

/// Lowercase hex sha256.
pub(crate) fn digest_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(seed: u32) -> World {
        levelgen_generate::generate_world_with_seed(seed).unwrap()
    }

    #[test]
    fn store_open_creates_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LevelStore::open(tmp.path().join("levels_data")).unwrap();
        assert_eq!(store.meta().level_count, 0);
        assert!(store.root().join("levels").is_dir());
        assert!(store.root().join("integrity").is_dir());
        assert_eq!(store.meta().schema_version, LEVEL_SCHEMA_VERSION);
    }

    #[test]
    fn store_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("levels_data");
        let world = level(1);

        let mut store = LevelStore::open(&path).unwrap();
        assert_eq!(store.save_level(&world).unwrap(), 1);

        let store2 = LevelStore::open(&path).unwrap();
        assert_eq!(store2.meta().level_count, 1);
        let loaded = store2.load_latest().unwrap();
        assert_eq!(loaded.state_hash(), world.state_hash());
        assert_eq!(loaded, world);
    }

    #[test]
    fn store_keeps_every_level() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = LevelStore::open(tmp.path()).unwrap();
        let a = level(2);
        let b = level(3);
        store.save_level(&a).unwrap();
        store.save_level(&b).unwrap();
        assert_eq!(store.load_level(1).unwrap().seed(), 2);
        assert_eq!(store.load_level(2).unwrap().seed(), 3);
        assert_eq!(store.manifest().entries.len(), 2);
        assert_eq!(
            store.manifest().entries[1].prev_hash.as_deref(),
            Some(store.manifest().entries[0].sha256.as_str())
        );
        store.verify_integrity().unwrap();
    }

    #[test]
    fn empty_store_has_no_latest() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LevelStore::open(tmp.path()).unwrap();
        assert!(matches!(store.load_latest(), Err(StoreError::NoLevels)));
        assert!(matches!(
            store.load_level(4),
            Err(StoreError::LevelNotFound(4))
        ));
    }

    #[test]
    fn store_integrity_fail_closed_on_corruption() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("levels_data");
        let mut store = LevelStore::open(&path).unwrap();
        store.save_level(&level(0)).unwrap();

        let level_path = path.join("levels").join("000001.level.cbor.zst");
        let mut data = std::fs::read(&level_path).unwrap();
        if let Some(byte) = data.last_mut() {
            *byte ^= 0xff;
        }
        std::fs::write(&level_path, &data).unwrap();

        let store2 = LevelStore::open(&path).unwrap();
        assert!(store2.verify_integrity().is_err());
        assert!(matches!(
            store2.load_level(1),
            Err(StoreError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn broken_chain_fails_verification() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("levels_data");
        let mut store = LevelStore::open(&path).unwrap();
        store.save_level(&level(0)).unwrap();
        store.save_level(&level(1)).unwrap();

        let manifest_file = path.join("integrity").join("manifest.json");
        let mut manifest: IntegrityManifest =
            serde_json::from_reader(std::fs::File::open(&manifest_file).unwrap()).unwrap();
        manifest.entries[1].prev_hash = None;
        serde_json::to_writer_pretty(std::fs::File::create(&manifest_file).unwrap(), &manifest)
            .unwrap();

        let reopened = LevelStore::open(&path).unwrap();
        assert!(matches!(
            reopened.verify_integrity(),
            Err(StoreError::IntegrityMismatch { .. })
        ));
        // Each file still matches its own digest.
        assert_eq!(reopened.load_level(2).unwrap().seed(), 1);
    }

    #[test]
    fn schema_mismatch_fail_closed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("levels_data");
        let _store = LevelStore::open(&path).unwrap();

        let meta_path = path.join("store.meta.json");
        let mut meta: StoreMeta =
            serde_json::from_reader(std::fs::File::open(&meta_path).unwrap()).unwrap();
        meta.schema_version = 999;
        serde_json::to_writer_pretty(std::fs::File::create(&meta_path).unwrap(), &meta).unwrap();

        match LevelStore::open(&path) {
            Err(StoreError::SchemaMismatch {
                file_version,
                expected_version,
            }) => {
                assert_eq!(file_version, 999);
                assert_eq!(expected_version, LEVEL_SCHEMA_VERSION);
            }
            Err(e) => panic!("expected SchemaMismatch, got: {e}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }
}
