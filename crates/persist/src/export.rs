use std::io::Write;
use std::path::Path;

use levelgen_kernel::World;
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, digest_hex, level_cbor};

const EXPORT_SCHEMA_VERSION: u32 = 1;

/// On-disk shape of a JSON level export.
#[derive(Serialize, Deserialize)]
struct LevelExport {
    schema_version: u32,
    state_hash: u64,
    world: World,
}

/// Write a level as pretty-printed JSON for external tools.
pub fn export_json(world: &World, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let export = LevelExport {
        schema_version: EXPORT_SCHEMA_VERSION,
        state_hash: world.state_hash(),
        world: world.clone(),
    };
    let mut file = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut file, &export)?;
    file.flush()?;
    tracing::debug!(path = %path.as_ref().display(), "level exported");
    Ok(())
}

/// Read a level written by [`export_json`], rejecting edited or foreign files.
pub fn import_json(path: impl AsRef<Path>) -> Result<World, StoreError> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    let export: LevelExport = serde_json::from_reader(file)?;
    if export.schema_version != EXPORT_SCHEMA_VERSION {
        return Err(StoreError::SchemaMismatch {
            file_version: export.schema_version,
            expected_version: EXPORT_SCHEMA_VERSION,
        });
    }
    let actual = export.world.state_hash();
    if actual != export.state_hash {
        return Err(StoreError::IntegrityMismatch {
            expected: format!("{:#x}", export.state_hash),
            actual: format!("{actual:#x}"),
        });
    }
    Ok(export.world)
}

/// sha256 of the level's CBOR encoding, as lowercase hex.
pub fn fingerprint(world: &World) -> Result<String, StoreError> {
    Ok(digest_hex(&level_cbor(world)?))
}
