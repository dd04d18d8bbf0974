//! Stable save files.
//!
//! The working save is JSON in the snapshot shape. Backups are validated rkyv
//! archives of the same snapshot: compact, and checked byte-for-byte before a
//! restore replaces anything.

use crate::error::{IoError, Result};
use crate::json::{read_json_file, write_json_file};
use rkyv::de::deserializers::SharedDeserializeMap;
use rkyv::ser::serializers::AllocSerializer;
use rkyv::ser::Serializer;
use rkyv::Deserialize;
use std::path::Path;
use studbook_core::Stable;
use studbook_data::StableSnapshot;

pub fn save_stable<P: AsRef<Path>>(stable: &Stable, path: P) -> Result<()> {
    let path = path.as_ref();
    write_json_file(&stable.to_snapshot(), path)?;
    tracing::info!(
        path = %path.display(),
        horses = stable.total_horses(),
        "Saved stable"
    );
    Ok(())
}

/// Loads a stable. A missing file yields an empty default stable.
pub fn load_stable<P: AsRef<Path>>(path: P) -> Result<Stable> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No stable file, starting fresh");
        return Ok(Stable::default());
    }
    let snapshot: StableSnapshot =
        read_json_file(path).map_err(|e| e.with_context("loading stable"))?;
    Ok(Stable::from_snapshot(snapshot))
}

/// Writes the stable as an rkyv archive.
pub fn backup_stable<P: AsRef<Path>>(stable: &Stable, path: P) -> Result<()> {
    let path = path.as_ref();
    let snapshot = stable.to_snapshot();
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(&snapshot)
        .map_err(|e| IoError::Backup(format!("encoding failed: {e:?}")))?;
    let bytes = serializer.into_serializer().into_inner();
    std::fs::write(path, &bytes).map_err(|e| IoError::file("write", path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Stable backed up");
    Ok(())
}

/// Reads a backup written by [`backup_stable`], validating it first.
pub fn restore_stable<P: AsRef<Path>>(path: P) -> Result<Stable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| IoError::file("read", path, e))?;
    let archived = rkyv::check_archived_root::<StableSnapshot>(&bytes)
        .map_err(|e| IoError::Backup(format!("validation failed: {e:?}")))?;
    let snapshot: StableSnapshot = archived
        .deserialize(&mut SharedDeserializeMap::default())
        .map_err(|e| IoError::Backup(format!("decoding failed: {e:?}")))?;
    tracing::info!(path = %path.display(), "Stable restored from backup");
    Ok(Stable::from_snapshot(snapshot))
}
