//! All-or-nothing GeoJSON output.
//!
//! The collection is serialized into a temp file next to the destination and
//! renamed into place only after the whole document has been written, so a
//! failed run never leaves a truncated artifact behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{ConversionError, Result};
use crate::geojson::CurrentFeatureCollection;

/// Unix permission bits of the written asset.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Serialize a collection as pretty-printed JSON into `writer`.
pub fn write_pretty<W: Write>(collection: &CurrentFeatureCollection, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, collection)?;
    Ok(())
}

/// Write a collection to `path`, creating parent directories as needed.
///
/// Returns the number of bytes written.
pub fn write_feature_collection(collection: &CurrentFeatureCollection, path: &Path) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_pretty(collection, &mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    // Temp files are created owner-only; the published asset is world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))?;
    }

    let bytes = temp.as_file().metadata()?.len();
    temp.persist(path)
        .map_err(|e| ConversionError::Output(e.error))?;

    debug!(path = %path.display(), bytes = bytes, "Persisted GeoJSON output");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::CurrentFeature;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src").join("assets").join("test_currents.geojson");

        let fc = CurrentFeatureCollection::new().with_feature(CurrentFeature::new(10.0, 5.0, 1.0, 0.0));
        let bytes = write_feature_collection(&fc, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.len() as u64, bytes);
        let back: CurrentFeatureCollection = serde_json::from_str(&text).unwrap();
        assert_eq!(back, fc);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.geojson");
        write_feature_collection(&CurrentFeatureCollection::new(), &path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.geojson");
        std::fs::write(&path, "stale").unwrap();

        write_feature_collection(&CurrentFeatureCollection::new(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("FeatureCollection"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.geojson");
        write_feature_collection(&CurrentFeatureCollection::new(), &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_pretty_indentation() {
        let mut buf = Vec::new();
        write_pretty(&CurrentFeatureCollection::new(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\n  \"type\": \"FeatureCollection\",\n  \"features\": []\n}");
    }
}
