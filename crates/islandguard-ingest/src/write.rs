// SPDX-License-Identifier: Apache-2.0

use crate::{IngestError, IngestErrorCode};
use islandguard_core::canonical;
use islandguard_model::ScoredRegion;
use std::fs;
use std::path::{Path, PathBuf};

pub const ARTIFACT_FILE_NAME: &str = "scored_regions.json";

#[derive(Debug, Clone)]
pub struct ScoredArtifact {
    pub path: PathBuf,
    pub sha256: String,
}

/// Persists the scored table as canonical (key-sorted) JSON with a sha256
/// sidecar, via a temp file and rename so readers never observe a partial
/// artifact.
pub fn write_scored_artifact(
    output_root: &Path,
    regions: &[ScoredRegion],
) -> Result<ScoredArtifact, IngestError> {
    fs::create_dir_all(output_root).map_err(|e| {
        IngestError::new(
            IngestErrorCode::Io,
            format!("failed to create {}: {e}", output_root.display()),
        )
    })?;

    let bytes = canonical::stable_json_bytes(&regions)
        .map_err(|e| IngestError::new(IngestErrorCode::Internal, e.to_string()))?;
    let sha256 = canonical::stable_hash_hex(&bytes);

    let path = output_root.join(ARTIFACT_FILE_NAME);
    let tmp = output_root.join(format!("{ARTIFACT_FILE_NAME}.tmp"));
    fs::write(&tmp, &bytes).map_err(|e| IngestError::new(IngestErrorCode::Io, e.to_string()))?;
    fs::rename(&tmp, &path).map_err(|e| IngestError::new(IngestErrorCode::Io, e.to_string()))?;

    let digest_path = output_root.join(format!("{ARTIFACT_FILE_NAME}.sha256"));
    fs::write(&digest_path, format!("{sha256}\n"))
        .map_err(|e| IngestError::new(IngestErrorCode::Io, e.to_string()))?;

    Ok(ScoredArtifact { path, sha256 })
}

#[cfg(test)]
mod tests {
    use super::write_scored_artifact;
    use islandguard_core::sha256_hex;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn artifact_digest_matches_the_written_bytes() {
        let tmp = tempdir().expect("tempdir");
        let artifact = write_scored_artifact(tmp.path(), &[]).expect("write artifact");
        let bytes = fs::read(&artifact.path).expect("read artifact");
        assert_eq!(sha256_hex(&bytes), artifact.sha256);
        let sidecar = fs::read_to_string(tmp.path().join("scored_regions.json.sha256"))
            .expect("read sidecar");
        assert_eq!(sidecar.trim(), artifact.sha256);
    }
}
