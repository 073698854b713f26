//! File pipeline: encrypt, decrypt, verify.
//!
//! ```text
//! raw ──encode──► encrypted + metadata ──decode──► decrypted ──compare──► raw
//! ```
//!
//! Each artifact is UTF-8 text. The metadata file holds one digit `0`-`4`
//! per ciphertext character. Outputs are staged next to their destination
//! and renamed into place only once every output of a step is written, so a
//! failed step leaves none of its outputs behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use crate::cipher::{Encoded, MetaShift, ShiftKey};
use crate::class::CharClass;
use crate::config::{ArtifactPaths, PipelineConfig};
use crate::error::PipelineError;
use crate::verify::{compare_files, MatchResult};

/// Summary of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Files read and written.
    pub paths: ArtifactPaths,
    /// Number of characters in the plaintext.
    pub characters: usize,
    /// Metadata tag counts, indexed by tag value.
    pub class_counts: [usize; 5],
    /// Comparison of the decrypted file against the raw file.
    pub verification: MatchResult,
}

fn read_text(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))
}

/// Sibling path an output is written to before it is renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes every `(path, text)` pair, or none of them.
///
/// All texts go to staging files first. If any staging write or rename
/// fails, staged files and outputs already renamed are removed.
fn commit_outputs(outputs: &[(&Path, &str)]) -> Result<(), PipelineError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for &(path, text) in outputs {
        let tmp = staging_path(path);
        if let Err(e) = fs::write(&tmp, text) {
            let _ = fs::remove_file(&tmp);
            for (pending, _) in &staged {
                let _ = fs::remove_file(pending);
            }
            return Err(PipelineError::io(path, e));
        }
        staged.push((tmp, path));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            for (_, done) in &staged[..i] {
                let _ = fs::remove_file(done);
            }
            for (pending, _) in &staged[i..] {
                let _ = fs::remove_file(pending);
            }
            return Err(PipelineError::io(*path, e));
        }
    }
    Ok(())
}

/// Removes a single trailing line ending an editor may have appended.
fn trim_metadata(metadata: &str) -> &str {
    metadata
        .strip_suffix("\r\n")
        .or_else(|| metadata.strip_suffix('\n'))
        .unwrap_or(metadata)
}

/// Encrypts `raw` into `encrypted` and `metadata`.
///
/// # Errors
/// - [`PipelineError::MissingInput`] if `raw` does not exist.
/// - [`PipelineError::Io`] if a read or write fails. Neither output is
///   left on disk in that case.
pub fn encrypt_file(
    raw: &Path,
    encrypted: &Path,
    metadata: &Path,
    key: ShiftKey,
) -> Result<Encoded, PipelineError> {
    if !raw.exists() {
        return Err(PipelineError::MissingInput(raw.to_path_buf()));
    }
    let text = read_text(raw)?;
    let encoded = MetaShift::new(key).encode(&text);

    commit_outputs(&[
        (encrypted, encoded.ciphertext.as_str()),
        (metadata, encoded.metadata.as_str()),
    ])?;
    info!(path = %encrypted.display(), "wrote ciphertext");
    info!(path = %metadata.display(), "wrote metadata");

    Ok(encoded)
}

/// Decrypts `encrypted` using `metadata` and writes the result to `decrypted`.
///
/// # Errors
/// - [`PipelineError::Io`] if a read or write fails.
/// - [`PipelineError::Codec`] if the codec rejects the artifacts; the
///   output file is not created in that case.
pub fn decrypt_file(
    encrypted: &Path,
    metadata: &Path,
    decrypted: &Path,
    key: ShiftKey,
) -> Result<String, PipelineError> {
    let ciphertext = read_text(encrypted)?;
    let meta = read_text(metadata)?;
    let plaintext = MetaShift::new(key).decode(&ciphertext, trim_metadata(&meta))?;

    commit_outputs(&[(decrypted, plaintext.as_str())])?;
    info!(path = %decrypted.display(), "wrote decrypted text");
    Ok(plaintext)
}

/// Runs encrypt, decrypt and verify over the artifacts named by `config`.
///
/// Decryption reads back the files just written, so the on-disk artifacts
/// are what gets verified.
///
/// # Errors
/// Any error from [`encrypt_file`], [`decrypt_file`] or
/// [`compare_files`]. A verification mismatch is not an error; it is
/// reported in [`PipelineReport::verification`].
pub fn run(config: &PipelineConfig, key: ShiftKey) -> Result<PipelineReport, PipelineError> {
    let paths = config.paths();
    let span = info_span!("pipeline", dir = %config.work_dir.display());
    let _guard = span.enter();

    let encoded = encrypt_file(&paths.raw, &paths.encrypted, &paths.metadata, key)?;
    let class_counts = encoded.class_counts();
    for class in CharClass::ALL {
        debug!(class = %class, count = class_counts[class.index()], "tag count");
    }

    decrypt_file(&paths.encrypted, &paths.metadata, &paths.decrypted, key)?;

    let verification = compare_files(&paths.raw, &paths.decrypted)?;
    match verification {
        MatchResult::Equal => info!("decrypted text matches original"),
        MatchResult::DifferAt(index) => warn!(index, "decrypted text differs from original"),
    }

    Ok(PipelineReport {
        characters: encoded.metadata.chars().count(),
        class_counts,
        verification,
        paths,
    })
}
