//! Archive extraction for downloaded dataset files.
//!
//! Format dispatch is by file-name suffix. Extraction always targets the
//! archive's parent directory, and the archive is deleted afterwards unless
//! retention is requested or the input was already plain text.

use crate::{Result, YeastkernError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Archive format inferred from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    /// Gzip-compressed tarball (`.tar.gz` / `.tgz`).
    TarGz,
    /// Single-stream gzip; decompresses into a sibling file with the
    /// `.gz` suffix stripped.
    Gzip,
    /// Plain text, nothing to extract.
    PlainText,
    /// Fallback: plain tar.
    Tar,
}

impl ArchiveFormat {
    /// Infer the format from the file name suffix.
    ///
    /// Compressed tarballs are matched before bare `.gz` so they reach the
    /// tar layer instead of the single-stream branch.
    pub fn detect(path: &Path) -> Self {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else if name.ends_with(".zip") {
            ArchiveFormat::Zip
        } else if name.ends_with(".gz") {
            ArchiveFormat::Gzip
        } else if name.ends_with(".txt") {
            ArchiveFormat::PlainText
        } else {
            ArchiveFormat::Tar
        }
    }
}

/// Extract an archive into its parent directory.
///
/// On success the source archive is deleted when `delete_after` is set,
/// except for plain-text inputs, which are left untouched. Extraction-layer
/// faults surface as [`YeastkernError::Extraction`]; retrying is the
/// caller's decision.
pub fn extract(path: &Path, delete_after: bool) -> Result<()> {
    info!("Extracting data from {} ...", path.display());

    let dest_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    match ArchiveFormat::detect(path) {
        ArchiveFormat::PlainText => {
            debug!("{} is plain text, nothing to extract", path.display());
            return Ok(());
        }
        ArchiveFormat::Zip => extract_zip(path, &dest_dir)?,
        ArchiveFormat::TarGz => extract_tar_gz(path, &dest_dir)?,
        ArchiveFormat::Gzip => gunzip_to_sibling(path)?,
        ArchiveFormat::Tar => extract_tar(path, &dest_dir)?,
    }

    if delete_after {
        std::fs::remove_file(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    }

    info!("   ...done.");
    Ok(())
}

fn extraction_error(path: &Path, message: impl std::fmt::Display) -> YeastkernError {
    YeastkernError::Extraction {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn extract_zip(path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| extraction_error(path, format!("Invalid zip archive: {}", e)))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| extraction_error(path, format!("Failed to read zip entry {}: {}", i, e)))?;

        // Entries escaping the destination are skipped, not extracted.
        let outpath = match entry.enclosed_name() {
            Some(name) => dest_dir.join(name),
            None => continue,
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)
                .map_err(|e| YeastkernError::io_with_path(e, &outpath))?;
        } else {
            if let Some(parent) = outpath.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| YeastkernError::io_with_path(e, parent))?;
                }
            }
            let mut outfile =
                File::create(&outpath).map_err(|e| YeastkernError::io_with_path(e, &outpath))?;
            std::io::copy(&mut entry, &mut outfile)
                .map_err(|e| extraction_error(path, format!("Failed to extract entry: {}", e)))?;
        }
    }

    Ok(())
}

fn extract_tar_gz(path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    archive
        .unpack(dest_dir)
        .map_err(|e| extraction_error(path, format!("Failed to extract tarball: {}", e)))
}

fn extract_tar(path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    let mut archive = tar::Archive::new(BufReader::new(file));
    archive
        .unpack(dest_dir)
        .map_err(|e| extraction_error(path, format!("Failed to extract tar archive: {}", e)))
}

/// Decompress a single-stream gzip file into a sibling with the `.gz`
/// suffix stripped.
fn gunzip_to_sibling(path: &Path) -> Result<()> {
    let target = path.with_extension("");
    let file = File::open(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    let mut decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    let out = File::create(&target).map_err(|e| YeastkernError::io_with_path(e, &target))?;
    let mut writer = BufWriter::new(out);
    std::io::copy(&mut decoder, &mut writer)
        .map_err(|e| extraction_error(path, format!("Failed to decompress gzip stream: {}", e)))?;
    writer
        .flush()
        .map_err(|e| YeastkernError::io_with_path(e, &target))
}
