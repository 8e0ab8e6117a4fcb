use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use zip::ZipArchive;

use crate::error::PennsieveError;

// Create-or-truncate binary write of a downloaded archive body. The handle
// is scoped to this function, so it is released on every exit path; a
// failed write may leave a partial file behind and is reported as such.
pub fn write_archive(destination: &Path, body: &[u8]) -> Result<u64, PennsieveError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(destination)
        .map_err(|err| PennsieveError::DownloadWrite {
            path: destination.to_path_buf(),
            message: err.to_string(),
        })?;
    file.write_all(body)
        .map_err(|err| PennsieveError::DownloadWrite {
            path: destination.to_path_buf(),
            message: err.to_string(),
        })?;
    Ok(body.len() as u64)
}

pub fn extract_zip(zip_path: &Path, target_dir: &Path) -> Result<(), PennsieveError> {
    let file = File::open(zip_path).map_err(|err| {
        PennsieveError::Filesystem(format!("open zip {}: {err}", zip_path.display()))
    })?;
    let mut archive =
        ZipArchive::new(file).map_err(|err| PennsieveError::Filesystem(err.to_string()))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
        let entry_path = match entry.enclosed_name() {
            Some(path) => target_dir.join(path),
            None => {
                return Err(PennsieveError::Filesystem(
                    "zip entry path traversal detected".to_string(),
                ));
            }
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&entry_path)
                .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
            continue;
        }

        if let Some(parent) = entry_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
        }
        let mut outfile = File::create(&entry_path)
            .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
        io::copy(&mut entry, &mut outfile)
            .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
    }
    Ok(())
}

pub fn validate_zip(zip_path: &Path) -> Result<(), PennsieveError> {
    let file = File::open(zip_path).map_err(|err| {
        PennsieveError::Filesystem(format!("open zip {}: {err}", zip_path.display()))
    })?;
    let mut archive =
        ZipArchive::new(file).map_err(|err| PennsieveError::Filesystem(err.to_string()))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        io::copy(&mut entry, &mut io::sink())
            .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
    }
    Ok(())
}

// Multi-file downloads are delivered gzip-compressed; a full read-through
// catches truncated or corrupt payloads.
pub fn validate_gzip(gz_path: &Path) -> Result<(), PennsieveError> {
    let file = File::open(gz_path).map_err(|err| {
        PennsieveError::Filesystem(format!("open archive {}: {err}", gz_path.display()))
    })?;
    let mut decoder = GzDecoder::new(file);
    io::copy(&mut decoder, &mut io::sink())
        .map_err(|err| PennsieveError::Filesystem(err.to_string()))?;
    Ok(())
}
