use std::io::Write;

use assert_matches::assert_matches;
use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

use pennsieve_client::error::PennsieveError;
use pennsieve_client::fs_util::{extract_zip, validate_gzip, validate_zip, write_archive};

#[test]
fn write_archive_truncates_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.zip");
    std::fs::write(&path, b"previous content that was much longer").unwrap();

    let written = write_archive(&path, b"fresh").unwrap();
    assert_eq!(written, 5);
    assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
}

#[test]
fn write_archive_reports_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("bundle.zip");

    let err = write_archive(&path, b"payload").unwrap_err();
    assert_matches!(err, PennsieveError::DownloadWrite { .. });
}

#[test]
fn gzip_validation_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"row,value\n1,2\n").unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    validate_gzip(&path).unwrap();
}

#[test]
fn gzip_validation_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.gz");
    std::fs::write(&path, b"definitely not gzip").unwrap();

    assert_matches!(validate_gzip(&path), Err(PennsieveError::Filesystem(_)));
}

#[test]
fn zip_validation_and_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let zip_path = dir.path().join("bundle.zip");

    let file = std::fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("files/readings.csv", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"row,value\n1,2\n").unwrap();
    writer.finish().unwrap();

    validate_zip(&zip_path).unwrap();

    let target = dir.path().join("out");
    extract_zip(&zip_path, &target).unwrap();
    let extracted = std::fs::read(target.join("files/readings.csv")).unwrap();
    assert_eq!(extracted, b"row,value\n1,2\n");
}
