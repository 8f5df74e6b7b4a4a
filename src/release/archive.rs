// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Zip archive of a finished release directory

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write `<release_dir>.zip` next to the release directory
///
/// Entry names are relative to the release root and use `/` separators.
pub fn write_archive(release_dir: &Path) -> Result<PathBuf> {
    let archive_path = release_dir.with_extension("zip");
    let file = File::create(&archive_path)
        .with_context(|| format!("Failed to create archive: {:?}", archive_path))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(release_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let relative = path.strip_prefix(release_dir)?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut buf = Vec::new();
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut buf))
                .with_context(|| format!("Failed to read {:?}", path))?;
            zip.write_all(&buf)?;
        }
    }

    zip.finish().context("Failed to finish archive")?;
    Ok(archive_path)
}
