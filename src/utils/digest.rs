// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Checksums and STL inspection

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use stl_io::read_stl;

/// Calculate the SHA256 checksum of a file's bytes
pub fn file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read {:?}", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Facts about a generated STL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StlSummary {
    pub facets: usize,
    pub vertices: usize,
    pub sha256: String,
}

/// Parse an STL file and summarize it
pub fn inspect_stl(path: &Path) -> Result<StlSummary> {
    let mut file = File::open(path).context(format!("Failed to open STL file: {:?}", path))?;
    let stl = read_stl(&mut file).context("Failed to read STL file")?;

    Ok(StlSummary {
        facets: stl.faces.len(),
        vertices: stl.vertices.len(),
        sha256: file_sha256(path)?,
    })
}
