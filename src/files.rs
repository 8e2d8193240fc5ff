// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON file persistence helpers.
//!
//! Paths are given without the `.json` extension, which is appended here.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

fn with_json_extension(path: &Path) -> PathBuf {
    let mut file = path.as_os_str().to_owned();
    file.push(".json");
    PathBuf::from(file)
}

/// `<path>-YYYY-MM-DD`, still without extension.
pub fn dated_file_name(path: impl AsRef<Path>, date: NaiveDate) -> PathBuf {
    let mut file = path.as_ref().as_os_str().to_owned();
    file.push(format!("-{}", date.format("%Y-%m-%d")));
    PathBuf::from(file)
}

/// Whether `<path>.json` exists.
pub fn json_file_exists(path: impl AsRef<Path>) -> bool {
    with_json_extension(path.as_ref()).exists()
}

/// Read `<path>.json` into `T`.
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = with_json_extension(path.as_ref());
    let contents = fs::read_to_string(&file)
        .map_err(|e| anyhow!("Error reading {}: {}", file.display(), e))?;
    serde_json::from_str(&contents).map_err(|e| anyhow!("Error reading {}: {}", file.display(), e))
}

/// Write `data` as 4-space indented JSON to `<path>.json`.
pub fn write_json_file<T: Serialize + ?Sized>(path: impl AsRef<Path>, data: &T) -> Result<()> {
    let file = with_json_extension(path.as_ref());
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Error writing {}: {}", file.display(), e))?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)
        .map_err(|e| anyhow!("Error writing {}: {}", file.display(), e))?;

    fs::write(&file, buf).map_err(|e| anyhow!("Error writing {}: {}", file.display(), e))?;
    debug!("Wrote {}", file.display());
    Ok(())
}

/// Write `data` to `<path>-YYYY-MM-DD.json` using today's local date.
pub fn write_json_file_with_date<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<()> {
    write_json_file(dated_file_name(path, Local::now().date_naive()), data)
}
