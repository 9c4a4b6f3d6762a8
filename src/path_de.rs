//! Signature files, deserialized with JSON-path context in error messages.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;

use crate::ir::{Signature, SignatureFile};

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

pub fn signatures_from_str(src: &str) -> Result<Vec<Signature>> {
    Ok(from_str_with_path::<SignatureFile>(src)?.into_vec())
}

pub fn load_signatures(path: &Path) -> Result<Vec<Signature>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read signature file {}", path.display()))?;
    signatures_from_str(&source)
        .with_context(|| format!("failed to parse signature file {}", path.display()))
}
