//! Shared fixture loader for sidewind integration tests.
//!
//! Fixtures live under the repository-root `fixtures/` directory and are
//! indexed by `fixtures/manifest.json`; tests address them by logical name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    strips: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// Logical names of all strip fixtures, sorted for stable iteration.
pub fn strip_names() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.strips.keys().cloned().collect();
    names.sort();
    names
}

/// Raw JSON text of a strip fixture by logical name.
pub fn strip_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .strips
        .get(name)
        .ok_or_else(|| anyhow!("unknown strip fixture '{name}'"))?;
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path).with_context(|| format!("reading strip fixture {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_names_resolve() {
        let names = strip_names();
        assert!(!names.is_empty());
        for name in names {
            let json = strip_json(&name).expect("fixture should read");
            assert!(json.contains("prototypes"), "{name} looks like a strip");
        }
    }
}
