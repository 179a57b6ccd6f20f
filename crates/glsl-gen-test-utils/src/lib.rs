//! Shared code of `glsl-gen` crates for testing.
//!
//! Stage descriptions used by integration tests live as JSON files in the `fixtures`
//! directory of this crate, see [`fixture`].

use std::path::PathBuf;

use anyhow::Context as _;
use serde::de::DeserializeOwned;

/// Path to the directory holding the JSON fixtures.
#[inline]
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Reads the fixture `<name>.json` and deserializes it.
///
/// # Errors
///
/// Returns an error if the fixture does not exist or doesn't deserialize into `T`.
#[inline]
pub fn fixture<T>(name: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let path = fixtures_dir().join(format!("{name}.json"));
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing fixture {}", path.display()))
}
