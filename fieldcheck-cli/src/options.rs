//! Loading validator and sniffer options from disk.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read an options file. `.yaml` and `.yml` files are parsed as YAML,
/// anything else as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not deserialize into `T`.
pub fn load_options<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("invalid YAML in options file {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in options file {}", path.display()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fieldcheck::{CharClass, Format, PasswordOptions, SniffOptions};

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        std::fs::write(&path, r#"{"minLength": 10, "require": ["digit"]}"#).unwrap();

        let options: PasswordOptions = load_options(&path).unwrap();
        assert_eq!(options.min_length, Some(10));
        assert_eq!(options.require, vec![CharClass::Digit]);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sniff.yml");
        std::fs::write(&path, "exclude:\n  - gif\n  - jpg\n").unwrap();

        let options: SniffOptions = load_options(&path).unwrap();
        assert!(options.exclude.contains(Format::Gif));
        assert!(options.exclude.contains(Format::Jpeg));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        std::fs::write(&path, r#"{"minimum": 10}"#).unwrap();

        let err = load_options::<PasswordOptions>(&path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"), "got: {err}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_options::<SniffOptions>(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"), "got: {err}");
    }
}
