use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::schema::OverrideFile;

/// Load an [`OverrideFile`] from a YAML file on disk.
///
/// Validates the file after deserialization (version check, unique names).
pub fn load_overrides(path: impl AsRef<Path>) -> Result<OverrideFile> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read override file: {}", path.display()))?;
    load_overrides_from_str(&contents)
        .with_context(|| format!("failed to parse override file: {}", path.display()))
}

/// Parse and validate an [`OverrideFile`] from a YAML string.
pub fn load_overrides_from_str(yaml: &str) -> Result<OverrideFile> {
    let file: OverrideFile = serde_yml::from_str(yaml).context("YAML deserialization failed")?;
    validate(&file)?;
    Ok(file)
}

fn validate(file: &OverrideFile) -> Result<()> {
    if file.version != "1.0" {
        bail!(
            "unsupported override version '{}'; only '1.0' is supported",
            file.version
        );
    }

    let mut seen = HashSet::new();
    for tool in &file.tools {
        if tool.name.is_empty() {
            bail!("tool name must not be empty");
        }
        if !seen.insert(&tool.name) {
            bail!("duplicate tool name: '{}'", tool.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use std::io::Write;

    #[test]
    fn load_minimal_overrides() {
        let file = load_overrides_from_str("version: \"1.0\"\n").unwrap();
        assert!(file.tools.is_empty());
    }

    #[test]
    fn reject_wrong_version() {
        let err = load_overrides_from_str("version: \"2.0\"\ntools: []\n").unwrap_err();
        assert!(
            err.to_string().contains("unsupported override version"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reject_duplicate_names() {
        let yaml = r#"
version: "1.0"
tools:
  - name: "make"
    preset: log
  - name: "make"
    preset: allowed
"#;
        let err = load_overrides_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("duplicate tool name"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let yaml = r#"
version: "1.0"
tools:
  - name: "Make"
    preset: log
  - name: "make"
    preset: allowed
"#;
        let file = load_overrides_from_str(yaml).unwrap();
        assert_eq!(file.tools.len(), 2);
    }

    #[test]
    fn reject_empty_name() {
        let yaml = r#"
version: "1.0"
tools:
  - name: ""
    preset: allowed
"#;
        let err = load_overrides_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("must not be empty"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn load_from_nonexistent_file() {
        let err = load_overrides("/does/not/exist.yaml").unwrap_err();
        assert!(
            err.to_string().contains("failed to read override file"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn load_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "version: \"1.0\"\ntools:\n  - name: \"m4\"\n    preset: log"
        )
        .unwrap();

        let file = load_overrides(tmp.path()).unwrap();
        assert_eq!(file.tools.len(), 1);
        assert_eq!(file.tools[0].name, "m4");
        assert_eq!(file.tools[0].preset, Preset::Log);
    }
}
