//! Named field and upload configurations loaded from YAML.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::utils::ErrorMessages;
use crate::validation::{FieldConfig, FileConstraintConfig};

/// A set of forms settings, as written in a YAML file:
///
/// ```yaml
/// fields:
///   username:
///     modes: [alphanumeric]
///     case: lower
/// uploads:
///   avatar:
///     acceptedTypes: ["image/*"]
///     maxFileSize: 1048576
///     maxWidth: 512
/// messages:
///   maxSize: "Avatars must stay under 1 MB."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    pub fields: BTreeMap<String, FieldConfig>,
    pub uploads: BTreeMap<String, FileConstraintConfig>,
    pub messages: BTreeMap<String, String>,
}

impl FormsConfig {
    /// Loads the configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config: FormsConfig = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} field and {} upload configurations from {}",
            config.fields.len(),
            config.uploads.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parses the configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse forms configuration")
    }

    pub fn field(&self, name: &str) -> Result<&FieldConfig> {
        self.fields
            .get(name)
            .with_context(|| format!("No field configuration named `{}`", name))
    }

    pub fn upload(&self, name: &str) -> Result<&FileConstraintConfig> {
        self.uploads
            .get(name)
            .with_context(|| format!("No upload configuration named `{}`", name))
    }

    pub fn error_messages(&self) -> ErrorMessages {
        ErrorMessages::with_custom_messages(self.messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{evaluate, CaseMode, ErrorKind, LanguageSet, DEFAULT_MAX_FILES};
    use std::io::Write;

    const SAMPLE: &str = r#"
fields:
  username:
    modes: [alphanumeric]
    case: lower
  nickname:
    modes: [pattern]
    customPattern: "a-z_"
    acceptSpace: true
    languageSet: fr
  contact:
    modes: [alphanumeric, email]
    case: uppercase
uploads:
  avatar:
    acceptedTypes: ["image/png", "image/jpeg"]
    maxFileSize: 1048576
    maxWidth: 512
messages:
  maxSize: "Avatars must stay under 1 MB."
"#;

    #[test]
    fn test_parse_sample() {
        let config = FormsConfig::from_yaml(SAMPLE).unwrap();

        let username = config.field("username").unwrap();
        assert_eq!(username.modes, vec!["alphanumeric".to_string()]);
        assert_eq!(username.case_mode, CaseMode::Lower);
        assert!(!username.accept_space);

        let nickname = config.field("nickname").unwrap();
        assert_eq!(nickname.custom_pattern.as_deref(), Some("a-z_"));
        assert_eq!(nickname.language_set, Some(LanguageSet::French));
        assert!(nickname.accept_space);

        assert_eq!(config.field("contact").unwrap().case_mode, CaseMode::Upper);

        let avatar = config.upload("avatar").unwrap();
        assert_eq!(avatar.max_file_size, 1_048_576);
        assert_eq!(avatar.max_width, Some(512));
        assert_eq!(avatar.max_height, None);
        assert_eq!(avatar.max_files, DEFAULT_MAX_FILES);

        assert_eq!(
            config.error_messages().message_for(ErrorKind::MaxSize),
            "Avatars must stay under 1 MB."
        );
    }

    #[test]
    fn test_missing_names() {
        let config = FormsConfig::default();
        assert!(config.field("nope").is_err());
        assert!(config.upload("nope").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("smart_forms_{}.yaml", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = FormsConfig::load(&path).unwrap();
        assert_eq!(config.fields.len(), 3);
        std::fs::remove_file(&path).ok();

        assert!(FormsConfig::load(&path).is_err());
    }

    #[test]
    fn test_example_file_parses() {
        let config = FormsConfig::from_yaml(include_str!("../forms.example.yaml")).unwrap();
        assert_eq!(config.upload("avatar").unwrap().max_files, 1);
        assert!(config.field("city").unwrap().normalize_unicode);
    }

    #[test]
    fn test_rejects_misspelled_keys() {
        let misspelled_field = "fields:\n  name:\n    modes: [alpha]\n    acceptspace: true\n";
        assert!(FormsConfig::from_yaml(misspelled_field).is_err());

        let misspelled_upload = "uploads:\n  avatar:\n    maxfilesize: 10\n";
        assert!(FormsConfig::from_yaml(misspelled_upload).is_err());

        assert!(FormsConfig::from_yaml("field:\n  name:\n    modes: [alpha]\n").is_err());
    }

    #[test]
    fn test_single_mode_key() {
        let config = FormsConfig::from_yaml("fields:\n  email:\n    mode: email\n").unwrap();
        let email = config.field("email").unwrap();
        assert_eq!(email.modes, vec!["email".to_string()]);

        let result = evaluate("definitely not an email", email);
        assert!(result.has_error(ErrorKind::StrictEmail));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(FormsConfig::from_yaml("fields: [1, 2").is_err());
    }
}
