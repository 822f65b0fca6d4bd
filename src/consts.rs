//! Global constants for the command-line front end.

pub const CONFIG_ENV_VAR: &str = "SMART_FORMS_CONFIG"; // Default path of the YAML configuration.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream"; // Used when sniffing finds nothing.
