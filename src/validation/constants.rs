//! Constants used throughout the validation system

/// Default upper bound for a single uploaded file (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// Default number of files accepted in one batch
pub const DEFAULT_MAX_FILES: usize = 10;
/// Default accepted MIME matcher for uploads
pub const DEFAULT_ACCEPTED_TYPE: &str = "image/*";

/// Character-class body for the `en` language set
pub const ENGLISH_CHARACTERS: &str = "a-zA-Z0-9";
/// Character-class body for the `es` language set
pub const SPANISH_CHARACTERS: &str = "a-zA-Z0-9áéíóúñ";
/// Character-class body for the `fr` language set
pub const FRENCH_CHARACTERS: &str = "a-zA-Z0-9àâäçéèêëîïôùûüÿ";
