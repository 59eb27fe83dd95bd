/// Application identity shared across crates
pub const APP_NAME: &str = "Lá Tre";
pub const PACKAGE_NAME: &str = "latre";

pub const CONFIG_FILE_NAME: &str = const_str::concat!(PACKAGE_NAME, ".toml");
pub const ENV_PREFIX: &str = "LATRE";

pub const VCARD_EXTENSION: &str = "vcf";
pub const VCARD_SUFFIX: &str = const_str::concat!(".", VCARD_EXTENSION);

/// Directory under the user data dir holding the default contact store.
pub const STORE_DIR_NAME: &str = "contacts";
