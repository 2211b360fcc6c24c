//! Default file names and environment variables for retrial
//!
//! Relative paths resolve against the directory the tool is run from, which
//! for a build step is the project root.

pub const CONFIG_FILE: &str = "retrial.toml";
pub const USER_CONFIG_DIR: &str = "retrial";
pub const USER_CONFIG_FILE: &str = "config.toml";

pub const CHECKSUM_FILE: &str = "retrial-checksums.json";
pub const MANIFEST_FILE: &str = "retrial-dependencies.toml";
pub const REPOSITORY_DIR: &str = "libs";
pub const LOGS_DIR: &str = ".retrial/logs";

pub const DEFAULT_EXTENSIONS: &[&str] = &["jar", "aar"];

pub mod env {
    pub const CHECKSUM_FILE: &str = "RETRIAL_CHECKSUM_FILE";
    pub const MANIFEST: &str = "RETRIAL_MANIFEST";
    pub const REPOSITORY: &str = "RETRIAL_REPOSITORY";
    pub const MAX_CONCURRENCY: &str = "RETRIAL_MAX_CONCURRENCY";
    pub const COLOR: &str = "RETRIAL_COLOR";
    pub const OUTPUT: &str = "RETRIAL_OUTPUT";
}
