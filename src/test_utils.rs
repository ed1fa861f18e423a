//! Shared test utilities for execute and output tests.

use crate::config::Config;
use crate::files::DesFiles;
use crate::roots::Roots;

pub const TEST_DESDATA: &str = "/data/des";
pub const TEST_DESREMOTE: &str = "https://desar.example.org/DESFiles";
pub const TEST_SCRATCH: &str = "/scratch";

/// Configuration with every root set, default mode and schema.
pub fn test_config() -> Config {
    Config {
        roots: Roots {
            desdata: Some(TEST_DESDATA.to_string()),
            desremote: Some(TEST_DESREMOTE.to_string()),
            scratch: Some(TEST_SCRATCH.to_string()),
        },
        ..Default::default()
    }
}

/// Resolver over [`test_config`].
pub fn test_files() -> DesFiles {
    DesFiles::new(&test_config())
}
