//! Flat options record consumed by parser, resolver and renderer.
//!
//! Owned by the CLI layer in main.rs; everything below it only reads
//! these switches.

use std::path::PathBuf;

pub struct Options {
    pub enable_warnings: bool,
    pub just_dump: bool,
    pub enable_summary_page: bool,
    pub enable_copyright: bool,
    pub enable_follow_refs: bool,
    pub enable_validate: bool,
    pub enable_seealso_all: bool,
    pub enable_sort: bool,
    pub enable_structs: bool,
    pub output_dir: PathBuf,
    pub man_section: String,
    pub short_pkg: String,
    pub pkg: String,
    pub include_prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            enable_warnings: true,
            just_dump: false,
            enable_summary_page: true,
            enable_copyright: true,
            enable_follow_refs: true,
            enable_validate: true,
            enable_seealso_all: true,
            enable_sort: true,
            enable_structs: true,
            output_dir: PathBuf::from("out"),
            man_section: "3".to_string(),
            short_pkg: "XXXpkg".to_string(),
            pkg: "The XXX Manual".to_string(),
            include_prefix: String::new(),
        }
    }
}
