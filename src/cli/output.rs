//! Console output flags, shared across commands via environment
//! variables so any module can check them without plumbing.

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("HARVESTER_QUIET").is_ok()
}

/// Whether `--verbose` was passed.
pub fn is_verbose() -> bool {
    std::env::var("HARVESTER_VERBOSE").is_ok()
}
