// ABOUTME: Version and banner constants for the CLI driver

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BANNER: &str = "tree-lisp: a tree-walking interpreter for a small Common-Lisp-family dialect";
