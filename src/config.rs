// ABOUTME: Version info, banner text, and the interpreter's tuning constants

/// Number of slots in the symbol interner's hash table. Fixed at a prime
/// well above the expected working-set size of symbols in a single program,
/// per the design note in `interner.rs`.
pub const SYMBOL_TABLE_SIZE: usize = crate::interner::TABLE_SIZE;

/// String literals longer than this are truncated by the reader, with a
/// diagnostic printed to stderr.
pub const STRING_LITERAL_LIMIT: usize = 255;

/// Identifiers longer than this are truncated by the reader, with a
/// diagnostic printed to stderr.
pub const IDENTIFIER_LIMIT: usize = 127;

/// Conventional bootstrap file loaded before the REPL starts, unless
/// `--no-prelude` is given or the file is absent.
pub const DEFAULT_PRELUDE_PATH: &str = "./res/lib.scm";

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Sparrow v0.1.0";
pub const WELCOME_SUBTITLE: &str = "A tree-walking Scheme-flavored Lisp interpreter";

pub const HISTORY_FILE: &str = ".sparrow_history";
