//! Application constants for the addrscope CLI.

// ============================================================================
// Identity
// ============================================================================

/// Version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description shown by `version`.
pub const TAGLINE: &str = "Follow value through an address's transfer graph";

/// ASCII art logo.
pub const LOGO: &str = r"
              __    __
  ____ _____/ /___/ /_________________  ____  ___
 / __ `/ __  / __  / ___/ ___/ ___/ __ \/ __ \/ _ \
/ /_/ / /_/ / /_/ / /  (__  ) /__/ /_/ / /_/ /  __/
\__,_/\__,_/\__,_/_/  /____/\___/\____/ .___/\___/
                                     /_/
";

// ============================================================================
// Logging
// ============================================================================

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter used with `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "addrscope=debug,warn";

// ============================================================================
// Text Output
// ============================================================================

/// Width of the address columns in tables.
pub const ADDRESS_WIDTH: usize = 13;

/// Width of the amount column in tables.
pub const AMOUNT_WIDTH: usize = 14;
