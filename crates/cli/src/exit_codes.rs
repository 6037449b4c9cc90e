//! CLI Exit Code Registry
//!
//! Single source of truth for the `amtest` exit codes. Exit codes are part
//! of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad arguments)                          |
//! | 3    | Input error (file, workbook, worksheet)              |
//! | 4    | Template schema error                                |
//! | 5    | Chart render/capture error                           |
//! | 6    | PDF render error                                     |
//! | 7    | Storage permission denied (artifact left in cache)   |
//! | 8    | Storage failed everywhere, including the fallback    |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input error - missing file, unreadable workbook, empty worksheet.
pub const EXIT_INPUT: u8 = 3;

/// Template schema failed to parse or validate.
pub const EXIT_SCHEMA: u8 = 4;

/// Chart could not be rendered or captured - report generation blocked.
pub const EXIT_CHART: u8 = 5;

/// PDF rendering failed.
pub const EXIT_PDF: u8 = 6;

/// Shared-storage permission denied. The report exists, but only in the
/// temporary cache.
pub const EXIT_PERMISSION_DENIED: u8 = 7;

/// Every storage strategy failed, including the private fallback.
pub const EXIT_STORAGE_FAILED: u8 = 8;
