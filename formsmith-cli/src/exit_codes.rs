//! Process exit codes

/// Command completed and everything checked out
pub const EXIT_SUCCESS: i32 = 0;

/// Command ran but its input was rejected: no usable fields, or values
/// that fail validation
pub const EXIT_WARNING: i32 = 1;

/// Command could not run: unreadable files, malformed JSON, no terminal
pub const EXIT_ERROR: i32 = 2;
