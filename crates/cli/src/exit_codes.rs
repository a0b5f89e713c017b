//! CLI exit code registry.
//!
//! Every exit code `rlink` can return is defined here. Scheduled jobs branch
//! on these values, so they are part of the shell contract.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success (including runs that filtered rows out) |
//! | 1     | Universal | General error                            |
//! | 2     | Universal | Usage error (bad args)                   |
//! | 3-9   | run       | Config, input, and output failures       |
//! | 10-19 | submit    | Bulk-import submission failures          |

use rosterlink_bulk::BulkError;

// Universal (0-2)

pub const EXIT_SUCCESS: u8 = 0;

/// Unspecified failure. Prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Bad arguments or missing required options.
pub const EXIT_USAGE: u8 = 2;

// Run (3-9)

/// Config file unreadable, unparseable, or invalid.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Events or reference file could not be read or parsed.
pub const EXIT_INPUT: u8 = 4;

/// Export, archive, or JSON output could not be written.
pub const EXIT_OUTPUT: u8 = 5;

// Submit (10-19)

/// `--submit` given but the config has no `[submit]` section.
pub const EXIT_SUBMIT_NOT_CONFIGURED: u8 = 10;

/// No credentials from flags or environment.
pub const EXIT_SUBMIT_NOT_AUTH: u8 = 11;

/// Credentials rejected upstream (401/403).
pub const EXIT_SUBMIT_AUTH: u8 = 12;

/// Any other upstream status, or a network failure.
pub const EXIT_SUBMIT_UPSTREAM: u8 = 13;

/// Map a bulk-import error to its exit code.
pub fn submit_exit_code(err: &BulkError) -> u8 {
    match err {
        BulkError::Auth(..) => EXIT_SUBMIT_AUTH,
        BulkError::Http(..) | BulkError::Network(_) => EXIT_SUBMIT_UPSTREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INVALID_CONFIG,
            EXIT_INPUT,
            EXIT_OUTPUT,
            EXIT_SUBMIT_NOT_CONFIGURED,
            EXIT_SUBMIT_NOT_AUTH,
            EXIT_SUBMIT_AUTH,
            EXIT_SUBMIT_UPSTREAM,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn bulk_errors_map_to_submit_range() {
        assert_eq!(submit_exit_code(&BulkError::Auth(401, String::new())), EXIT_SUBMIT_AUTH);
        assert_eq!(submit_exit_code(&BulkError::Http(500, String::new())), EXIT_SUBMIT_UPSTREAM);
        assert_eq!(submit_exit_code(&BulkError::Network("refused".into())), EXIT_SUBMIT_UPSTREAM);
    }
}
