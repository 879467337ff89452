//! Stable error codes, independent of the human-readable messages.

/// Maps an error to a stable string code for hosts that branch on error kind.
pub trait SwitchOffErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const DECODE_TOO_MANY_FIELDS: &str = "DECODE_TOO_MANY_FIELDS";
pub const DECODE_INVALID_UNIT_PATTERN: &str = "DECODE_INVALID_UNIT_PATTERN";
pub const DECODE_INVALID_RULE_PATTERN: &str = "DECODE_INVALID_RULE_PATTERN";
pub const DECODE_INVALID_LINE_SPEC: &str = "DECODE_INVALID_LINE_SPEC";
pub const DECODE_INVALID_REGEXP: &str = "DECODE_INVALID_REGEXP";

pub const CONFIG_FILE_NOT_FOUND: &str = "CONFIG_FILE_NOT_FOUND";
pub const CONFIG_FILE_UNREADABLE: &str = "CONFIG_FILE_UNREADABLE";
pub const CONFIG_INVALID_GROUP: &str = "CONFIG_INVALID_GROUP";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";

pub const SCAN_IO_ERROR: &str = "SCAN_IO_ERROR";
pub const SCAN_UNSUPPORTED_CHARSET: &str = "SCAN_UNSUPPORTED_CHARSET";
pub const SCAN_INVALID_MARKER: &str = "SCAN_INVALID_MARKER";
pub const SCAN_THREAD_POOL: &str = "SCAN_THREAD_POOL";
