// Error handling utilities for consistent error messages and exit codes

use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing files, unknown filter keys, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Internal errors come from the snapshot database; everything else is the
/// user's to fix (bad file, bad JSON, bad toggle).
pub fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<rusqlite::Error>())
}

/// Print an error with the conventions of the CLI and return its exit code
pub fn report_error(err: &anyhow::Error) -> i32 {
    if is_internal_error(err) {
        eprintln!("Internal error: {}", err);
        let mut causes = err.chain().skip(1).peekable();
        if causes.peek().is_some() {
            eprintln!("\nCaused by:");
            for (indent, cause) in causes.enumerate() {
                eprintln!("{:indent$}  {}", "", cause, indent = indent + 1);
            }
        }
        2
    } else {
        // Context first, root cause last
        let message = err.chain().map(|c| c.to_string()).collect::<Vec<_>>().join(": ");
        eprintln!("Error: {}", message);
        1
    }
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a watch interval in seconds
pub fn validate_interval(secs: u64) -> Result<u64, String> {
    if secs == 0 {
        Err("Watch interval must be at least 1 second".to_string())
    } else if secs > 86400 {
        Err(format!("Watch interval {}s is longer than a day", secs))
    } else {
        Ok(secs)
    }
}
