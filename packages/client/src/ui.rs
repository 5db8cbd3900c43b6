//! UI utilities for the client.

use std::io::Write;

/// Print a block of output and flush it immediately
pub fn print_block(text: &str) {
    print!("{}", text);
    std::io::stdout().flush().ok();
}
