//! Version command implementation.

use anyhow::Result;
use console::style;

/// Execute the version command.
pub fn execute() -> Result<()> {
    println!(
        "{} {}",
        style("qbell").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    Ok(())
}
