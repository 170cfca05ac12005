//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use console::style;

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_success, render_plan, render_version_table,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", style(prompt).bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_confirmation(&input))
}

fn is_confirmation(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_accepts_yes() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation("YES\n"));
        assert!(is_confirmation("  Yes  "));
    }

    #[test]
    fn test_confirmation_defaults_to_no() {
        assert!(!is_confirmation("\n"));
        assert!(!is_confirmation("n\n"));
        assert!(!is_confirmation("yep\n"));
    }
}
