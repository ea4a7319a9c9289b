//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner after sign-in, before the session opens.
pub fn print_welcome_banner(name: &str, email: &str) {
    println!();
    println!("  {} {}", "*", style("Chat with Aura").cyan().bold());
    println!(
        "  {}",
        style(format!("Signed in as {name} <{email}>")).dim()
    );
    println!();
    println!("  {}", style("Press Ctrl+D to end the session").dim());
    println!("  {}", style("---").dim());
    println!();
}
