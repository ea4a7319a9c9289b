//! Account registration command.
//!
//! Prompts for the missing fields, validates the password against the
//! local policy (nothing reaches the network on a violation), then calls
//! the registration endpoint and prints the outcome.

use console::style;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use aura_client::SupportApi;
use aura_core::backend::AuthBackend;
use aura_core::password;

/// Run the interactive registration flow.
pub async fn run_register(
    api: &SupportApi,
    name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let plain: String = Password::new().with_prompt("Password").interact()?;
    let band = password::band(password::score(&plain));
    println!("  {} {}", style("Strength:").bold(), style(band.feedback()).dim());

    let confirmation: String = Password::new().with_prompt("Confirm password").interact()?;

    if let Err(violation) = password::validate_registration(&plain, &confirmation) {
        println!("\n  {} {}", style("✗").red().bold(), violation);
        return Ok(());
    }

    let secret = SecretString::from(plain);
    match api.register(&name, &email, &secret).await {
        Ok(user) => {
            println!(
                "\n  {} Account created for {}. Sign in with: aura chat --email {}",
                style("✓").green().bold(),
                style(&user.profile.name).cyan(),
                user.profile.email
            );
        }
        Err(err) => {
            println!("\n  {} {}", style("✗").red().bold(), err);
        }
    }

    Ok(())
}
