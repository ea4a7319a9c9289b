//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: sign-in, widget open (session
//! establishment), greeting, and the input loop. Sends are dispatched
//! fire-and-forget; replies are printed by a transcript observer as their
//! completions arrive, so a slow reply never blocks the prompt.

use std::io::Write;

use console::style;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use aura_client::SupportApi;
use aura_core::backend::AuthBackend;
use aura_core::widget::{ChatWidget, OpenPhase, WidgetState};
use aura_types::chat::{TranscriptEvent, TurnRole};
use aura_types::identity::IdentityState;

use super::banner::print_welcome_banner;
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat session: sign in, open the widget, loop.
pub async fn run_chat(api: SupportApi, email: Option<String>) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let plain: String = Password::new().with_prompt("Password").interact()?;
    let secret = SecretString::from(plain);

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("signing in...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let mut identity_state = IdentityState::Pending;
    match api.login(&email, &secret).await {
        Ok(user) => {
            spinner.finish_and_clear();
            print_welcome_banner(&user.profile.name, &user.profile.email);
            identity_state = IdentityState::Resolved(user.identity);
        }
        Err(err) => {
            spinner.finish_and_clear();
            println!("\n  {} {}", style("✗").red().bold(), err);
        }
    }
    // Unauthenticated: no session is established, nothing to open.
    let Some(identity) = identity_state.identity().cloned() else {
        return Ok(());
    };

    let mut widget = ChatWidget::new(api, identity);

    // Subscribe before opening so the seeded greeting is delivered too.
    let mut events = widget.manager().transcript().subscribe();

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("connecting...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    widget.open().await;
    spinner.finish_and_clear();

    if widget.state() != WidgetState::Open(OpenPhase::Ready) {
        println!(
            "\n  {} Could not start a chat session. Please try again later.",
            style("!").yellow().bold()
        );
        return Ok(());
    }

    if let Some(session) = widget.manager().current_session().await {
        println!("  {}", style(format!("Session {}", session.session_id)).dim());
        println!();
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    // Print assistant turns as the transcript grows, starting with the
    // buffered greeting.
    let printer = {
        let manager = widget.manager().clone();
        let mut writer = writer.clone();
        let renderer = ChatRenderer::new();
        tokio::spawn(async move {
            while let Ok(TranscriptEvent::TurnAppended { index, role }) = events.recv().await {
                if role != TurnRole::Assistant {
                    continue;
                }
                let Some(turn) = manager.transcript().turns().get(index).cloned() else {
                    continue;
                };
                let rendered = renderer.render(&turn.content);
                let _ = writeln!(
                    writer,
                    "\n  {} {}\n",
                    style("Aura >").cyan().bold(),
                    rendered.trim()
                );
            }
        })
    };

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                widget.close();
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                // Fire-and-forget: the reply lands via the printer task.
                let manager = widget.manager().clone();
                tokio::spawn(async move { manager.send_message(&text).await });
            }
        }
    }

    printer.abort();
    Ok(())
}
