//! Interactive chat command.

use crate::chat::{
    ChatOrchestrator, ChatSession, ItemContext, MemoryStore, OpenAiCompletion,
};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::transcript::parse_input;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Run the interactive chat command.
pub async fn run_chat(input: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&e.to_string());
        Output::info("Run 'samle init' for setup guidance.");
        return Err(e);
    }

    if let Some(model) = model {
        settings.models.default_model = model;
    }

    // Resolve the item's content first; chatting needs something to chat about.
    let (source, id) = parse_input(input, &settings)?;
    Output::info(&format!("Fetching transcript for {}", id));

    let item = match source.fetch_transcript(&id).await {
        Ok(transcript) => ItemContext {
            title: format!("{} {}", source.platform(), id),
            content: transcript.full_text,
        },
        Err(e) => {
            // Transcript failure is expected; chat proceeds with what we have.
            Output::warning(&format!("Transcript not available: {}", e));
            ItemContext {
                title: format!("{} {}", source.platform(), id),
                content: String::new(),
            }
        }
    };

    let orchestrator = ChatOrchestrator::new(
        &settings,
        Arc::new(OpenAiCompletion::new()),
        Arc::new(MemoryStore::new()),
    );
    let mut session = ChatSession::new(id.clone());

    println!("\n{}", style("Samle Chat").bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'new' to start a fresh session.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if line.eq_ignore_ascii_case("new") {
            session = ChatSession::new(id.clone());
            Output::info("Started a new session.");
            continue;
        }

        let reply = orchestrator.send(&mut session, &item, line).await?;

        if let Some(notice) = &reply.switch_notice {
            Output::notice(notice);
        }

        println!(
            "\n{} {}\n",
            style("Samle:").cyan().bold(),
            reply.message.text()
        );
    }

    Ok(())
}
