//! Interactive chat loop against a bot.

use std::collections::HashMap;
use std::io::Write;

use chrono::Utc;
use console::style;

use colloquy_core::conversation::SessionDriver;
use colloquy_core::endpoint::ConversationEndpoint;
use colloquy_types::conversation::IntentState;

/// Run an interactive conversation until the user quits.
///
/// The first turn carries a `conversationStart` bookkeeping attribute; each
/// later turn carries `lastIntent`, so the bot (and any fulfillment hooks)
/// can see how the conversation has progressed.
pub async fn run_chat<E: ConversationEndpoint>(
    driver: &SessionDriver<E>,
) -> anyhow::Result<()> {
    use tokio::io::AsyncBufReadExt;

    let mut session = driver.start_session();

    println!();
    println!(
        "  {} Chatting with bot {} (session {})",
        style("💬").bold(),
        style(&driver.target().bot_id).cyan(),
        style(&session.session_id).dim()
    );
    println!("  Type 'quit' to exit");
    println!();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut first_turn = true;

    loop {
        print!("{} ", style("You:").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye") {
            println!("Goodbye!");
            break;
        }

        let mut extra = HashMap::new();
        if first_turn {
            extra.insert(
                "conversationStart".to_string(),
                Utc::now().timestamp().to_string(),
            );
            first_turn = false;
        }

        match driver.send_turn(&mut session, input, extra).await {
            Ok(turn) => {
                for message in &turn.messages {
                    println!("{} {}", style("Bot:").green().bold(), message.content);
                }
                session
                    .attributes
                    .insert("lastIntent".to_string(), turn.intent_name.clone());

                match turn.intent_state {
                    IntentState::Fulfilled => {
                        println!("  {}", style("Intent fulfilled!").green());
                    }
                    IntentState::Failed => {
                        println!("  {}", style("Intent failed!").red());
                    }
                    _ => {}
                }
            }
            Err(e) => {
                eprintln!("  {} {e}", style("✗").red());
            }
        }
        println!();
    }

    Ok(())
}
