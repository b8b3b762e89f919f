//! Scripted multi-turn conversation command.

use anyhow::bail;
use console::style;

use colloquy_core::conversation::SessionDriver;
use colloquy_core::endpoint::ConversationEndpoint;

/// Feed a fixed sequence of utterances through one session, printing each
/// turn as it completes. A failed turn stops the script and reports how far
/// it got.
pub async fn run_script<E: ConversationEndpoint>(
    driver: &SessionDriver<E>,
    utterances: &[String],
) -> anyhow::Result<()> {
    let mut session = driver.start_session();

    println!();
    println!(
        "  {} Running {} turns against bot {} (session {})",
        style("▶").bold(),
        utterances.len(),
        style(&driver.target().bot_id).cyan(),
        style(&session.session_id).dim()
    );
    println!();

    let run = driver.run_script(&mut session, utterances).await;

    for (i, turn) in run.turns.iter().enumerate() {
        println!("  --- Turn {} ---", i + 1);
        println!("  You: {}", turn.utterance);
        match turn.reply() {
            Some(reply) => println!("  Bot: {reply}"),
            None => println!("  Bot: {}", style("(no message)").dim()),
        }
        println!(
            "  Intent: {} ({})",
            style(&turn.intent_name).cyan(),
            turn.intent_state
        );
        for (name, value) in &turn.slots {
            match value {
                Some(v) => println!("    {name}: {v}"),
                None => println!("    {name}: {}", style("unfilled").dim()),
            }
        }
        println!();
    }

    if !session.attributes.is_empty() {
        println!("  Session attributes after script:");
        let mut keys: Vec<_> = session.attributes.keys().collect();
        keys.sort();
        for key in keys {
            println!("    {key}: {}", session.attributes[key]);
        }
        println!();
    }

    if let Some(failure) = run.failure {
        bail!(
            "script stopped after {} of {} turns: {failure}",
            run.turns.len(),
            utterances.len()
        );
    }

    println!("  {} Script completed", style("✓").green());
    Ok(())
}
