//! Build-and-release command: snapshot DRAFT into a new version and flip an
//! alias to it.

use chrono::Utc;
use console::style;

use colloquy_core::endpoint::LifecycleEndpoint;
use colloquy_core::lifecycle::ReleaseDriver;

pub async fn run_release<E: LifecycleEndpoint>(
    driver: &ReleaseDriver<E>,
    bot_id: &str,
    locale: &str,
    alias: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    // Preflight: surface a bad bot id before requesting a build.
    let info = driver.endpoint().describe_bot(bot_id).await?;
    println!();
    println!(
        "  {} Releasing bot {} ({}) -- status {}",
        style("🚀").bold(),
        style(&info.name).cyan(),
        info.bot_id,
        info.status
    );

    let description = match description {
        Some(d) => d.to_string(),
        None => format!("Version created on {}", Utc::now().format("%Y-%m-%d %H:%M:%S")),
    };

    println!("  Building new version from DRAFT...");
    let (job, binding) = driver.release(bot_id, locale, alias, &description).await?;

    println!(
        "  {} Version {} is now available",
        style("✓").green(),
        style(&job.version).cyan()
    );
    println!(
        "  {} Alias '{}' (id {}) now points to version {} ({})",
        style("✓").green(),
        binding.alias_name,
        binding.alias_id,
        style(&binding.bound_version).cyan(),
        binding.status
    );
    println!();

    Ok(())
}
