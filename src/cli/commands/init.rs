//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Samle Setup");
    println!();

    // Step 1: API keys
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if crate::openai::is_api_key_configured() {
        Output::success("OPENAI_API_KEY is set.");
    } else {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!("  Chat requires an OpenAI API key.");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
    }

    if settings.transcript.resolved_api_key().is_some() {
        Output::success("Transcript provider key is set.");
    } else {
        Output::warning("No transcript provider key configured.");
        println!("  Transcript fetching for videos requires a provider key.");
        println!(
            "  {}",
            style("export SEARCHAPI_API_KEY='...' or set transcript.api_key in config").green()
        );
    }

    println!();

    // Step 2: config file
    println!("{}", style("Step 2: Writing configuration").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config already exists at {}", config_path.display()));
    } else {
        settings.save()?;
        Output::success(&format!("Wrote default config to {}", config_path.display()));
    }

    println!();
    Output::success("Setup complete. Try: samle transcript <youtube-url>");
    Ok(())
}
