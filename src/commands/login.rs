use anyhow::{Context, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;
use volhub_api::{HubClient, Session};

use crate::config::Config;
use crate::utils;

pub async fn run(config: &Config) -> Result<()> {
    if Session::exists() {
        anyhow::bail!("Already logged in. Run `volhub logout` first to switch accounts.");
    }

    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password =
        rpassword::prompt_password("  Password: ").context("Failed to read password")?;

    let client = HubClient::new(&config.api_url);

    let spinner = utils::create_spinner("Logging in".to_string());
    let result = client.login(&email, &password).await;
    spinner.finish_and_clear();

    let session = Session::from_auth(result?);
    session.save()?;

    println!(
        "{}",
        format!("Logged in as {} <{}>", session.name, session.email).green()
    );

    Ok(())
}
