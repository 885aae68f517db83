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

    let name: String = Input::new().with_prompt("  Name").interact_text()?;
    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password =
        rpassword::prompt_password("  Password: ").context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("  Confirm password: ").context("Failed to read password")?;

    if password != confirm {
        anyhow::bail!("Passwords do not match.");
    }

    let client = HubClient::new(&config.api_url);

    let spinner = utils::create_spinner("Creating account".to_string());
    let result = client.register(&name, &email, &password).await;
    spinner.finish_and_clear();

    let session = Session::from_auth(result?);
    session.save()?;

    println!();
    println!("{}", format!("Welcome to Volhub, {}!", session.name).green());
    println!("Find something to join with `volhub events`.");

    Ok(())
}
