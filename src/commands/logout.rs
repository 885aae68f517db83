use anyhow::Result;
use owo_colors::OwoColorize;
use volhub_api::Session;

pub fn run() -> Result<()> {
    if Session::delete()? {
        println!("Logged out.");
    } else {
        println!("{}", "Not logged in".dimmed());
    }
    Ok(())
}
