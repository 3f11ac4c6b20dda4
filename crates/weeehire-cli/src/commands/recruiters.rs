//! recruiters command - list recruiters

use super::CommandContext;
use anyhow::Result;
use colored::Colorize;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let mut gateway = ctx.gateway()?;
    let recruiters = gateway.list_recruiters()?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&recruiters)?);
        return Ok(());
    }

    if recruiters.is_empty() {
        println!("{}", "No recruiters found".yellow());
        return Ok(());
    }

    for recruiter in &recruiters {
        println!(
            "{} {}",
            recruiter.name.bold(),
            format!("(@{})", recruiter.telegram_nickname).cyan()
        );
    }

    Ok(())
}
