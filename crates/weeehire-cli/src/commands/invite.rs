//! invite command - create an invite link for a candidate

use super::CommandContext;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use weeehire_core::Candidate;

#[derive(Serialize)]
struct InviteResult<'a> {
    candidate: &'a Candidate,
    invite_link: String,
}

pub fn execute(
    ctx: &CommandContext,
    name: String,
    surname: String,
    matricola: String,
    degree_course: String,
) -> Result<()> {
    ctx.config.invite.validate()?;

    let candidate = Candidate::new(name, surname, matricola, degree_course);
    let mut gateway = ctx.gateway()?;
    let invite_link = gateway
        .create_invite(&candidate)
        .with_context(|| format!("Cannot create invite for {}", candidate.full_name()))?;

    if ctx.json {
        let result = InviteResult {
            candidate: &candidate,
            invite_link,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} {}", "Invite link:".green(), invite_link);
    }

    Ok(())
}
