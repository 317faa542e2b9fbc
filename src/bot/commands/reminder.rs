//! Reminder Discord commands - the `/reminder` group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        core::format::format_currency,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for contribution reminders.
    #[poise::command(
        slash_command,
        owners_only,
        subcommands("reminder_toggle", "reminder_due")
    )]
    pub async fn reminder(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Reminder commands:\n\
            `/reminder toggle` - Turn reminders on or off for the open goal\n\
            `/reminder due` - List goals whose next contribution is overdue";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Turns reminders for the open goal on or off. Without `on`, flips the setting.
    #[poise::command(slash_command, owners_only, rename = "toggle")]
    pub async fn reminder_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Turn reminders on (true) or off (false)"] on: Option<bool>,
    ) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            let result = match on {
                Some(on) => tracker.set_reminder(on).await,
                None => tracker.toggle_reminder().await,
            };

            match result {
                Ok(applied) => {
                    let state = if applied.value.reminder_on { "on" } else { "off" };
                    let notice = render::outcome_notice(
                        format!("🔔 Reminders {state} for **{}**", applied.value.name),
                        &applied.persistence,
                    );
                    render::screen_reply(&tracker, Some(notice))?
                }
                Err(e) => render::error_reply(e, tracker.display())?,
            }
        };

        ctx.send(reply).await?;
        Ok(())
    }

    /// Lists goals with reminders on whose next contribution is overdue.
    #[poise::command(slash_command, owners_only, rename = "due")]
    pub async fn reminder_due(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let response = {
            let tracker = ctx.data().tracker.lock().await;
            let due = tracker.due_reminders(chrono::Utc::now());

            if due.is_empty() {
                "🔔 Nothing due. You're on track!".to_string()
            } else {
                let mut response = String::from("🔔 **Contributions due**\n\n");
                for record in due {
                    writeln!(
                        &mut response,
                        "• **{}** - {} ({})",
                        record.name,
                        format_currency(record.saving_amount, tracker.display()),
                        record.frequency
                    )?;
                }
                response
            }
        };

        ctx.say(response).await?;
        Ok(())
    }
}

pub use inner::*;
