//! General Discord commands - ping, help, and retrying a failed save.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command, owners_only)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command, owners_only)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Celengan Help**\n\
        Track what you are saving for and how close you are.\n\n\
        **Goals**\n\
        • `/goal create <name> <goal> <saving_amount> <frequency> [image]` - Start a new goal.\n\
        • `/goal edit <goal> [name] [goal] [saving_amount] [frequency] [image]` - Change a goal.\n\
        • `/goal delete <goal> confirm:True` - Delete a goal permanently.\n\
        • `/goal list` - Show your goals.\n\
        • `/goal open <goal>` / `/goal home` - Open a goal or go back to the list.\n\
        • `/goal tab <Active|Complete>` / `/goal sort <Name|Goal> [direction]` - Filter and order the list.\n\n\
        **Money** (on the open goal)\n\
        • `/deposit <amount>` - Add savings.\n\
        • `/withdraw <amount>` - Take savings out.\n\n\
        **Reminders**\n\
        • `/reminder toggle [on]` - Turn reminders on or off for the open goal.\n\
        • `/reminder due` - See which contributions are overdue.\n\n\
        **Utility**\n\
        • `/save_retry` - Try saving again after a storage error.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Writes the goals to storage again after a failed save.
    #[poise::command(slash_command, owners_only)]
    pub async fn save_retry(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let response = {
            let mut tracker = ctx.data().tracker.lock().await;
            if tracker.is_dirty() {
                match tracker.retry_save().await {
                    Ok(()) => "💾 Saved! Everything is stored again.".to_string(),
                    Err(e) => format!("⚠️ Still could not save ({e}). Try again later."),
                }
            } else {
                "💾 Nothing to save, everything is already stored.".to_string()
            }
        };

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
