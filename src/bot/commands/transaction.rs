//! Transaction Discord commands - `deposit` and `withdraw`.
//!
//! Both act on the goal currently open in the detail view.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        core::{format::format_currency, models::TransactionKind},
        errors::{Error, Result},
    };

    /// Runs a deposit or withdrawal and repaints the detail view.
    async fn record_transaction(
        ctx: poise::Context<'_, BotData, Error>,
        kind: TransactionKind,
        amount: i64,
    ) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            let result = match kind {
                TransactionKind::Deposit => tracker.deposit(amount).await,
                TransactionKind::Withdrawal => tracker.withdraw(amount).await,
            };

            match result {
                Ok(applied) => {
                    let display = tracker.display();
                    let amount = format_currency(amount.unsigned_abs(), display);
                    let message = match kind {
                        TransactionKind::Deposit => {
                            format!("✅ Deposited {amount} into **{}**", applied.value.name)
                        }
                        TransactionKind::Withdrawal => {
                            format!("✅ Withdrew {amount} from **{}**", applied.value.name)
                        }
                    };
                    let notice = render::outcome_notice(message, &applied.persistence);
                    render::screen_reply(&tracker, Some(notice))?
                }
                Err(e) => render::error_reply(e, tracker.display())?,
            }
        };

        ctx.send(reply).await?;
        Ok(())
    }

    /// Adds money to the open goal.
    #[poise::command(slash_command, owners_only)]
    pub async fn deposit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount to add"] amount: i64,
    ) -> Result<()> {
        record_transaction(ctx, TransactionKind::Deposit, amount).await
    }

    /// Takes money out of the open goal.
    #[poise::command(slash_command, owners_only)]
    pub async fn withdraw(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount to take out"] amount: i64,
    ) -> Result<()> {
        record_transaction(ctx, TransactionKind::Withdrawal, amount).await
    }
}

pub use inner::*;
