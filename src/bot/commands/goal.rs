//! Goal Discord commands - the `/goal` group.
//!
//! Create, edit, and delete goals, and move between the list and detail screens.
//! Every reply repaints the screen the tracker ends up on.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, render},
        core::{
            image::{MAX_IMAGE_BYTES, encode_data_uri},
            models::{Frequency, RecordFields},
            store::{SortDirection, SortKey, SortOrder, Tab},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Contribution cadence offered by the create/edit commands.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum FrequencyChoice {
        Daily,
        Weekly,
        Monthly,
    }

    impl From<FrequencyChoice> for Frequency {
        fn from(choice: FrequencyChoice) -> Self {
            match choice {
                FrequencyChoice::Daily => Self::Daily,
                FrequencyChoice::Weekly => Self::Weekly,
                FrequencyChoice::Monthly => Self::Monthly,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum TabChoice {
        Active,
        Complete,
    }

    impl From<TabChoice> for Tab {
        fn from(choice: TabChoice) -> Self {
            match choice {
                TabChoice::Active => Self::Active,
                TabChoice::Complete => Self::Complete,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum SortKeyChoice {
        Name,
        Goal,
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum DirectionChoice {
        Ascending,
        Descending,
    }

    /// Downloads an uploaded picture and encodes it for storage.
    async fn encode_attachment(attachment: Option<&serenity::Attachment>) -> Result<Option<String>> {
        let Some(attachment) = attachment else {
            return Ok(None);
        };

        let size = usize::try_from(attachment.size).unwrap_or(usize::MAX);
        if size > MAX_IMAGE_BYTES {
            return Err(Error::Validation {
                message: format!("Image is {size} bytes, the limit is {MAX_IMAGE_BYTES}"),
            });
        }

        let bytes = attachment.download().await?;
        encode_data_uri(attachment.content_type.as_deref(), &bytes).map(Some)
    }

    /// Parent command for savings goals.
    ///
    /// Running it by itself shows the list of goals.
    #[poise::command(
        slash_command,
        owners_only,
        subcommands(
            "goal_create",
            "goal_edit",
            "goal_delete",
            "goal_list",
            "goal_open",
            "goal_home",
            "goal_tab",
            "goal_sort"
        )
    )]
    pub async fn goal(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            tracker.go_home();
            render::screen_reply(&tracker, None)?
        };
        ctx.send(reply).await?;
        Ok(())
    }

    /// Creates a new savings goal.
    #[poise::command(slash_command, owners_only, rename = "create")]
    pub async fn goal_create(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What you are saving for"] name: String,
        #[description = "Target amount"] goal: i64,
        #[description = "How much you plan to save each period"] saving_amount: i64,
        #[description = "How often you plan to save"] frequency: FrequencyChoice,
        #[description = "Optional picture of the goal"] image: Option<serenity::Attachment>,
    ) -> Result<()> {
        ctx.defer().await?;

        let image = match encode_attachment(image.as_ref()).await {
            Ok(image) => image,
            Err(e) => {
                let display = ctx.data().tracker.lock().await.display().clone();
                ctx.send(render::error_reply(e, &display)?).await?;
                return Ok(());
            }
        };

        let fields = RecordFields {
            name,
            goal,
            saving_amount,
            frequency: frequency.into(),
            image,
        };

        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            match tracker.create_record(fields).await {
                Ok(applied) => {
                    tracker.go_home();
                    let notice = render::outcome_notice(
                        format!("✅ Created goal **{}**!", applied.value.name),
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

    /// Edits a goal. Options left empty keep their current value.
    #[poise::command(slash_command, owners_only, rename = "edit")]
    pub async fn goal_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Goal to edit"]
        #[autocomplete = "autocomplete::autocomplete_goal"]
        goal_id: i64,
        #[description = "New name"] name: Option<String>,
        #[description = "New target amount"] goal: Option<i64>,
        #[description = "New amount per period"] saving_amount: Option<i64>,
        #[description = "New cadence"] frequency: Option<FrequencyChoice>,
        #[description = "Replace the picture"] image: Option<serenity::Attachment>,
    ) -> Result<()> {
        ctx.defer().await?;

        let image = match encode_attachment(image.as_ref()).await {
            Ok(image) => image,
            Err(e) => {
                let display = ctx.data().tracker.lock().await.display().clone();
                ctx.send(render::error_reply(e, &display)?).await?;
                return Ok(());
            }
        };

        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            let current = tracker.store().find_by_id(goal_id).cloned();
            let result = match current {
                Ok(current) => {
                    let fields = RecordFields {
                        name: name.unwrap_or(current.name),
                        goal: goal
                            .unwrap_or_else(|| i64::try_from(current.goal).unwrap_or(i64::MAX)),
                        saving_amount: saving_amount.unwrap_or_else(|| {
                            i64::try_from(current.saving_amount).unwrap_or(i64::MAX)
                        }),
                        frequency: frequency.map_or(current.frequency, Frequency::from),
                        image,
                    };
                    tracker.edit_record(goal_id, fields).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(applied) => {
                    let notice = render::outcome_notice(
                        format!("✅ Updated goal **{}**.", applied.value.name),
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

    /// Deletes a goal and its history permanently.
    #[poise::command(slash_command, owners_only, rename = "delete")]
    pub async fn goal_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Goal to delete"]
        #[autocomplete = "autocomplete::autocomplete_goal"]
        goal_id: i64,
        #[description = "Confirm: this cannot be undone"] confirm: bool,
    ) -> Result<()> {
        if !confirm {
            ctx.send(
                poise::CreateReply::default()
                    .content("Deletion cancelled. Pass `confirm: True` to delete the goal permanently.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            let notice = match tracker.delete_record(goal_id).await {
                Some(applied) => render::outcome_notice(
                    format!("🗑️ Deleted goal **{}**.", applied.value.name),
                    &applied.persistence,
                ),
                None => "ℹ️ That goal was already gone.".to_string(),
            };
            render::screen_reply(&tracker, Some(notice))?
        };

        ctx.send(reply).await?;
        Ok(())
    }

    /// Shows the list of goals on the current tab.
    #[poise::command(slash_command, owners_only, rename = "list")]
    pub async fn goal_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            tracker.go_home();
            render::screen_reply(&tracker, None)?
        };
        ctx.send(reply).await?;
        Ok(())
    }

    /// Opens a goal's detail view.
    #[poise::command(slash_command, owners_only, rename = "open")]
    pub async fn goal_open(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Goal to open"]
        #[autocomplete = "autocomplete::autocomplete_goal"]
        goal_id: i64,
    ) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            if tracker.open_detail(goal_id) {
                render::screen_reply(&tracker, None)?
            } else {
                render::error_reply(Error::RecordNotFound { id: goal_id }, tracker.display())?
            }
        };
        ctx.send(reply).await?;
        Ok(())
    }

    /// Closes the detail view and returns to the list.
    #[poise::command(slash_command, owners_only, rename = "home")]
    pub async fn goal_home(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            tracker.go_home();
            render::screen_reply(&tracker, None)?
        };
        ctx.send(reply).await?;
        Ok(())
    }

    /// Switches the list between active and completed goals.
    #[poise::command(slash_command, owners_only, rename = "tab")]
    pub async fn goal_tab(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Which goals to show"] tab: TabChoice,
    ) -> Result<()> {
        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            tracker.set_filter(tab.into());
            tracker.go_home();
            render::screen_reply(&tracker, None)?
        };
        ctx.send(reply).await?;
        Ok(())
    }

    /// Changes how the list is ordered.
    #[poise::command(slash_command, owners_only, rename = "sort")]
    pub async fn goal_sort(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sort by"] key: SortKeyChoice,
        #[description = "Direction (default: ascending)"] direction: Option<DirectionChoice>,
    ) -> Result<()> {
        let key = match key {
            SortKeyChoice::Name => SortKey::Name,
            SortKeyChoice::Goal => SortKey::Goal,
        };
        let direction = match direction {
            Some(DirectionChoice::Descending) => SortDirection::Descending,
            Some(DirectionChoice::Ascending) | None => SortDirection::Ascending,
        };

        let reply = {
            let mut tracker = ctx.data().tracker.lock().await;
            tracker.set_sort(SortOrder::new(key, direction));
            tracker.go_home();
            render::screen_reply(&tracker, None)?
        };
        ctx.send(reply).await?;
        Ok(())
    }
}

pub use inner::*;
