//! Rendering of list and detail views for Discord.
//!
//! Text builders are plain functions over the derived views so they can be tested
//! without a Discord connection; [`detail_reply`] wraps the detail text in an embed.

use crate::{
    config::DisplaySettings,
    core::{
        format::{
            format_currency, format_date, format_history_amount, format_progress_bar,
            format_timestamp,
        },
        image::{decode_data_uri, extension_for},
        store::{SortDirection, SortKey, SortOrder, Tab},
        tracker::{Persistence, SavingsTracker},
        view::{DetailView, ListItem},
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::fmt::Write;

/// History entries shown on the detail view.
const HISTORY_LIMIT: usize = 10;

/// Embed colour used for goals still in progress.
const ACTIVE_COLOR: u32 = 0x0034_98DB;
/// Embed colour used for completed goals.
const COMPLETE_COLOR: u32 = 0x002E_CC71;

/// Human label for a list tab.
#[must_use]
pub const fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Active => "Active",
        Tab::Complete => "Complete",
    }
}

/// Human label for a sort order, e.g. `name ↑`.
#[must_use]
pub fn sort_label(sort: SortOrder) -> String {
    let key = match sort.key {
        SortKey::Name => "name",
        SortKey::Goal => "goal",
    };
    let arrow = match sort.direction {
        SortDirection::Ascending => '↑',
        SortDirection::Descending => '↓',
    };
    format!("{key} {arrow}")
}

/// Discord's limit on message content, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Room kept free for the "…and N more" line.
const MORE_LINE_RESERVE: usize = 32;

const LIST_FOOTER: &str = "Open one with `/goal open`.";

/// Renders the list view as a message of at most `max_chars` characters.
///
/// Cards that do not fit are summarised as "…and N more".
pub fn list_message(
    items: &[ListItem],
    tab: Tab,
    sort: SortOrder,
    display: &DisplaySettings,
    max_chars: usize,
) -> Result<String> {
    let mut response = format!(
        "🐷 **{} goals** (sorted by {})\n\n",
        tab_label(tab),
        sort_label(sort)
    );

    if items.is_empty() {
        let hint = match tab {
            Tab::Active => "No active goals. Create one with `/goal create` to get started!",
            Tab::Complete => "No completed goals yet. Keep saving!",
        };
        response.push_str(hint);
        return Ok(response);
    }

    let mut used = response.chars().count() + LIST_FOOTER.chars().count();
    for (shown, item) in items.iter().enumerate() {
        let card = list_card(item, display)?;
        let card_len = card.chars().count();
        let is_last = shown + 1 == items.len();
        let reserve = if is_last { 0 } else { MORE_LINE_RESERVE };

        if used + card_len + reserve > max_chars {
            writeln!(&mut response, "_…and {} more_\n", items.len() - shown)?;
            break;
        }
        used += card_len;
        response.push_str(&card);
    }

    response.push_str(LIST_FOOTER);
    Ok(response)
}

fn list_card(item: &ListItem, display: &DisplaySettings) -> Result<String> {
    let mut card = String::new();
    writeln!(
        &mut card,
        "**{}** - {} · {} / {}",
        item.name,
        format_currency(item.goal, display),
        format_currency(item.saving_amount, display),
        item.frequency
    )?;
    writeln!(
        &mut card,
        "{} · {} · id `{}`",
        format_progress_bar(item.percent_complete, display.progress_bar_length),
        item.estimation,
        item.id
    )?;
    writeln!(&mut card)?;
    Ok(card)
}

/// Renders the body of the detail view.
pub fn detail_text(detail: &DetailView, display: &DisplaySettings) -> Result<String> {
    let item = &detail.item;
    let mut response = String::new();

    writeln!(
        &mut response,
        "🎯 **Goal:** {}",
        format_currency(item.goal, display)
    )?;
    writeln!(
        &mut response,
        "📅 **Plan:** {} per {}",
        format_currency(item.saving_amount, display),
        item.frequency
    )?;
    writeln!(
        &mut response,
        "🗓️ **Created:** {}",
        format_date(&detail.created_date)
    )?;
    writeln!(&mut response)?;
    writeln!(
        &mut response,
        "**Progress:** {}",
        format_progress_bar(item.percent_complete, display.progress_bar_length)
    )?;
    writeln!(&mut response, "**Estimation:** {}", item.estimation)?;
    writeln!(
        &mut response,
        "💰 **Collected:** {} | **Remaining:** {}",
        format_currency(detail.collected, display),
        format_currency(detail.remaining, display)
    )?;
    writeln!(
        &mut response,
        "🔔 **Reminder:** {}",
        if detail.reminder_on { "On" } else { "Off" }
    )?;
    writeln!(&mut response)?;

    if detail.history.is_empty() {
        response.push_str("_No transactions yet_");
    } else {
        response.push_str("**History:**\n");
        for entry in detail.history.iter().take(HISTORY_LIMIT) {
            writeln!(
                &mut response,
                "• {} `{}`",
                format_timestamp(&entry.date),
                format_history_amount(entry, display)
            )?;
        }
        if detail.history.len() > HISTORY_LIMIT {
            write!(
                &mut response,
                "_…and {} older_",
                detail.history.len() - HISTORY_LIMIT
            )?;
        }
    }

    Ok(response)
}

/// Builds the detail view reply: an embed, with the stored image re-attached when
/// the goal has one.
pub fn detail_reply(detail: &DetailView, display: &DisplaySettings) -> Result<poise::CreateReply> {
    let item = &detail.item;
    let color = if item.percent_complete >= 100 {
        COMPLETE_COLOR
    } else {
        ACTIVE_COLOR
    };

    let mut embed = serenity::CreateEmbed::default()
        .title(format!("🐷 {}", item.name))
        .description(detail_text(detail, display)?)
        .color(color)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "id {} · /deposit · /withdraw · /goal home",
            item.id
        )));

    let mut reply = poise::CreateReply::default();
    match image_source(item, display) {
        ImageSource::Attachment { filename, bytes } => {
            embed = embed.image(format!("attachment://{filename}"));
            reply = reply.attachment(serenity::CreateAttachment::bytes(bytes, filename));
        }
        ImageSource::Url(url) => embed = embed.image(url),
    }

    Ok(reply.embed(embed))
}

/// Where the detail embed takes its picture from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Decoded upload, re-attached to the message under `filename`
    Attachment {
        /// Name referenced by `attachment://`
        filename: String,
        /// Raw image bytes
        bytes: Vec<u8>,
    },
    /// Remote image
    Url(String),
}

/// Picks the image for a card. A data URI that cannot be decoded falls back to the
/// placeholder, since Discord only accepts real URLs.
#[must_use]
pub fn image_source(item: &ListItem, display: &DisplaySettings) -> ImageSource {
    if let Some((mime, bytes)) = decode_data_uri(&item.image) {
        return ImageSource::Attachment {
            filename: format!("goal-{}.{}", item.id, extension_for(&mime)),
            bytes,
        };
    }

    if item.image.starts_with("data:") {
        tracing::warn!(record_id = item.id, "Stored image is not a valid data URI");
        return ImageSource::Url(display.placeholder_image.clone());
    }
    ImageSource::Url(item.image.clone())
}

/// Renders whichever screen the tracker is on, with an optional notice above it.
///
/// On the detail view the reply is the goal's embed; on the list view it is the
/// filtered, sorted list as text.
pub fn screen_reply(tracker: &SavingsTracker, notice: Option<String>) -> Result<poise::CreateReply> {
    if let Some(detail) = tracker.detail_view() {
        let reply = detail_reply(&detail, tracker.display())?;
        return Ok(match notice {
            Some(notice) => reply.content(notice),
            None => reply,
        });
    }

    let controller = tracker.controller();
    let budget = notice.as_ref().map_or(MESSAGE_LIMIT, |notice| {
        MESSAGE_LIMIT.saturating_sub(notice.chars().count() + 2)
    });
    let list = list_message(
        &tracker.list_view(),
        controller.tab(),
        controller.sort(),
        tracker.display(),
        budget,
    )?;
    let content = match notice {
        Some(notice) => format!("{notice}\n\n{list}"),
        None => list,
    };
    Ok(poise::CreateReply::default().content(content))
}

/// Joins a success message with the save warning, if the save failed.
#[must_use]
pub fn outcome_notice(message: impl Into<String>, persistence: &Persistence) -> String {
    let message = message.into();
    match persistence_note(persistence) {
        Some(note) => format!("{message}\n{note}"),
        None => message,
    }
}

/// Turns a user-fixable error into an ephemeral reply, passing anything else through.
pub fn error_reply(error: Error, display: &DisplaySettings) -> Result<poise::CreateReply> {
    let message = user_error_message(&error, display).ok_or(error)?;
    Ok(poise::CreateReply::default()
        .content(message)
        .ephemeral(true))
}

/// Warning appended to a reply when the change could not be written.
#[must_use]
pub fn persistence_note(persistence: &Persistence) -> Option<String> {
    match persistence {
        Persistence::Saved => None,
        Persistence::Failed(reason) => Some(format!(
            "⚠️ The change is applied but could not be saved ({reason}). Run `/save_retry` to try again."
        )),
    }
}

/// Inline message for errors the user can fix; `None` for anything else.
#[must_use]
pub fn user_error_message(error: &Error, display: &DisplaySettings) -> Option<String> {
    let message = match error {
        Error::Validation { message } => format!("❌ {message}"),
        Error::InvalidAmount { .. } => {
            "❌ Enter a valid amount (a whole number greater than zero).".to_string()
        }
        Error::InsufficientFunds {
            available,
            requested,
        } => format!(
            "❌ Insufficient balance! You have {} but tried to withdraw {}.",
            format_currency(*available, display),
            format_currency(*requested, display)
        ),
        Error::RecordNotFound { .. } => {
            "❌ That goal no longer exists. Use `/goal list` to see your goals.".to_string()
        }
        Error::NoRecordOpen => {
            "❌ Open a goal first with `/goal open`.".to_string()
        }
        _ => return None,
    };
    Some(message)
}
