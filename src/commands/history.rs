// History command - view and clear your recent lookups

use chrono::Utc;
use poise::serenity_prelude as serenity;

use crate::features::history;
use crate::models::history::SearchHistoryEntry;
use crate::utils::config::colors;
use crate::utils::formatters::{format_relative_time, truncate};
use crate::{Context, Error};

const LIST_LIMIT: usize = 10;

/// Your recent FACEIT lookups
#[poise::command(slash_command, prefix_command, subcommands("list", "clear"))]
pub async fn history(_ctx: Context<'_>) -> Result<(), Error> {
    // Root command, subcommands handle the logic
    Ok(())
}

/// Show your most recent lookups
#[poise::command(slash_command, prefix_command, ephemeral)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let user = ctx.author();
    let entries = history::get_history(ctx.data().store.as_ref(), user.id.get());
    let now = Utc::now().timestamp_millis();

    let description = if entries.is_empty() {
        "*No searches yet. Try `/faceit`!*".to_string()
    } else {
        entries
            .iter()
            .take(LIST_LIMIT)
            .enumerate()
            .map(|(i, entry)| history_line(i + 1, entry, now))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title("🕘 Search History")
        .description(truncate(&description, 4096))
        .color(colors::INFO)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "{} saved • Requested by {}",
            entries.len(),
            user.name
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Forget all of your saved lookups
#[poise::command(slash_command, prefix_command, ephemeral)]
pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    history::clear_history(ctx.data().store.as_ref(), ctx.author().id.get());

    let embed = serenity::CreateEmbed::new()
        .title("🧹 History cleared")
        .description("Your saved searches were removed.")
        .color(colors::SUCCESS);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn history_line(position: usize, entry: &SearchHistoryEntry, now_ms: i64) -> String {
    let label = history::display_name(entry);
    let age = format_relative_time((now_ms - entry.timestamp).max(0) / 1000);

    if label == entry.input {
        format!("**{}.** {} • {}", position, label, age)
    } else {
        format!("**{}.** {} (`{}`) • {}", position, label, entry.input, age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_line() {
        let entry = SearchHistoryEntry {
            input: "76561198012345678".to_string(),
            timestamp: 0,
            player_name: Some("s1mple".to_string()),
            steam_id: None,
        };
        assert_eq!(
            history_line(1, &entry, 2 * 3600 * 1000),
            "**1.** s1mple (`76561198012345678`) • 2 hours ago"
        );

        let bare = SearchHistoryEntry {
            player_name: None,
            input: "ropz".to_string(),
            ..entry
        };
        assert_eq!(history_line(3, &bare, 30_000), "**3.** ropz • just now");
    }
}
