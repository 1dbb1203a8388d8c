// Help command - show usage guide

use poise::serenity_prelude as serenity;
use crate::{Context, Error};
use crate::utils::config::colors;
use crate::utils::thresholds::Indicator;

/// Show help and usage guide
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("📚 FACEIT Scout - Help")
        .description("Look up FACEIT CS2 stats without leaving Discord")
        .color(colors::PRIMARY)
        .field(
            "🔎 Lookup",
            "`/faceit query:<input>` - Player stats\n\
            Input can be a Steam ID64, a Steam profile URL \
            (`/profiles/…` or `/id/…`) or a FACEIT nickname.\n\
            `/faceit` with no input repeats your last search (24h)",
            false,
        )
        .field(
            "🕒 Recent Matches",
            "`/faceit matches:Last 10 matches` - Choose the window (10, 20 or 30)",
            false,
        )
        .field(
            "🕘 History",
            "`/history list` - Your recent lookups\n\
            `/history clear` - Forget them",
            false,
        )
        .field(
            "🎨 Indicators",
            format!(
                "{} above average • {} around average • {} below average",
                Indicator::Good.emoji(),
                Indicator::Average.emoji(),
                Indicator::Bad.emoji()
            ),
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(
            "Data from the FACEIT and Steam Web APIs • Built with Serenity & Poise",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
