//! `list`, `delete` and `entities` commands.

use super::common::{print_info, print_success, CliContext};
use crate::model::{Card, EntityKind};
use anyhow::{Context, Result};

/// One line per entity: CLI name, title and endpoint path.
pub fn entity_table() -> Vec<String> {
    EntityKind::ALL
        .iter()
        .map(|kind| format!("{:<16} {:<16} /{}/", kind.cli_name(), kind.title(), kind.path()))
        .collect()
}

/// Plain-text rendering of a card: the title, then each line indented.
pub fn format_card(id: i64, card: &Card) -> String {
    let mut out = format!("#{} {}", id, card.title);
    for line in &card.lines {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

pub async fn list(ctx: &CliContext, kind: EntityKind, json: bool) -> Result<()> {
    if json {
        let body = ctx
            .client
            .list_raw(kind)
            .await
            .with_context(|| format!("Failed to fetch {}", kind.title()))?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).context("Backend returned malformed JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let records = ctx
        .client
        .list(kind)
        .await
        .with_context(|| format!("Failed to fetch {}", kind.title()))?;
    if records.is_empty() {
        print_info(&format!("No {} yet", kind.title().to_lowercase()));
        return Ok(());
    }
    for record in &records {
        println!("{}\n", format_card(record.id(), &record.card()));
    }
    Ok(())
}

pub async fn delete(ctx: &CliContext, kind: EntityKind, id: i64) -> Result<()> {
    ctx.client
        .delete(kind, id)
        .await
        .with_context(|| format!("Failed to delete {} #{}", kind.singular(), id))?;
    print_success(&format!("Deleted {} #{}", kind.singular(), id));
    Ok(())
}
