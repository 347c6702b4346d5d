use std::sync::Arc;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};

use crate::controller::{AgentListController, RenderTarget};
use crate::fetch::CatalogFetcher;
use crate::prefs::Preferences;
use crate::rank::{RankedRow, SortDirection};

/// Collects the pipeline output for one-shot printing.
#[derive(Default)]
struct CollectedRows {
    rows: Vec<RankedRow>,
}

impl RenderTarget for CollectedRows {
    fn set_loading(&mut self, _loading: bool) {}

    fn replace_rows(&mut self, rows: Vec<RankedRow>) {
        self.rows = rows;
    }
}

pub async fn agents(
    browser: Option<String>,
    os: Option<String>,
    sort: Option<SortDirection>,
    json: bool,
) -> Result<()> {
    let prefs = Preferences::load()?;
    let mut selection = prefs.selection();
    if let Some(browser) = browser {
        selection.browser = browser;
    }
    if let Some(os) = os {
        selection.os = os;
    }
    if let Some(sort) = sort {
        selection.sort = sort;
    }

    let mut controller = AgentListController::new(Arc::new(CatalogFetcher::new()));
    let mut collected = CollectedRows::default();
    controller.refresh(&selection, &mut collected).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&collected.rows)?);
        return Ok(());
    }

    if collected.rows.is_empty() {
        println!(
            "No agents found for {} on {}",
            selection.browser, selection.os
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "", "Browser", "OS", "User-Agent"]);

    for row in &collected.rows {
        table.add_row(vec![
            row.rank.to_string(),
            if row.is_active { "●".to_string() } else { String::new() },
            row.record.browser.label(),
            row.record.os.label(),
            row.record.ua.clone(),
        ]);
    }

    println!("{table}");

    Ok(())
}
