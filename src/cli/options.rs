use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};

use crate::options;

pub fn show(json: bool) -> Result<()> {
    let options = options::load_options()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Browsers", "Operating systems"]);

    let rows = options.browser.len().max(options.os.len());
    for i in 0..rows {
        table.add_row(vec![
            options.browser.get(i).cloned().unwrap_or_default(),
            options.os.get(i).cloned().unwrap_or_default(),
        ]);
    }

    println!("{table}");

    Ok(())
}
