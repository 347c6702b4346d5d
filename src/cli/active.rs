use anyhow::Result;

use crate::prefs::Preferences;

/// Show or persist the active agent string.
pub fn active(set: Option<String>) -> Result<()> {
    let mut prefs = Preferences::load()?;

    match set {
        Some(ua) => {
            prefs.ua = ua;
            prefs.save()?;
            println!("Active agent updated");
        }
        None => {
            if prefs.ua.is_empty() {
                println!("No active agent set");
            } else {
                println!("{}", prefs.ua);
            }
        }
    }

    Ok(())
}
