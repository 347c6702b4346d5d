use serde::{Deserialize, Serialize};

/// A browser or operating system identity as advertised by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Identity {
    /// Display form, e.g. `"Chrome 120.0.0"` or just `"Chrome"`.
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.name, version),
            None => self.name.clone(),
        }
    }
}

/// One catalog entry: a browser/OS pair and the literal identity string it
/// advertises.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentRecord {
    pub browser: Identity,
    pub os: Identity,
    pub ua: String,
}

/// Agents for a single (browser, OS) key. Source order carries no meaning;
/// the ranker re-derives the order on every pass.
pub type Catalog = Vec<AgentRecord>;

#[cfg(test)]
pub(crate) fn record(browser_version: &str, ua: &str) -> AgentRecord {
    AgentRecord {
        browser: Identity {
            name: "Chrome".to_string(),
            version: Some(browser_version.to_string()),
        },
        os: Identity {
            name: "Windows".to_string(),
            version: Some("10".to_string()),
        },
        ua: ua.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "browser": {"name": "Chrome", "version": "120.0.0"},
            "os": {"name": "Windows", "version": "10"},
            "ua": "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0"
        }"#;
        let record: AgentRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.browser.name, "Chrome");
        assert_eq!(record.browser.version.as_deref(), Some("120.0.0"));
        assert!(record.ua.contains("Chrome/120.0.0"));
    }

    #[test]
    fn test_version_is_optional() {
        let json = r#"{"browser": {"name": "Safari"}, "os": {"name": "Mac OS"}, "ua": "ua"}"#;
        let record: AgentRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.browser.version, None);
        assert_eq!(record.os.label(), "Mac OS");
    }

    #[test]
    fn test_identity_label() {
        let id = Identity {
            name: "Firefox".to_string(),
            version: Some("115.0".to_string()),
        };
        assert_eq!(id.label(), "Firefox 115.0");
    }
}
