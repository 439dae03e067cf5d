use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "bangumi2notion/0.1";
pub const DEFAULT_TAG_LIMIT: usize = 10;
pub const DEFAULT_ITEM_DELAY_MS: u64 = 400;

/// Environment variables recognized by the loader. These override the
/// config file and are the only way the original CI deployment passes
/// secrets in.
const ENV_BGM_USERNAME: &str = "BGM_USERNAME";
const ENV_BGM_ACCESS_TOKEN: &str = "BGM_ACCESS_TOKEN";
const ENV_BGM_USER_AGENT: &str = "BGM_USER_AGENT";
const ENV_NOTION_API_KEY: &str = "NOTION_API_KEY";
const ENV_NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Names of the missing required inputs, empty for other error kinds.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            ConfigError::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

/// Validated, ready-to-run settings.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub bangumi: BangumiSettings,
    pub notion: NotionSettings,
    pub sync: SyncOptions,
}

#[derive(Debug, Clone)]
pub struct BangumiSettings {
    pub username: String,
    pub access_token: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct NotionSettings {
    pub api_key: String,
    pub database_id: String,
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Tags synced per subject, in source relevance order.
    pub tag_limit: usize,
    /// Pacing delay after each item, for both services' rate limits.
    pub item_delay_ms: u64,
}

/// On-disk shape of the optional config file. Every field is optional;
/// validation happens after the environment overrides are merged in.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    #[serde(default)]
    pub bangumi: PartialBangumi,
    #[serde(default)]
    pub notion: PartialNotion,
    #[serde(default)]
    pub sync: PartialSync,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PartialBangumi {
    pub username: Option<String>,
    pub access_token: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PartialNotion {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PartialSync {
    pub tag_limit: Option<usize>,
    pub item_delay_ms: Option<u64>,
}

impl PartialSettings {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            bangumi: PartialBangumi {
                username: var(ENV_BGM_USERNAME),
                access_token: var(ENV_BGM_ACCESS_TOKEN),
                user_agent: var(ENV_BGM_USER_AGENT),
            },
            notion: PartialNotion {
                api_key: var(ENV_NOTION_API_KEY),
                database_id: var(ENV_NOTION_DATABASE_ID),
            },
            sync: PartialSync::default(),
        }
    }
}

impl SyncSettings {
    /// Load settings from the given config file (skipped when absent) with
    /// environment variables taking precedence. Fails before any network
    /// call when a required credential is missing, naming every missing
    /// input at once.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) if path.exists() => PartialSettings::load_from_file(path)?,
            _ => PartialSettings::default(),
        };
        Self::resolve(file, PartialSettings::from_env())
    }

    /// Merge file and override layers, then validate.
    pub fn resolve(
        file: PartialSettings,
        overrides: PartialSettings,
    ) -> Result<Self, ConfigError> {
        let user_agent = overrides.bangumi.user_agent.or(file.bangumi.user_agent);

        let mut missing = Vec::new();
        let mut require = |value: Option<String>, name: &str| {
            value.unwrap_or_else(|| {
                missing.push(name.to_string());
                String::new()
            })
        };
        let username = require(
            overrides.bangumi.username.or(file.bangumi.username),
            ENV_BGM_USERNAME,
        );
        let access_token = require(
            overrides.bangumi.access_token.or(file.bangumi.access_token),
            ENV_BGM_ACCESS_TOKEN,
        );
        let api_key = require(
            overrides.notion.api_key.or(file.notion.api_key),
            ENV_NOTION_API_KEY,
        );
        let database_id = require(
            overrides.notion.database_id.or(file.notion.database_id),
            ENV_NOTION_DATABASE_ID,
        );
        if !missing.is_empty() {
            return Err(ConfigError::MissingFields(missing));
        }

        Ok(Self {
            bangumi: BangumiSettings {
                username,
                access_token,
                user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            },
            notion: NotionSettings {
                api_key,
                database_id,
            },
            sync: SyncOptions {
                tag_limit: overrides
                    .sync
                    .tag_limit
                    .or(file.sync.tag_limit)
                    .unwrap_or(DEFAULT_TAG_LIMIT),
                item_delay_ms: overrides
                    .sync
                    .item_delay_ms
                    .or(file.sync.item_delay_ms)
                    .unwrap_or(DEFAULT_ITEM_DELAY_MS),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn complete_file() -> PartialSettings {
        PartialSettings {
            bangumi: PartialBangumi {
                username: Some("feng".to_string()),
                access_token: Some("bgm-token".to_string()),
                user_agent: None,
            },
            notion: PartialNotion {
                api_key: Some("secret".to_string()),
                database_id: Some("db-1".to_string()),
            },
            sync: PartialSync::default(),
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let settings = SyncSettings::resolve(complete_file(), PartialSettings::default()).unwrap();
        assert_eq!(settings.bangumi.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(settings.sync.tag_limit, 10);
        assert_eq!(settings.sync.item_delay_ms, 400);
    }

    #[test]
    fn test_resolve_reports_every_missing_field() {
        let err =
            SyncSettings::resolve(PartialSettings::default(), PartialSettings::default())
                .unwrap_err();
        assert_eq!(
            err.missing_fields(),
            [
                "BGM_USERNAME",
                "BGM_ACCESS_TOKEN",
                "NOTION_API_KEY",
                "NOTION_DATABASE_ID"
            ]
        );
    }

    #[test]
    fn test_overrides_take_precedence_over_file() {
        let overrides = PartialSettings {
            bangumi: PartialBangumi {
                username: Some("other".to_string()),
                ..PartialBangumi::default()
            },
            ..PartialSettings::default()
        };
        let settings = SyncSettings::resolve(complete_file(), overrides).unwrap();
        assert_eq!(settings.bangumi.username, "other");
        assert_eq!(settings.bangumi.access_token, "bgm-token");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[bangumi]
username = "feng"
access_token = "bgm-token"

[notion]
api_key = "secret"
database_id = "db-1"

[sync]
tag_limit = 5
"#
        )
        .unwrap();

        let partial = PartialSettings::load_from_file(file.path()).unwrap();
        let settings = SyncSettings::resolve(partial, PartialSettings::default()).unwrap();
        assert_eq!(settings.bangumi.username, "feng");
        assert_eq!(settings.sync.tag_limit, 5);
        assert_eq!(settings.sync.item_delay_ms, 400);
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        let err = PartialSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
