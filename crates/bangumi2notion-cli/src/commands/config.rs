use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_file: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config_file, output),
    }
}

fn show_config(config_file: Option<&Path>, output: &Output) -> Result<()> {
    let settings = super::load_settings(config_file, output)?;

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "bangumi": {
                    "username": settings.bangumi.username,
                    "access_token": mask(&settings.bangumi.access_token),
                    "user_agent": settings.bangumi.user_agent,
                },
                "notion": {
                    "api_key": mask(&settings.notion.api_key),
                    "database_id": settings.notion.database_id,
                },
                "sync": {
                    "tag_limit": settings.sync.tag_limit,
                    "item_delay_ms": settings.sync.item_delay_ms,
                },
            }));
        }
        OutputFormat::Human => {
            output.info("Bangumi:");
            output.info(format!("  username:      {}", settings.bangumi.username));
            output.info(format!(
                "  access_token:  {}",
                mask(&settings.bangumi.access_token)
            ));
            output.info(format!("  user_agent:    {}", settings.bangumi.user_agent));
            output.info("Notion:");
            output.info(format!("  api_key:       {}", mask(&settings.notion.api_key)));
            output.info(format!("  database_id:   {}", settings.notion.database_id));
            output.info("Sync:");
            output.info(format!("  tag_limit:     {}", settings.sync.tag_limit));
            output.info(format!("  item_delay_ms: {}", settings.sync.item_delay_ms));
        }
    }

    Ok(())
}

fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}
