use anyhow::{anyhow, Result};
use bgm_sync_models::{DatabaseRecord, PropertyMap, PropertyValue};
use serde_json::{json, Map, Value};

/// Serialize a property map into the Notion page-properties wire shape.
pub fn to_wire(properties: &PropertyMap) -> Value {
    let mut wire = Map::new();
    for (name, value) in properties {
        wire.insert(name.clone(), value_to_wire(value));
    }
    Value::Object(wire)
}

fn value_to_wire(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Select(name) => json!({ "select": { "name": name } }),
        PropertyValue::Number(number) => json!({ "number": number }),
        PropertyValue::MultiSelect(names) => json!({
            "multi_select": names.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>()
        }),
        PropertyValue::RichText(text) => json!({
            "rich_text": [{ "type": "text", "text": { "content": text } }]
        }),
        PropertyValue::Date(start) => json!({ "date": { "start": start } }),
        PropertyValue::Url(url) => json!({ "url": url }),
        PropertyValue::Title(text) => json!({
            "title": [{ "text": { "content": text } }]
        }),
        PropertyValue::ExternalFile { name, url } => json!({
            "files": [{ "name": name, "type": "external", "external": { "url": url } }]
        }),
    }
}

/// Normalize a page object from the query endpoint into a flat record.
/// Properties with null or unsupported values are simply absent.
pub fn record_from_page(page: &Value) -> Result<DatabaseRecord> {
    let id = page["id"]
        .as_str()
        .ok_or_else(|| anyhow!("page object without an id"))?;

    let mut properties = PropertyMap::new();
    if let Some(wire) = page["properties"].as_object() {
        for (name, prop) in wire {
            if let Some(value) = value_from_wire(prop) {
                properties.insert(name.clone(), value);
            }
        }
    }

    Ok(DatabaseRecord {
        id: id.to_string(),
        properties,
    })
}

fn value_from_wire(prop: &Value) -> Option<PropertyValue> {
    match prop["type"].as_str()? {
        "select" => prop["select"]["name"]
            .as_str()
            .map(|name| PropertyValue::Select(name.to_string())),
        "number" => prop["number"].as_f64().map(PropertyValue::Number),
        "multi_select" => {
            let names = prop["multi_select"]
                .as_array()?
                .iter()
                .filter_map(|option| option["name"].as_str())
                .map(str::to_string)
                .collect();
            Some(PropertyValue::MultiSelect(names))
        }
        // Stored text is split into fragments; flatten to plain text so
        // the engine compares whole values.
        "rich_text" => Some(PropertyValue::RichText(concat_plain_text(
            prop["rich_text"].as_array()?,
        ))),
        "title" => Some(PropertyValue::Title(concat_plain_text(
            prop["title"].as_array()?,
        ))),
        "date" => prop["date"]["start"]
            .as_str()
            .map(|start| PropertyValue::Date(start.to_string())),
        "url" => prop["url"]
            .as_str()
            .map(|url| PropertyValue::Url(url.to_string())),
        "files" => {
            let file = prop["files"].as_array()?.first()?;
            let url = file["external"]["url"].as_str()?;
            Some(PropertyValue::ExternalFile {
                name: file["name"].as_str().unwrap_or(url).to_string(),
                url: url.to_string(),
            })
        }
        _ => None,
    }
}

fn concat_plain_text(fragments: &[Value]) -> String {
    fragments
        .iter()
        .filter_map(|fragment| fragment["plain_text"].as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wire_shapes() {
        let mut properties = PropertyMap::new();
        properties.insert(
            "状态".to_string(),
            PropertyValue::Select("在看".to_string()),
        );
        properties.insert(
            "简介".to_string(),
            PropertyValue::RichText("A great show.".to_string()),
        );
        properties.insert(
            "封面".to_string(),
            PropertyValue::ExternalFile {
                name: "https://img/c.jpg".to_string(),
                url: "https://img/c.jpg".to_string(),
            },
        );

        let wire = to_wire(&properties);
        assert_eq!(wire["状态"]["select"]["name"], "在看");
        assert_eq!(wire["简介"]["rich_text"][0]["text"]["content"], "A great show.");
        assert_eq!(wire["封面"]["files"][0]["type"], "external");
        assert_eq!(wire["封面"]["files"][0]["external"]["url"], "https://img/c.jpg");
    }

    #[test]
    fn test_record_from_page_concatenates_text_fragments() {
        let page = serde_json::json!({
            "id": "page-42",
            "properties": {
                "状态": { "type": "select", "select": { "name": "想看" } },
                "我的评分": { "type": "select", "select": null },
                "观看进度": { "type": "number", "number": 7 },
                "标签": { "type": "multi_select", "multi_select": [
                    { "name": "科幻" }, { "name": "太空" }
                ]},
                "简介": { "type": "rich_text", "rich_text": [
                    { "plain_text": "Part one, " },
                    { "plain_text": "part two." }
                ]}
            }
        });

        let record = record_from_page(&page).unwrap();
        assert_eq!(record.id, "page-42");
        assert_eq!(record.select("状态"), Some("想看"));
        // A null select is absent, not an empty string
        assert_eq!(record.select("我的评分"), None);
        assert_eq!(record.number("观看进度"), Some(7.0));
        assert_eq!(
            record.multi_select("标签"),
            Some(["科幻".to_string(), "太空".to_string()].as_slice())
        );
        assert_eq!(record.rich_text("简介"), Some("Part one, part two."));
    }

    #[test]
    fn test_record_from_page_requires_an_id() {
        let page = serde_json::json!({ "properties": {} });
        assert!(record_from_page(&page).is_err());
    }
}
