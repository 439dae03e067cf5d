use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property names of the target Notion database.
pub mod names {
    pub const SUBJECT_ID: &str = "BGM ID";
    pub const TITLE: &str = "标题";
    pub const STATUS: &str = "状态";
    pub const CATEGORY: &str = "类型";
    pub const RATING: &str = "我的评分";
    pub const PROGRESS: &str = "观看进度";
    pub const COMMUNITY_SCORE: &str = "BGM评分";
    pub const TOTAL_EPISODES: &str = "总集数";
    pub const AIR_DATE: &str = "放送日期";
    pub const COVER: &str = "封面";
    pub const TAGS: &str = "标签";
    pub const SUMMARY: &str = "简介";
    pub const SUBJECT_URL: &str = "BGM链接";
    pub const LAST_SYNCED: &str = "最后同步";
}

/// A destination property value, independent of the Notion wire shape.
///
/// Rich text and title values are already flattened to plain text; the
/// Notion adapter concatenates fragments when reading a page back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PropertyValue {
    Select(String),
    Number(f64),
    MultiSelect(Vec<String>),
    RichText(String),
    Date(String),
    Url(String),
    Title(String),
    ExternalFile { name: String, url: String },
}

/// Flat property map keyed by field name. BTreeMap keeps payload
/// serialization order deterministic across runs.
pub type PropertyMap = BTreeMap<String, PropertyValue>;
