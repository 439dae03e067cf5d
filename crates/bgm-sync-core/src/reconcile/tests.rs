use super::*;
use bgm_sync_models::SubjectTag;

fn tag(name: &str) -> SubjectTag {
    SubjectTag {
        name: name.to_string(),
        count: 100,
    }
}

fn sample_entry() -> CollectionEntry {
    CollectionEntry {
        subject_id: 253,
        name: "カウボーイビバップ".to_string(),
        name_cn: "星际牛仔".to_string(),
        air_date: Some("1998-04-03".to_string()),
        cover_url: Some("https://lain.bgm.tv/pic/cover/l/253.jpg".to_string()),
        community_score: 9.1,
        total_episodes: 26,
        tags: vec![tag("科幻"), tag("太空"), tag("赏金猎人")],
        summary: "A great show.".to_string(),
        rating: 9,
        progress: 12,
    }
}

/// A page storing exactly what a sync of `entry` would have written.
fn record_for(
    entry: &CollectionEntry,
    status: CollectionStatus,
    category: SubjectCategory,
    tag_limit: usize,
) -> DatabaseRecord {
    DatabaseRecord {
        id: "page-1".to_string(),
        properties: build_properties(entry, status, category, tag_limit, Utc::now()),
    }
}

#[test]
fn test_missing_record_requires_create_with_all_required_fields() {
    let entry = sample_entry();
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        None,
        10,
        Utc::now(),
    );

    let SyncDecision::Create(properties) = decision else {
        panic!("expected a create decision");
    };
    for required in [
        names::SUBJECT_ID,
        names::TITLE,
        names::STATUS,
        names::CATEGORY,
        names::SUBJECT_URL,
        names::LAST_SYNCED,
        names::PROGRESS,
    ] {
        assert!(properties.contains_key(required), "missing {}", required);
    }
    assert_eq!(
        properties.get(names::TITLE),
        Some(&PropertyValue::Title("星际牛仔".to_string()))
    );
}

#[test]
fn test_matching_record_needs_no_action() {
    let entry = sample_entry();
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_progress_change_flips_to_update() {
    let entry = sample_entry();
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);

    let mut advanced = entry.clone();
    advanced.progress = 13;
    let decision = decide(
        &advanced,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );

    let SyncDecision::Update { page_id, properties } = decision else {
        panic!("expected an update decision");
    };
    assert_eq!(page_id, "page-1");
    assert_eq!(
        properties.get(names::PROGRESS),
        Some(&PropertyValue::Number(13.0))
    );
}

#[test]
fn test_tag_order_does_not_trigger_an_update() {
    let entry = sample_entry();
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);

    let mut permuted = entry.clone();
    permuted.tags.reverse();
    let decision = decide(
        &permuted,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_tags_beyond_the_limit_do_not_trigger_an_update() {
    let entry = sample_entry();
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 3);

    let mut extended = entry.clone();
    extended.tags.push(tag("爵士"));
    let decision = decide(
        &extended,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        3,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_rating_zero_is_absent_and_seven_is_a_select() {
    let mut unrated = sample_entry();
    unrated.rating = 0;
    let properties = build_properties(
        &unrated,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        10,
        Utc::now(),
    );
    assert!(!properties.contains_key(names::RATING));

    let mut rated = sample_entry();
    rated.rating = 7;
    let properties = build_properties(
        &rated,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        10,
        Utc::now(),
    );
    assert_eq!(
        properties.get(names::RATING),
        Some(&PropertyValue::Select("7".to_string()))
    );
}

#[test]
fn test_unrated_on_both_sides_is_equal() {
    let mut entry = sample_entry();
    entry.rating = 0;
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_summary_comparison_ignores_surrounding_whitespace() {
    let mut stored = sample_entry();
    stored.summary = "Hello".to_string();
    let record = record_for(&stored, CollectionStatus::Watching, SubjectCategory::Anime, 10);

    let mut padded = sample_entry();
    padded.summary = " Hello ".to_string();
    let decision = decide(
        &padded,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_absent_values_are_omitted_from_the_payload() {
    let mut sparse = sample_entry();
    sparse.community_score = 0.0;
    sparse.total_episodes = 0;
    sparse.air_date = None;
    sparse.cover_url = None;
    sparse.tags.clear();
    sparse.summary.clear();
    sparse.progress = 0;

    let properties = build_properties(
        &sparse,
        CollectionStatus::Wishlist,
        SubjectCategory::Anime,
        10,
        Utc::now(),
    );
    for omitted in [
        names::COMMUNITY_SCORE,
        names::TOTAL_EPISODES,
        names::AIR_DATE,
        names::COVER,
        names::TAGS,
        names::SUMMARY,
    ] {
        assert!(!properties.contains_key(omitted), "unexpected {}", omitted);
    }
    // Progress is written even when zero
    assert_eq!(
        properties.get(names::PROGRESS),
        Some(&PropertyValue::Number(0.0))
    );
}

#[test]
fn test_create_payload_end_to_end() {
    let entry = sample_entry();
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        None,
        10,
        Utc::now(),
    );

    let SyncDecision::Create(properties) = decision else {
        panic!("expected a create decision");
    };
    assert_eq!(
        properties.get(names::RATING),
        Some(&PropertyValue::Select("9".to_string()))
    );
    assert_eq!(
        properties.get(names::PROGRESS),
        Some(&PropertyValue::Number(12.0))
    );
    assert_eq!(
        properties.get(names::TAGS),
        Some(&PropertyValue::MultiSelect(vec![
            "科幻".to_string(),
            "太空".to_string(),
            "赏金猎人".to_string()
        ]))
    );
    assert_eq!(
        properties.get(names::SUMMARY),
        Some(&PropertyValue::RichText("A great show.".to_string()))
    );
}

#[test]
fn test_status_change_produces_update_with_new_status() {
    let entry = sample_entry();
    let record = record_for(&entry, CollectionStatus::Wishlist, SubjectCategory::Anime, 10);

    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );

    let SyncDecision::Update { properties, .. } = decision else {
        panic!("expected an update decision");
    };
    assert_eq!(
        properties.get(names::STATUS),
        Some(&PropertyValue::Select("在看".to_string()))
    );
}

#[test]
fn test_long_summary_is_capped_and_converges() {
    let mut entry = sample_entry();
    entry.summary = "很".repeat(2500);

    let properties = build_properties(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        10,
        Utc::now(),
    );
    let Some(PropertyValue::RichText(summary)) = properties.get(names::SUMMARY) else {
        panic!("expected a rich text summary");
    };
    assert_eq!(summary.chars().count(), 2000);

    // A page storing the capped text is considered in sync with the
    // over-length source text on the next run.
    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}

#[test]
fn test_long_tag_names_are_capped_and_converge() {
    let mut entry = sample_entry();
    entry.tags = vec![tag(&"长".repeat(150))];

    let properties = build_properties(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        10,
        Utc::now(),
    );
    let Some(PropertyValue::MultiSelect(tags)) = properties.get(names::TAGS) else {
        panic!("expected a multi-select");
    };
    assert_eq!(tags[0].chars().count(), 100);

    let record = record_for(&entry, CollectionStatus::Watching, SubjectCategory::Anime, 10);
    let decision = decide(
        &entry,
        CollectionStatus::Watching,
        SubjectCategory::Anime,
        Some(&record),
        10,
        Utc::now(),
    );
    assert_eq!(decision, SyncDecision::Unchanged);
}
