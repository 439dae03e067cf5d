use serde::{Deserialize, Serialize};

/// Collection status of a subject on Bangumi.
///
/// Wire codes follow the Bangumi v0 API `type` query parameter; labels are
/// the select option names used in the Notion database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CollectionStatus {
    /// Plan to watch ("想看", code 1)
    Wishlist,
    /// Finished watching ("看过", code 2)
    Watched,
    /// Currently watching ("在看", code 3)
    Watching,
    /// On hold ("搁置", code 4)
    OnHold,
    /// Abandoned ("抛弃", code 5)
    Dropped,
}

impl CollectionStatus {
    /// All statuses, in the order the sync iterates them.
    pub const ALL: [CollectionStatus; 5] = [
        CollectionStatus::Wishlist,
        CollectionStatus::Watched,
        CollectionStatus::Watching,
        CollectionStatus::OnHold,
        CollectionStatus::Dropped,
    ];

    pub fn code(&self) -> u8 {
        match self {
            CollectionStatus::Wishlist => 1,
            CollectionStatus::Watched => 2,
            CollectionStatus::Watching => 3,
            CollectionStatus::OnHold => 4,
            CollectionStatus::Dropped => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectionStatus::Wishlist => "想看",
            CollectionStatus::Watched => "看过",
            CollectionStatus::Watching => "在看",
            CollectionStatus::OnHold => "搁置",
            CollectionStatus::Dropped => "抛弃",
        }
    }
}

/// Subject category processed by the sync.
///
/// Bangumi also defines book (1), music (3) and game (4) subject types;
/// only the two watched categories are mirrored into the database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubjectCategory {
    /// Anime ("动画", code 2)
    Anime,
    /// Live-action ("三次元", code 6)
    RealLife,
}

impl SubjectCategory {
    pub const ALL: [SubjectCategory; 2] = [SubjectCategory::Anime, SubjectCategory::RealLife];

    pub fn code(&self) -> u8 {
        match self {
            SubjectCategory::Anime => 2,
            SubjectCategory::RealLife => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubjectCategory::Anime => "动画",
            SubjectCategory::RealLife => "三次元",
        }
    }
}
