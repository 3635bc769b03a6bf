//! Common types shared by the filter, the sorter and the report session.
//!
//! The view state is kept as a plain serializable value so that visibility
//! and order can always be recomputed from it without any rendering surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field a container list can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    ItemCount,
    VolumeUtilization,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [
        SortKey::Id,
        SortKey::ItemCount,
        SortKey::VolumeUtilization,
    ];

    /// Canonical name, as accepted by [`SortKey::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::ItemCount => "itemCount",
            SortKey::VolumeUtilization => "volumeUtilization",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a sort key name is not one of the supported keys.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "itemcount" | "item_count" | "items" => Ok(SortKey::ItemCount),
            "volumeutilization" | "volume_utilization" | "utilization" => {
                Ok(SortKey::VolumeUtilization)
            }
            _ => Err(UnknownSortKey(raw.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a sort direction cannot be interpreted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}' (expected asc or desc)")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "up" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "down" => Ok(SortOrder::Descending),
            _ => Err(UnknownSortOrder(raw.to_string())),
        }
    }
}

/// A (key, direction) pair as chosen by the sort controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// Everything the viewer has chosen so far.
///
/// `sort` stays `None` until the first sort; the store then shows the
/// producer's original placement order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: String,
    pub sort: Option<SortSpec>,
}

impl ViewState {
    /// Filter text after trimming and lowercasing.
    pub fn normalized_filter(&self) -> String {
        normalize_filter(&self.filter)
    }
}

/// Normalizes a search term: surrounding whitespace removed, lowercased.
pub fn normalize_filter(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_accepts_aliases() {
        assert_eq!("id".parse::<SortKey>(), Ok(SortKey::Id));
        assert_eq!("itemCount".parse::<SortKey>(), Ok(SortKey::ItemCount));
        assert_eq!("ITEM_COUNT".parse::<SortKey>(), Ok(SortKey::ItemCount));
        assert_eq!(
            " volumeUtilization ".parse::<SortKey>(),
            Ok(SortKey::VolumeUtilization)
        );
        assert_eq!(
            "utilization".parse::<SortKey>(),
            Ok(SortKey::VolumeUtilization)
        );
    }

    #[test]
    fn sort_key_rejects_unknown_names() {
        assert_eq!(
            "weight".parse::<SortKey>(),
            Err(UnknownSortKey("weight".to_string()))
        );
        assert!("".parse::<SortKey>().is_err());
    }

    #[test]
    fn sort_key_names_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.name().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!("Descending".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn view_state_serializes_as_plain_json() {
        let state = ViewState {
            filter: "sku0".to_string(),
            sort: Some(SortSpec::new(SortKey::VolumeUtilization, SortOrder::Descending)),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filter": "sku0",
                "sort": { "key": "volumeUtilization", "order": "descending" }
            })
        );
        let back: ViewState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_filter("  SkU01 \t"), "sku01");
        assert_eq!(normalize_filter("   "), "");
    }
}
