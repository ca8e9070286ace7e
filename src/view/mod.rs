//! Filtered, sorted views over scan records.
//!
//! A [`ViewQuery`] is plain configuration; [`project`] applies it as a pure
//! function, so the same records and query always give the same output.

pub mod projector;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::records::Band;

pub use projector::project;

/// Which bands a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum BandFilter {
    /// Both bands. Records without a channel are still dropped.
    #[default]
    #[serde(rename = "both")]
    #[value(name = "both")]
    Both,
    /// 2.4 GHz only
    #[serde(rename = "2.4ghz", alias = "2.4GHz")]
    #[value(name = "2.4ghz", alias = "2.4")]
    Ghz2_4,
    /// 5 GHz only
    #[serde(rename = "5ghz", alias = "5GHz")]
    #[value(name = "5ghz", alias = "5")]
    Ghz5,
}

impl BandFilter {
    /// Whether a record in `band` passes this filter.
    #[must_use]
    pub fn admits(self, band: Band) -> bool {
        match self {
            Self::Both => true,
            Self::Ghz2_4 => band == Band::Ghz2_4,
            Self::Ghz5 => band == Band::Ghz5,
        }
    }
}

impl fmt::Display for BandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => write!(f, "2.4GHz + 5GHz"),
            Self::Ghz2_4 => write!(f, "2.4GHz"),
            Self::Ghz5 => write!(f, "5GHz"),
        }
    }
}

/// Field a view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Channel number
    Channel,
    /// Signal strength in dBm
    #[default]
    Signal,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel => write!(f, "channel"),
            Self::Signal => write!(f, "signal"),
        }
    }
}

/// Numeric ordering direction.
///
/// For signal this is plain numeric order on dBm: ascending puts the
/// weakest (most negative) access point first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum SortDirection {
    /// Smallest value first
    #[serde(rename = "asc", alias = "ascending")]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    /// Largest value first
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    #[value(name = "desc", alias = "descending")]
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Band filter plus sort order.
///
/// The default shows both bands, strongest signal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Bands to keep
    pub band: BandFilter,
    /// Field to order by
    pub sort_key: SortKey,
    /// Ordering direction
    pub sort_dir: SortDirection,
}

impl ViewQuery {
    /// Build a query from its three parts.
    #[must_use]
    pub fn new(band: BandFilter, sort_key: SortKey, sort_dir: SortDirection) -> Self {
        Self {
            band,
            sort_key,
            sort_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_strongest_first() {
        let query = ViewQuery::default();
        assert_eq!(query.band, BandFilter::Both);
        assert_eq!(query.sort_key, SortKey::Signal);
        assert_eq!(query.sort_dir, SortDirection::Descending);
    }

    #[test]
    fn test_band_filter_admits() {
        assert!(BandFilter::Both.admits(Band::Ghz2_4));
        assert!(BandFilter::Both.admits(Band::Ghz5));
        assert!(BandFilter::Ghz2_4.admits(Band::Ghz2_4));
        assert!(!BandFilter::Ghz2_4.admits(Band::Ghz5));
        assert!(BandFilter::Ghz5.admits(Band::Ghz5));
        assert!(!BandFilter::Ghz5.admits(Band::Ghz2_4));
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(BandFilter::from_str("2.4ghz", true).unwrap(), BandFilter::Ghz2_4);
        assert_eq!(BandFilter::from_str("5", true).unwrap(), BandFilter::Ghz5);
        assert_eq!(SortKey::from_str("channel", true).unwrap(), SortKey::Channel);
        assert_eq!(
            SortDirection::from_str("ascending", true).unwrap(),
            SortDirection::Ascending
        );
        assert!(BandFilter::from_str("6ghz", true).is_err());
    }

    #[test]
    fn test_serde_names() {
        let query = ViewQuery::new(BandFilter::Ghz5, SortKey::Channel, SortDirection::Ascending);
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"band":"5ghz","sort_key":"channel","sort_dir":"asc"}"#);

        let parsed: ViewQuery =
            serde_json::from_str(r#"{"band":"2.4GHz","sort_key":"signal","sort_dir":"descending"}"#)
                .unwrap();
        assert_eq!(parsed.band, BandFilter::Ghz2_4);
        assert_eq!(parsed.sort_dir, SortDirection::Descending);
    }
}
