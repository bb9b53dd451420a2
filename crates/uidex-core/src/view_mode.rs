// ── View mode ──
//
// List/grid presentation choice, mirrored into a single `view` query
// parameter so a link reproduces the layout. Only `grid` is ever written;
// list is the absence of the parameter.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// Name of the query parameter carrying the view mode.
pub const VIEW_PARAM: &str = "view";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    /// Interpret a raw parameter value: `"grid"` is grid, anything else
    /// (including absent) is list.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("grid") => Self::Grid,
            _ => Self::List,
        }
    }

    /// Read the view mode from a URL's query string.
    pub fn from_url(url: &Url) -> Self {
        let value = url
            .query_pairs()
            .find(|(key, _)| key == VIEW_PARAM)
            .map(|(_, value)| value);
        Self::from_param(value.as_deref())
    }

    /// Rewrite `url` so it encodes this mode, keeping every other query
    /// parameter in place. Returns `false` when the URL already matched.
    pub fn apply_to_url(self, url: &mut Url) -> bool {
        if Self::from_url(url) == self && self.param_matches_exactly(url) {
            return false;
        }

        let others: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != VIEW_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.set_query(None);
        if others.is_empty() && self == Self::List {
            return true;
        }

        let mut pairs = url.query_pairs_mut();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        if self == Self::Grid {
            pairs.append_pair(VIEW_PARAM, "grid");
        }
        drop(pairs);
        true
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }

    // List must have no `view` param at all; grid exactly one `view=grid`.
    fn param_matches_exactly(self, url: &Url) -> bool {
        let values: Vec<_> = url
            .query_pairs()
            .filter(|(key, _)| key == VIEW_PARAM)
            .collect();
        match self {
            Self::List => values.is_empty(),
            Self::Grid => values.len() == 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn only_grid_means_grid() {
        assert_eq!(ViewMode::from_param(Some("grid")), ViewMode::Grid);
        assert_eq!(ViewMode::from_param(Some("list")), ViewMode::List);
        assert_eq!(ViewMode::from_param(Some("GRID")), ViewMode::List);
        assert_eq!(ViewMode::from_param(Some("")), ViewMode::List);
        assert_eq!(ViewMode::from_param(None), ViewMode::List);
    }

    #[test]
    fn reads_mode_from_url() {
        assert_eq!(
            ViewMode::from_url(&url("https://x.test/?q=a&view=grid")),
            ViewMode::Grid
        );
        assert_eq!(
            ViewMode::from_url(&url("https://x.test/?view=tiles")),
            ViewMode::List
        );
    }

    #[test]
    fn grid_sets_param_and_keeps_others() {
        let mut u = url("https://x.test/devices?q=switch&line=a");
        assert!(ViewMode::Grid.apply_to_url(&mut u));
        assert_eq!(u.as_str(), "https://x.test/devices?q=switch&line=a&view=grid");
    }

    #[test]
    fn list_removes_param() {
        let mut u = url("https://x.test/devices?view=grid&q=switch");
        assert!(ViewMode::List.apply_to_url(&mut u));
        assert_eq!(u.as_str(), "https://x.test/devices?q=switch");

        let mut bare = url("https://x.test/devices?view=grid");
        assert!(ViewMode::List.apply_to_url(&mut bare));
        assert_eq!(bare.as_str(), "https://x.test/devices");
    }

    #[test]
    fn applying_current_mode_is_a_no_op() {
        let mut u = url("https://x.test/devices?view=grid");
        assert!(!ViewMode::Grid.apply_to_url(&mut u));
        assert_eq!(u.as_str(), "https://x.test/devices?view=grid");

        let mut bare = url("https://x.test/devices");
        assert!(!ViewMode::List.apply_to_url(&mut bare));
        assert_eq!(bare.as_str(), "https://x.test/devices");
    }

    #[test]
    fn unknown_view_value_is_dropped_for_list() {
        let mut u = url("https://x.test/?view=tiles");
        assert!(ViewMode::List.apply_to_url(&mut u));
        assert_eq!(u.as_str(), "https://x.test/");
    }

    #[test]
    fn parses_and_displays_lowercase() {
        assert_eq!(ViewMode::from_str("Grid").unwrap(), ViewMode::Grid);
        assert_eq!(ViewMode::Grid.to_string(), "grid");
        assert!(ViewMode::from_str("tiles").is_err());
    }

    #[test]
    fn toggles() {
        assert_eq!(ViewMode::List.toggled(), ViewMode::Grid);
        assert_eq!(ViewMode::Grid.toggled(), ViewMode::List);
    }
}
