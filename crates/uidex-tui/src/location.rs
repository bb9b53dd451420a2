//! Where the app currently is, kept as a URL so the status bar shows the
//! same `/devices?view=grid` and `/devices/<id>` paths a browser would.

use std::fmt;

use url::Url;

use uidex_core::ViewMode;

const ORIGIN: &str = "uidex://catalog/devices";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// The device list in the given layout.
    pub fn start(view: ViewMode) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(ORIGIN)?;
        view.apply_to_url(&mut url);
        Ok(Self { url })
    }

    /// Record a layout change. Returns whether the location changed.
    pub fn set_view(&mut self, view: ViewMode) -> bool {
        view.apply_to_url(&mut self.url)
    }

    /// Move to the list page, keeping `view`.
    pub fn open_devices(&mut self, view: ViewMode) {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.clear().push("devices");
        }
        self.url.set_query(None);
        view.apply_to_url(&mut self.url);
    }

    /// Move to a device's detail page. The id is percent-encoded as a
    /// single path segment.
    pub fn open_device(&mut self, id: &str) {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.clear().push("devices").push(id);
        }
        self.url.set_query(None);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.path())?;
        if let Some(query) = self.url.query() {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_location_carries_view() {
        let list = Location::start(ViewMode::List).unwrap();
        assert_eq!(list.to_string(), "/devices");

        let grid = Location::start(ViewMode::Grid).unwrap();
        assert_eq!(grid.to_string(), "/devices?view=grid");
        assert_eq!(ViewMode::from_url(&grid.url), ViewMode::Grid);
    }

    #[test]
    fn set_view_reports_changes() {
        let mut loc = Location::start(ViewMode::List).unwrap();
        assert!(!loc.set_view(ViewMode::List));
        assert!(loc.set_view(ViewMode::Grid));
        assert_eq!(loc.to_string(), "/devices?view=grid");
        assert!(loc.set_view(ViewMode::List));
        assert_eq!(loc.to_string(), "/devices");
    }

    #[test]
    fn detail_round_trip() {
        let mut loc = Location::start(ViewMode::Grid).unwrap();
        loc.open_device("a b/c");
        assert_eq!(loc.to_string(), "/devices/a%20b%2Fc");

        loc.open_devices(ViewMode::Grid);
        assert_eq!(loc.to_string(), "/devices?view=grid");
    }
}
