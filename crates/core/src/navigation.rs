//! Navigation targets returned alongside results.
//!
//! The client is a set of full-page views. After an action the service tells
//! it which view to show next and with which transient parameters. Those
//! parameters live only in the response; nothing here is persisted.

use serde::{Serialize, Serializer};

/// A client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Report,
    Track,
    Login,
    Register,
    Dashboard,
    Emergency,
}

impl Route {
    /// Every route, in navigation-bar order.
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Report,
        Self::Track,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Emergency,
    ];

    /// Client path of this view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Report => "/report",
            Self::Track => "/track",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Emergency => "/emergency",
        }
    }

    /// Whether the view needs a signed-in identity.
    #[must_use]
    pub const fn requires_identity(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

/// Where the client should go next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// Target view.
    pub route: Route,
    /// Report to show, for the tracking view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Show the just-submitted banner.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub just_submitted: bool,
    /// Path plus query string.
    pub href: String,
}

impl Navigation {
    /// Plain navigation to a view.
    #[must_use]
    pub fn to(route: Route) -> Self {
        Self {
            route,
            report_id: None,
            just_submitted: false,
            href: route.path().to_string(),
        }
    }

    /// Navigation to the lookup view, pre-filled with a report identifier.
    #[must_use]
    pub fn track(report_id: &str, just_submitted: bool) -> Self {
        let mut href = format!("{}?reportId={report_id}", Route::Track.path());
        if just_submitted {
            href.push_str("&justSubmitted=true");
        }
        Self {
            route: Route::Track,
            report_id: Some(report_id.to_string()),
            just_submitted,
            href,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_paths() {
        let paths: Vec<&str> = Route::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(
            paths,
            ["/", "/report", "/track", "/login", "/register", "/dashboard", "/emergency"]
        );
        assert!(Route::Dashboard.requires_identity());
        assert!(!Route::Track.requires_identity());
    }

    #[test]
    fn test_track_navigation_after_submission() {
        let nav = Navigation::track("CR123456", true);
        assert_eq!(
            serde_json::to_value(&nav).unwrap(),
            json!({
                "route": "/track",
                "reportId": "CR123456",
                "justSubmitted": true,
                "href": "/track?reportId=CR123456&justSubmitted=true"
            })
        );
    }

    #[test]
    fn test_plain_navigation_omits_params() {
        let nav = Navigation::to(Route::Dashboard);
        assert_eq!(
            serde_json::to_value(&nav).unwrap(),
            json!({"route": "/dashboard", "href": "/dashboard"})
        );
    }
}
