//! Static informational content: the home page and the emergency page.

#![allow(missing_docs)]

use crimereport_db::entities::CrimeType;
use serde::Serialize;

use crate::navigation::Route;

/// The number to call in an emergency.
pub const EMERGENCY_NUMBER: &str = "100";

/// A headline feature on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// A shortcut to one of the views.
#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

/// A figure shown in the community impact section.
#[derive(Debug, Clone, Serialize)]
pub struct Statistic {
    pub value: &'static str,
    pub label: &'static str,
}

/// Home page content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub features: &'static [Feature],
    pub quick_actions: &'static [QuickAction],
    pub emergency_notice: &'static str,
    /// Marketing figures. They are fixed copy, not computed from stored reports.
    pub statistics: &'static [Statistic],
}

/// An emergency service line.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyContact {
    pub service: &'static str,
    pub number: &'static str,
    pub description: &'static str,
    pub available: &'static str,
}

/// A crisis support line. Some are reached by text rather than a number.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<&'static str>,
    pub description: &'static str,
    pub available: &'static str,
}

/// A titled list of short items.
#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// Emergency page content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyInfo {
    pub emergency_number: &'static str,
    pub alert: &'static str,
    pub services: &'static [EmergencyContact],
    pub crisis_resources: &'static [CrisisResource],
    pub safety_tips: &'static [Checklist],
    pub when_to_call: Checklist,
    pub when_non_emergency: Checklist,
}

static FEATURES: [Feature; 3] = [
    Feature {
        title: "Secure & Confidential",
        description: "Your reports are handled with the highest level of security and confidentiality.",
    },
    Feature {
        title: "24/7 Availability",
        description: "Report crimes anytime, anywhere. The system is available around the clock.",
    },
    Feature {
        title: "Anonymous Options",
        description: "Choose to report anonymously or provide contact information - the choice is yours.",
    },
];

static QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "File a Report",
        description: "Submit a detailed crime report with all relevant information",
        route: Route::Report,
    },
    QuickAction {
        title: "Track Your Report",
        description: "Check the status and updates on your submitted reports",
        route: Route::Track,
    },
    QuickAction {
        title: "In Case of Emergency",
        description: "If you are in immediate danger, call 100 immediately. This system is for non-emergency reporting.",
        route: Route::Emergency,
    },
];

static STATISTICS: [Statistic; 4] = [
    Statistic { value: "2,543", label: "Reports Submitted" },
    Statistic { value: "1,847", label: "Cases Resolved" },
    Statistic { value: "98%", label: "User Satisfaction" },
    Statistic { value: "24/7", label: "System Availability" },
];

static HOME: HomeContent = HomeContent {
    title: "Secure Crime Reporting System",
    tagline: "Report crimes safely and anonymously. Help law enforcement keep our community safe with fast, secure, and confidential incident reporting.",
    features: &FEATURES,
    quick_actions: &QUICK_ACTIONS,
    emergency_notice: "If you are in immediate danger or witnessing a crime in progress, call 100 immediately.",
    statistics: &STATISTICS,
};

static SERVICES: [EmergencyContact; 4] = [
    EmergencyContact {
        service: "Police Emergency",
        number: "100",
        description: "Immediate police response for crimes in progress",
        available: "24/7",
    },
    EmergencyContact {
        service: "Fire Department",
        number: "101",
        description: "Fire emergencies and hazardous situations",
        available: "24/7",
    },
    EmergencyContact {
        service: "Medical Emergency",
        number: "108",
        description: "Ambulance and emergency medical services",
        available: "24/7",
    },
    EmergencyContact {
        service: "Police Non-Emergency",
        number: "112",
        description: "Non-urgent police matters and general inquiries",
        available: "Daily 8AM-8PM",
    },
];

static CRISIS_RESOURCES: [CrisisResource; 4] = [
    CrisisResource {
        name: "National Suicide Prevention Lifeline",
        number: Some("1800-599-0019"),
        contact: None,
        description: "Toll-free 24x7 mental health and crisis support across India",
        available: "24/7",
    },
    CrisisResource {
        name: "Domestic Violence Hotline",
        number: Some("181"),
        contact: None,
        description: "National Women's Helpline (women in distress, including domestic violence)",
        available: "24/7",
    },
    CrisisResource {
        name: "Crisis Text Line",
        number: None,
        contact: Some("Text to 1800-599-0019"),
        description: "Crisis counseling via text message",
        available: "24/7",
    },
    CrisisResource {
        name: "Poison Control",
        number: Some("102/108"),
        contact: None,
        description: "Poison and overdose emergencies",
        available: "24/7",
    },
];

static SAFETY_TIPS: [Checklist; 4] = [
    Checklist {
        title: "Personal Safety",
        items: &[
            "Trust your instincts if something feels wrong",
            "Stay aware of your surroundings",
            "Keep emergency contacts easily accessible",
            "Let someone know your whereabouts",
        ],
    },
    Checklist {
        title: "Home Security",
        items: &[
            "Lock doors and windows when leaving",
            "Install adequate lighting around entrances",
            "Don't advertise valuables or vacations",
            "Consider a security system",
        ],
    },
    Checklist {
        title: "Online Safety",
        items: &[
            "Protect personal information online",
            "Use strong, unique passwords",
            "Be cautious with social media sharing",
            "Report suspicious online activity",
        ],
    },
    Checklist {
        title: "If You're a Victim",
        items: &[
            "Prioritize your safety above all else",
            "Preserve evidence when possible",
            "Report the crime as soon as it's safe",
            "Seek support from friends, family, or counselors",
        ],
    },
];

static EMERGENCY: EmergencyInfo = EmergencyInfo {
    emergency_number: EMERGENCY_NUMBER,
    alert: "If you are in immediate danger or witnessing a crime in progress, call 100 now.",
    services: &SERVICES,
    crisis_resources: &CRISIS_RESOURCES,
    safety_tips: &SAFETY_TIPS,
    when_to_call: Checklist {
        title: "When to Call 100",
        items: &[
            "Someone is seriously injured or in danger",
            "A crime is happening right now",
            "You see a fire or hazardous situation",
            "Someone is threatening you or others",
        ],
    },
    when_non_emergency: Checklist {
        title: "When to Use Non-Emergency",
        items: &[
            "Report a crime that already happened",
            "File a report for insurance purposes",
            "Ask questions about police services",
            "Report suspicious but non-threatening activity",
        ],
    },
};

/// A link in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

const fn link(label: &'static str, route: Route) -> NavLink {
    NavLink { label, route }
}

/// Navigation bar links. Signed-in visitors see their dashboard instead of
/// the login and register links.
#[must_use]
pub fn nav_links(signed_in: bool) -> Vec<NavLink> {
    let mut links = vec![
        link("Home", Route::Home),
        link("Report Crime", Route::Report),
        link("Track Report", Route::Track),
        link("Emergency", Route::Emergency),
    ];
    if signed_in {
        links.push(link("Dashboard", Route::Dashboard));
    } else {
        links.push(link("Login", Route::Login));
        links.push(link("Register", Route::Register));
    }
    links
}

/// Home page content.
#[must_use]
pub fn home() -> &'static HomeContent {
    &HOME
}

/// Emergency page content.
#[must_use]
pub fn emergency() -> &'static EmergencyInfo {
    &EMERGENCY
}

/// Categories offered by the submission form.
#[must_use]
pub fn crime_types() -> Vec<&'static str> {
    CrimeType::ALL.iter().map(|t| t.as_str()).collect()
}
