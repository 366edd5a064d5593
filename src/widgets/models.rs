//! Widget Domain Models
//!
//! Seed data for the widgets the server advertises and the frozen
//! descriptors built from it at startup.

// =============================================================================
// Widget Seeds
// =============================================================================

/// Static description of a widget before its HTML has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSeed {
    /// Tool name and registry key
    pub identifier: &'static str,
    /// Display title
    pub title: &'static str,
    /// Resource locator (`ui://widget/<name>.html`)
    pub template_uri: &'static str,
    /// Status copy shown while the tool runs
    pub invoking: &'static str,
    /// Status copy shown once the tool has run
    pub invoked: &'static str,
    /// Logical asset name handed to the resolver
    pub asset_name: &'static str,
    /// Acknowledgment text returned alongside the widget
    pub response_text: &'static str,
}

/// Identifier of the flight offers widget
pub const FLIGHT_OFFERS_WIDGET_ID: &str = "skyward-flight-offers";

/// Widgets registered at startup.
pub const WIDGET_SEEDS: &[WidgetSeed] = &[WidgetSeed {
    identifier: FLIGHT_OFFERS_WIDGET_ID,
    title: "Skyward Flight Offers",
    template_uri: "ui://widget/skyward-flight-offers.html",
    invoking: "Charting reward flights",
    invoked: "Displayed reward flight offers",
    asset_name: "index",
    response_text: "Rendered the Skyward Rewards flight explorer.",
}];

// =============================================================================
// Widget Descriptors
// =============================================================================

/// A widget with its rendered document. Never mutated after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub identifier: String,
    pub title: String,
    pub template_uri: String,
    pub invoking: String,
    pub invoked: String,
    pub asset_name: String,
    /// Resolved, self-contained HTML document
    pub html: String,
    pub response_text: String,
}

impl WidgetDescriptor {
    /// Freezes a seed together with the HTML built for its asset.
    pub fn from_seed(seed: &WidgetSeed, html: String) -> Self {
        Self {
            identifier: seed.identifier.to_string(),
            title: seed.title.to_string(),
            template_uri: seed.template_uri.to_string(),
            invoking: seed.invoking.to_string(),
            invoked: seed.invoked.to_string(),
            asset_name: seed.asset_name.to_string(),
            html,
            response_text: seed.response_text.to_string(),
        }
    }
}
