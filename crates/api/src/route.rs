//! Route templates and the names hooks use to recognize them.

/// Namespace of the plugin's own control pages.
pub const PLUGIN_NAMESPACE: &str = "plugins:public_registrations";

pub const HEALTH_PATH: &str = "/health";
pub const METRICS_PATH: &str = "/metrics";
pub const EVENT_INDEX_PATH: &str = "/{organizer}/{event}/";
pub const REGISTRATION_FIELDS_PATH: &str = "/{organizer}/{event}/registration/fields";
pub const SETTINGS_PATH: &str = "/control/event/{organizer}/{event}/public-registrations/";
pub const PURGE_PATH: &str = "/control/event/{organizer}/{event}/public-registrations/purge";
pub const PURGE_ALL_PATH: &str = "/control/public-registrations/purge";

/// `(template, namespace, url name)` for every route the server exposes.
const ROUTES: [(&str, &str, &str); 7] = [
    (HEALTH_PATH, "", "health"),
    (METRICS_PATH, "", "metrics"),
    (EVENT_INDEX_PATH, "", "event.index"),
    (REGISTRATION_FIELDS_PATH, "", "event.registration.fields"),
    (SETTINGS_PATH, PLUGIN_NAMESPACE, "settings"),
    (PURGE_PATH, PLUGIN_NAMESPACE, "purge"),
    (PURGE_ALL_PATH, PLUGIN_NAMESPACE, "purge_all"),
];

/// The named route a request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub namespace: &'static str,
    pub url_name: &'static str,
}

impl ResolvedRoute {
    /// Resolves a matched route template to its name.
    pub fn resolve(template: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|(path, _, _)| *path == template)
            .map(|&(_, namespace, url_name)| Self {
                namespace,
                url_name,
            })
    }

    /// The public index page of an event.
    pub fn is_event_index(&self) -> bool {
        self.url_name.contains("event.index")
    }

    /// The plugin's settings page.
    pub fn is_plugin_settings(&self) -> bool {
        self.namespace == PLUGIN_NAMESPACE && self.url_name == "settings"
    }
}

impl std::fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(self.url_name)
        } else {
            write!(f, "{}:{}", self.namespace, self.url_name)
        }
    }
}

/// Builds the URL of the plugin's settings page for an event.
pub fn settings_url(organizer: &str, event: &str) -> String {
    SETTINGS_PATH
        .replace("{organizer}", organizer)
        .replace("{event}", event)
}
