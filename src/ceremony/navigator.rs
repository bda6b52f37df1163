use tracing::{info, warn};
use url::Url;

/// Hand-off for the only side effect of a successful sign-in: moving the user to the location
/// the relying party asked for.
pub trait Navigator: Sync + Send {
    /// Navigates to the specified location, either absolute or relative to the relying party.
    fn navigate(&self, location: &str);
}

/// Navigator for terminal hosts: resolves the location against the relying party origin and
/// prints it.
pub struct TerminalNavigator {
    origin: Url,
}

impl TerminalNavigator {
    /// Creates navigator resolving relative locations against the origin of the specified URL.
    pub fn new(mut origin: Url) -> Self {
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);

        Self { origin }
    }

    /// Resolves the location to an absolute URL.
    pub fn resolve(&self, location: &str) -> Option<Url> {
        match self.origin.join(location) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("Cannot resolve navigation target ({location}): {err}");
                None
            }
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: &str) {
        if let Some(url) = self.resolve(location) {
            info!(navigation.url = %url, "Navigating after sign-in.");
            println!("Navigate to {url}");
        }
    }
}
