//! Named emote API endpoints and their failover ordering.

use url::Url;

use crate::config::ApiConfig;
use crate::domain::EmoteRequest;
use crate::error::ConfigError;

/// A single emote API endpoint.
///
/// The base URL points at the send path (`.../join`); the probe URL is
/// derived from it by stripping that path segment.
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: &'static str,
    base_url: Url,
}

impl Endpoint {
    #[must_use]
    pub fn new(name: &'static str, base_url: Url) -> Self {
        Self { name, base_url }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build the send URL for a request:
    /// `<base>?tc=<team_code>&uid1=<uid>&emote_id=<emote_id>`.
    #[must_use]
    pub fn send_url(&self, request: &EmoteRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("tc", request.team_code())
            .append_pair("uid1", request.uid())
            .append_pair("emote_id", request.emote_id());
        url
    }

    /// Build the probe URL: the base URL with the trailing `/join` removed.
    ///
    /// The probe deliberately hits the service root rather than the send
    /// path, so a probe never triggers an emote.
    #[must_use]
    pub fn probe_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = url.path().trim_end_matches("/join").to_owned();
        url.set_path(&path);
        url
    }
}

/// Ordered endpoint list; position defines failover priority.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    #[must_use]
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Build the Primary/Secondary registry from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a configured URL does not
    /// parse. `Config::load` validates the same URLs, so this only fires for
    /// hand-built configs.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let parse = |field: &'static str, value: &str| {
            Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })
        };

        Ok(Self::new(vec![
            Endpoint::new("Primary API", parse("api.primary_url", &config.primary_url)?),
            Endpoint::new(
                "Secondary API",
                parse("api.secondary_url", &config.secondary_url)?,
            ),
        ]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EmoteRequest {
        EmoteRequest::new("8552785", "11987556088", "909000065").unwrap()
    }

    #[test]
    fn send_url_carries_all_three_parameters() {
        let endpoint = Endpoint::new(
            "Primary API",
            Url::parse("https://api.example.com/join").unwrap(),
        );

        let url = endpoint.send_url(&request());
        assert_eq!(
            url.as_str(),
            "https://api.example.com/join?tc=8552785&uid1=11987556088&emote_id=909000065"
        );
    }

    #[test]
    fn probe_url_strips_the_join_path() {
        let endpoint = Endpoint::new(
            "Primary API",
            Url::parse("https://api.example.com/join").unwrap(),
        );

        assert_eq!(endpoint.probe_url().as_str(), "https://api.example.com/");
    }

    #[test]
    fn probe_url_keeps_non_join_paths() {
        let endpoint = Endpoint::new("Primary API", Url::parse("https://api.example.com/emote").unwrap());

        assert_eq!(
            endpoint.probe_url().as_str(),
            "https://api.example.com/emote"
        );
    }

    #[test]
    fn registry_preserves_failover_order() {
        let registry = EndpointRegistry::from_config(&crate::config::ApiConfig::default()).unwrap();

        let names: Vec<_> = registry.iter().map(Endpoint::name).collect();
        assert_eq!(names, vec!["Primary API", "Secondary API"]);
    }

    #[test]
    fn registry_rejects_bad_urls() {
        let config = crate::config::ApiConfig {
            primary_url: "nope".into(),
            ..Default::default()
        };

        assert!(matches!(
            EndpointRegistry::from_config(&config),
            Err(ConfigError::InvalidValue {
                field: "api.primary_url",
                ..
            })
        ));
    }
}
