//! Lazily built, shared client handle.

use super::MailjetClient;
use crate::config::Config;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Builds the [`MailjetClient`] on first use and hands out the same handle
/// afterwards.
///
/// The factory is an ordinary value: whoever owns it decides how long the
/// client lives.
#[derive(Debug)]
pub struct ClientFactory {
    config: Config,
    client: OnceCell<Arc<MailjetClient>>,
}

impl ClientFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the shared client, constructing it on the first call.
    ///
    /// Malformed credentials are not detected here; they surface as a
    /// `401` on the first request.
    pub fn create_client(&self) -> Arc<MailjetClient> {
        self.client
            .get_or_init(|| {
                tracing::info!(
                    "Creating Mailjet client (api {} {}, live mode: {})",
                    self.config.api_url,
                    self.config.api_version,
                    self.config.live_mode
                );
                Arc::new(MailjetClient::new(&self.config))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api_key: "public".to_string(),
            api_secret: "private".to_string(),
            live_mode: true,
            ..Config::default()
        }
    }

    #[test]
    fn test_create_client_is_memoized() {
        let factory = ClientFactory::new(test_config());
        let first = factory.create_client();
        let second = factory.create_client();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_live());
    }

    #[test]
    fn test_factories_do_not_share_clients() {
        let a = ClientFactory::new(test_config());
        let b = ClientFactory::new(test_config());

        assert!(!Arc::ptr_eq(&a.create_client(), &b.create_client()));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let factory = ClientFactory::new(test_config());
        factory.create_client();

        let debug = format!("{:?}", factory);
        assert!(!debug.contains("private"));
    }
}
