use std::collections::HashMap;
use std::fmt::Debug;
use crate::error::Error;
use crate::provider::ProviderIdentity;

/// API keys by provider.
#[derive(Clone, Default)]
pub struct CredentialSet {
    keys: HashMap<ProviderIdentity, String>,
}

impl CredentialSet {

    /// Create an empty set.
    pub fn new() -> Self {
        CredentialSet { keys: HashMap::new() }
    }

    /// Add or replace the credential of the provider.
    pub fn with(mut self, provider: ProviderIdentity, key: impl Into<String>) -> Self {
        self.insert(provider, key);
        self
    }

    /// Add or replace the credential of the provider.
    pub fn insert(&mut self, provider: ProviderIdentity, key: impl Into<String>) {
        self.keys.insert(provider, key.into());
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials by name using the lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self where F: Fn(&str) -> Option<String> {
        let mut set = CredentialSet::new();
        for provider in ProviderIdentity::ALL {
            if let Some(key) = lookup(provider.credential_key()) {
                set.insert(provider, key);
            }
        }
        set
    }

    /// Credential of the provider; empty values count as missing.
    pub fn get(&self, provider: ProviderIdentity) -> Result<&str, Error> {
        match self.keys.get(&provider) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::MissingCredential { provider, key: provider.credential_key() }),
        }
    }

    /// Check that every provider has a credential.
    pub fn require_all(&self) -> Result<(), Error> {
        for provider in ProviderIdentity::ALL {
            self.get(provider)?;
        }
        Ok(())
    }

    /// Last four characters of the credential, for display.
    pub fn masked(&self, provider: ProviderIdentity) -> String {
        match self.get(provider) {
            Ok(key) => {
                let chars: Vec<char> = key.chars().collect();
                let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
                format!("...{tail}")
            },
            Err(_) => "Not set".to_owned(),
        }
    }
}

impl<K: Into<String>> FromIterator<(ProviderIdentity, K)> for CredentialSet {
    fn from_iter<T: IntoIterator<Item = (ProviderIdentity, K)>>(iter: T) -> Self {
        let mut set = CredentialSet::new();
        for (provider, key) in iter {
            set.insert(provider, key);
        }
        set
    }
}

impl Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for provider in ProviderIdentity::ALL {
            map.entry(&provider, &self.masked(provider));
        }
        map.finish()
    }
}
