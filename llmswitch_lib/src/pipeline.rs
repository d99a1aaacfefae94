use std::collections::BTreeMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, warn};
use crate::config::GenerationParameters;
use crate::credentials::CredentialSet;
use crate::error::Error;
use crate::llm::{create_client, ClientHandle};
use crate::prompt::PromptTemplate;
use crate::provider::ProviderIdentity;
use crate::request::Client;

/// How missing credentials affect the compare-all mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// A provider without a credential fails on its own.
    #[default]
    PerProvider,
    /// Every credential must be present before any request is made.
    FailFast,
}

/// Renders questions, calls providers and extracts answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    template: PromptTemplate,
}

impl Pipeline {

    /// Pipeline using `template`.
    pub fn new(template: PromptTemplate) -> Self {
        Pipeline { template }
    }

    /// Prompt template in use.
    pub fn template(&self) -> PromptTemplate {
        self.template
    }

    /// Ask a question with a fresh client handle.
    pub fn ask(&self, client: Box<dyn ClientHandle>, question: &str) -> Result<String, Error> {
        let provider = client.provider();
        let prompt = self.template.render(question)?;

        debug!(%provider, model = client.model(), template = %self.template, "submitting prompt");

        match client.complete(&prompt) {
            Ok(answer) => {
                info!(%provider, bytes = answer.len(), "answer received");
                Ok(answer)
            },
            Err(err) => {
                let err = err.into_invocation(provider);
                warn!(%provider, error = %err, "invocation failed");
                Err(err)
            }
        }
    }

    /// Ask every provider the same question, one after another.
    ///
    /// `make_transport` is called once per provider that gets as far as a request.
    pub fn ask_all<F>(
        &self,
        params: &GenerationParameters,
        credentials: &CredentialSet,
        policy: CredentialPolicy,
        mut make_transport: F,
        question: &str,
    ) -> Result<Comparison, Error>
    where F: FnMut(ProviderIdentity) -> Result<Box<dyn Client>, Error>
    {
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }
        params.validate()?;
        if policy == CredentialPolicy::FailFast {
            credentials.require_all()?;
        }

        let mut results = BTreeMap::new();

        for provider in ProviderIdentity::ALL {
            let result = credentials.get(provider)
                .and_then(|_| make_transport(provider).map_err(|err| err.into_invocation(provider)))
                .and_then(|transport| create_client(provider, params, credentials, transport))
                .and_then(|client| self.ask(client, question));

            results.insert(provider, result);
        }

        Ok(Comparison { results })
    }
}

/// Ask with the default template.
pub fn ask(client: Box<dyn ClientHandle>, question: &str) -> Result<String, Error> {
    Pipeline::default().ask(client, question)
}

/// Per-provider outcome of the compare-all mode.
#[derive(Debug)]
pub struct Comparison {
    results: BTreeMap<ProviderIdentity, Result<String, Error>>,
}

impl Comparison {

    /// Outcome for the provider.
    pub fn get(&self, provider: ProviderIdentity) -> Option<&Result<String, Error>> {
        self.results.get(&provider)
    }

    /// Outcomes in canonical provider order.
    pub fn iter(&self) -> impl Iterator<Item = (ProviderIdentity, &Result<String, Error>)> {
        self.results.iter().map(|(p, r)| (*p, r))
    }

    /// Successful answers.
    pub fn successes(&self) -> impl Iterator<Item = (ProviderIdentity, &str)> {
        self.iter().filter_map(|(p, r)| r.as_ref().ok().map(|a| (p, a.as_str())))
    }

    /// Failures.
    pub fn failures(&self) -> impl Iterator<Item = (ProviderIdentity, &Error)> {
        self.iter().filter_map(|(p, r)| r.as_ref().err().map(|e| (p, e)))
    }
}

impl Serialize for Comparison {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (provider, result) in self.iter() {
            match result {
                Ok(answer) => map.serialize_entry(&provider, &BTreeMap::from([("answer", answer.clone())]))?,
                Err(err) => map.serialize_entry(&provider, &BTreeMap::from([("error", err.to_string())]))?,
            }
        }
        map.end()
    }
}
