use std::fmt::Display;
use serde::Serialize;
use crate::error::Error;

/// Model providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderIdentity {
    /// Open AI.
    OpenAI,
    /// Anthropic.
    Anthropic,
    /// Hugging Face inference API.
    HuggingFace,
    /// Fireworks AI.
    Fireworks,
}

/// Generation knobs a provider accepts besides temperature and max tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedParams {
    /// Provider accepts top_k.
    pub top_k: bool,
    /// Provider accepts top_p.
    pub top_p: bool,
}

/// Fixed per-provider configuration.
#[derive(Debug)]
pub struct ProviderProfile {
    /// Model identifier sent to the provider.
    pub model: &'static str,
    /// Credential name (environment variable).
    pub credential_key: &'static str,
    /// API URL. For Hugging Face, the inference base the repository id is appended to.
    pub api_url: &'static str,
    /// Human readable model caption.
    pub caption: &'static str,
    /// Supported optional knobs.
    pub supported: SupportedParams,
}

const OPENAI: ProviderProfile = ProviderProfile {
    model: "gpt-4o-mini",
    credential_key: "OPENAI_API_KEY",
    api_url: "https://api.openai.com/v1/chat/completions",
    caption: "OpenAI/GPT-4o-mini",
    supported: SupportedParams { top_k: false, top_p: false },
};

const ANTHROPIC: ProviderProfile = ProviderProfile {
    model: "claude-3-haiku-20240307",
    credential_key: "ANTHROPIC_API_KEY",
    api_url: "https://api.anthropic.com/v1/messages",
    caption: "Anthropic/claude-3-haiku-20240307",
    supported: SupportedParams { top_k: true, top_p: true },
};

const HUGGINGFACE: ProviderProfile = ProviderProfile {
    model: "HuggingFaceH4/zephyr-7b-beta",
    credential_key: "HUGGINGFACE_API_KEY",
    api_url: "https://api-inference.huggingface.co/models",
    caption: "HuggingFace/Zephyr-7B-Beta",
    supported: SupportedParams { top_k: true, top_p: true },
};

const FIREWORKS: ProviderProfile = ProviderProfile {
    model: "accounts/fireworks/models/llama-v3p1-70b-instruct",
    credential_key: "FIREWORKS_API_KEY",
    api_url: "https://api.fireworks.ai/inference/v1/chat/completions",
    caption: "Fireworks/llama-v3p1-70b-instruct",
    supported: SupportedParams { top_k: false, top_p: false },
};

impl ProviderIdentity {

    /// All providers in canonical order.
    pub const ALL: [ProviderIdentity; 4] = [
        ProviderIdentity::OpenAI,
        ProviderIdentity::Anthropic,
        ProviderIdentity::HuggingFace,
        ProviderIdentity::Fireworks,
    ];

    /// Fixed configuration of the provider.
    pub fn profile(self) -> &'static ProviderProfile {
        match self {
            ProviderIdentity::OpenAI => &OPENAI,
            ProviderIdentity::Anthropic => &ANTHROPIC,
            ProviderIdentity::HuggingFace => &HUGGINGFACE,
            ProviderIdentity::Fireworks => &FIREWORKS,
        }
    }

    /// Model identifier.
    pub fn model(self) -> &'static str {
        self.profile().model
    }

    /// Credential name.
    pub fn credential_key(self) -> &'static str {
        self.profile().credential_key
    }

    /// Name accepted by `TryFrom<&str>`.
    pub fn name(self) -> &'static str {
        match self {
            ProviderIdentity::OpenAI => "openai",
            ProviderIdentity::Anthropic => "anthropic",
            ProviderIdentity::HuggingFace => "huggingface",
            ProviderIdentity::Fireworks => "fireworks",
        }
    }
}

impl TryFrom<&str> for ProviderIdentity {
    type Error = Error;

    fn try_from(val: &str) -> Result<Self, Self::Error> {
        match val.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderIdentity::OpenAI),
            "anthropic" => Ok(ProviderIdentity::Anthropic),
            "huggingface" => Ok(ProviderIdentity::HuggingFace),
            "fireworks" => Ok(ProviderIdentity::Fireworks),
            _ => Err(Error::UnsupportedProvider(val.to_owned())),
        }
    }
}

impl Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderIdentity::OpenAI => "OpenAI",
            ProviderIdentity::Anthropic => "Anthropic",
            ProviderIdentity::HuggingFace => "HuggingFace",
            ProviderIdentity::Fireworks => "Fireworks",
        };
        f.write_str(name)
    }
}
