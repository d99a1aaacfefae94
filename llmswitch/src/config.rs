use std::time::Duration;
use llmswitch_lib::request::DEFAULT_TIMEOUT;
use llmswitch_lib::{CredentialPolicy, GenerationParameters, PromptTemplate, ProviderIdentity};
use llmswitch_lib::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P, UI_DEFAULT_TOP_K};

use crate::{error::AppError, options::Options};

/// Application settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// User messages color.
    pub user_color: (Option<[u8;3]>, Option<[u8;3]>),
    /// Assistant messages color.
    pub assistant_color: (Option<[u8;3]>, Option<[u8;3]>),
}

/// App config
#[derive(Clone, Debug)]
pub struct Config {
    /// Selected provider.
    pub provider: ProviderIdentity,
    /// Generation parameters.
    pub params: GenerationParameters,
    /// Prompt template.
    pub template: PromptTemplate,
    /// Question to ask once.
    pub message: Option<String>,
    /// Ask every provider.
    pub compare_all: bool,
    /// Print answers as JSON.
    pub json: bool,
    /// Credential policy.
    pub policy: CredentialPolicy,
    /// Request timeout.
    pub timeout: Duration,
    /// Debug logging.
    pub verbose: bool,
    /// Settings
    pub settings: Settings,
}

impl TryFrom<Options> for Config {
    type Error = AppError;

    fn try_from(options: Options) -> Result<Self, AppError> {
        let provider = match &options.provider {
            Some(name) => name.as_str().try_into()?,
            None => ProviderIdentity::OpenAI,
        };

        // Compare-all mode asks the plain instruction with the base defaults,
        // the chat mode uses the question/answer template and its own top-k.
        let (default_template, default_top_k) = if options.all {
            (PromptTemplate::Instruction, DEFAULT_TOP_K)
        } else {
            (PromptTemplate::QuestionAnswer, UI_DEFAULT_TOP_K)
        };

        let template = match &options.template {
            Some(name) => name.as_str().try_into()?,
            None => default_template,
        };

        let params = GenerationParameters::new(
            options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            options.top_k.unwrap_or(default_top_k),
            options.top_p.unwrap_or(DEFAULT_TOP_P),
        )?;

        let policy = if options.fail_fast {
            CredentialPolicy::FailFast
        } else {
            CredentialPolicy::PerProvider
        };

        let settings = Settings {
            user_color: options.user_color,
            assistant_color: options.assistant_color,
        };

        Ok(Config {
            provider,
            params,
            template,
            message: options.message,
            compare_all: options.all,
            json: options.json,
            policy,
            timeout: options.timeout.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT),
            verbose: options.verbose,
            settings,
        })
    }
}
