//! Llmswitch-lib sends a question to one of several hosted LLM providers
//! and returns the answer as plain text, whichever provider is selected.
//! 
//! ### Features
//! 
//!  - one call site for every provider
//!  - validated generation parameters, silently dropped where unsupported
//!  - explicit credentials, no global state
//!  - blocking, one request per question
//! 
//! ### Providers
//! 
//! - OpenAI (gpt-4o-mini)
//! - Anthropic (claude-3-haiku)
//! - Hugging Face inference API (zephyr-7b-beta)
//! - Fireworks AI (llama-v3p1-70b-instruct)
//! 
//! ### Examples
//! 
//! ```rust no_run
//! use llmswitch_lib::llm::create_client;
//! use llmswitch_lib::request::get_reqwest_client;
//! use llmswitch_lib::{CredentialSet, GenerationParameters, Pipeline, PromptTemplate, ProviderIdentity};
//!
//! let credentials = CredentialSet::from_env();
//! let params = GenerationParameters::new(0.7, 300, 35, 0.9).expect("valid parameters");
//!
//! let reqwest_client = get_reqwest_client().expect("transport created");
//!
//! let client = create_client(ProviderIdentity::Anthropic, &params, &credentials, reqwest_client).expect("client created");
//!
//! let answer = Pipeline::new(PromptTemplate::QuestionAnswer)
//!     .ask(client, "What is an LLM?")
//!     .expect("LLM response");
//!
//! println!("{answer}");
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

mod error;
mod config;
mod credentials;
mod pipeline;
mod prompt;
mod provider;
pub mod llm;
pub mod request;

pub use error::Error;
pub use config::{GenerationParameters, MappedParams, ui_ranges};
pub use config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P, UI_DEFAULT_TOP_K};
pub use credentials::CredentialSet;
pub use pipeline::{ask, Comparison, CredentialPolicy, Pipeline};
pub use prompt::PromptTemplate;
pub use provider::{ProviderIdentity, ProviderProfile, SupportedParams};
