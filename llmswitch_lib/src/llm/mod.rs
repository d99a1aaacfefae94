//! Provider clients and the factory that builds them.
mod anthropic;
mod factory;
mod handle;
pub mod huggingface;
mod openai;
pub(crate) mod util;

pub use anthropic::ANTHROPIC_API_VERSION;
pub use factory::create_client;
pub use handle::ClientHandle;
