//! Text generation adapters.
//!
//! - `WatsonxTextGenerator` - watsonx.ai text generation with IAM auth
//! - `FailoverTextGenerator` - primary with one optional fallback model
//! - `MockTextGenerator` - scripted responses for tests

mod failover_generator;
mod iam;
mod mock_generator;
mod watsonx_provider;

pub use failover_generator::FailoverTextGenerator;
pub use iam::{IamTokenProvider, DEFAULT_IAM_URL};
pub use mock_generator::{MockGeneration, MockGenerationError, MockTextGenerator};
pub use watsonx_provider::{
    WatsonxConfig, WatsonxTextGenerator, DEFAULT_MODEL_ID, DEFAULT_WATSONX_URL,
};
