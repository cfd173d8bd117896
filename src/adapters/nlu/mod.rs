//! NLU adapters.

mod mock_nlu;
mod watson_nlu;

pub use mock_nlu::MockNluAnalyzer;
pub use watson_nlu::{DisabledNluAnalyzer, WatsonNluAnalyzer, WatsonNluConfig, DEFAULT_NLU_VERSION};
