use crate::{
    bpe::EncodeError, cost::CostError, policy::PolicyError, pricing::PricingError,
    verify::VerifyError, vocab::VocabError,
};

/// Top-level error type for the core engine. Thin command wrappers in
/// `llm_cost_cli` translate each variant to an exit code and user-facing
/// message; no core component swallows an error or retries silently.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
