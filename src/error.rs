use thiserror::Error;

/// Everything that can go wrong when building or combining fractions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    #[error("denominator is 0")]
    ZeroDenominator,
    #[error("attempt to divide by zero")]
    DivideByZero,
    #[error("zero has no reciprocal")]
    ZeroReciprocal,
    #[error("integer overflow")]
    Overflow,
    #[error("malformed fraction literal {0:?}")]
    Format(String)
}

impl FractionError {
    pub(crate) fn format(input: &str) -> Self {
        FractionError::Format(input.to_owned())
    }
}

pub type Result<T, E = FractionError> = std::result::Result<T, E>;
