pub type ShanimateResult<T> = Result<T, ShanimateError>;

#[derive(thiserror::Error, Debug)]
pub enum ShanimateError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShanimateError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ShanimateError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ShanimateError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(
            ShanimateError::encoding("x")
                .to_string()
                .contains("encoding error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ShanimateError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
