pub type FsmResult<T> = Result<T, FsmError>;

#[derive(thiserror::Error, Debug)]
pub enum FsmError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FsmError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FsmError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(FsmError::render("x").to_string().contains("render error:"));
        assert!(FsmError::config("x").to_string().contains("config error:"));
        assert!(
            FsmError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }
}
