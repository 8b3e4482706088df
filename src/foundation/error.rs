pub type FlyResult<T> = Result<T, FlyError>;

#[derive(thiserror::Error, Debug)]
pub enum FlyError {
    #[error("config error: {0}")]
    Config(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("feed error: {0}")]
    Feed(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
