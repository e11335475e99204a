#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("System service error: {0}")]
    System(String),

    #[error("JNI bridge error: {0}")]
    Jni(String),

    #[error("Feature not available: {0}")]
    NotAvailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    #[allow(dead_code)]
    pub(crate) fn system<S: Into<String>>(msg: S) -> Self {
        Error::System(msg.into())
    }

    #[allow(dead_code)]
    pub(crate) fn jni<S: Into<String>>(msg: S) -> Self {
        Error::Jni(msg.into())
    }

    #[allow(dead_code)]
    pub(crate) fn not_available<S: Into<String>>(msg: S) -> Self {
        Error::NotAvailable(msg.into())
    }

    #[allow(dead_code)]
    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidData(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
