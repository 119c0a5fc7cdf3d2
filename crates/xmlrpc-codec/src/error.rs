use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlRpcError {
    #[error("malformed xml: {0}")]
    Xml(String),
    #[error("unexpected element: expected {expected}, found {found}")]
    UnexpectedElement { expected: &'static str, found: String },
    #[error("unexpected end of document")]
    UnexpectedEof,
    #[error("invalid integer: {0}")]
    InvalidInt(String),
    #[error("invalid double: {0}")]
    InvalidDouble(String),
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),
    #[error("invalid base64 payload")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("fault response is missing {0}")]
    InvalidFault(&'static str),
}

impl From<quick_xml::Error> for XmlRpcError {
    fn from(e: quick_xml::Error) -> Self {
        XmlRpcError::Xml(e.to_string())
    }
}
