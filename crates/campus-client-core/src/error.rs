use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("campus_request_invalid_endpoint")]
    InvalidEndpoint,
    #[error("campus_request_encode_failed:{message}")]
    Encode { message: String },
    #[error("campus_request_failed:{message}")]
    Transport { message: String },
    #[error("campus_http_{status}:{body}")]
    Status { status: u16, body: String },
    #[error("campus_json_decode_failed:{message}")]
    Decode { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    Request,
    Transport,
    HttpStatus,
    Decode,
}

impl RequestErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Transport => "transport",
            Self::HttpStatus => "http_status",
            Self::Decode => "decode",
        }
    }
}

impl RequestError {
    pub fn kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidEndpoint | Self::Encode { .. } => RequestErrorKind::Request,
            Self::Transport { .. } => RequestErrorKind::Transport,
            Self::Status { .. } => RequestErrorKind::HttpStatus,
            Self::Decode { .. } => RequestErrorKind::Decode,
        }
    }

    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub fn format_http_error(status: u16, body: &str) -> RequestError {
    let trimmed = body.trim();
    let body = if trimmed.is_empty() {
        "<empty>".to_string()
    } else {
        trimmed.to_string()
    };
    RequestError::Status { status, body }
}
