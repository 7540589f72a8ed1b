// Error taxonomy and the upstream fault classifier

use crate::transport::HttpResponse;
use crate::types::FaultBody;
use rmcp::model::ErrorCode;
use thiserror::Error;

/// A fault reported by the Discovery API itself: the call completed with a
/// non-success HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", detail_suffix(.code, .status))]
pub struct ApiError {
    pub message: String,
    pub code: Option<String>,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }
}

fn detail_suffix(code: &Option<String>, status: &Option<u16>) -> String {
    match (code, status) {
        (Some(code), Some(status)) => format!(" (code: {}, status: {})", code, status),
        (Some(code), None) => format!(" (code: {})", code),
        (None, Some(status)) => format!(" (status: {})", status),
        (None, None) => String::new(),
    }
}

// Failures where no usable HTTP response came back
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Other error: {0}")]
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Unknown tool: {0}")]
    MethodNotFound(String),

    #[error("{0}")]
    InvalidParams(String),
}

impl InvocationError {
    /// JSON-RPC error code for this invocation fault.
    pub fn rpc_code(&self) -> ErrorCode {
        match self {
            InvocationError::MethodNotFound(_) => ErrorCode::METHOD_NOT_FOUND,
            InvocationError::InvalidParams(_) => ErrorCode::INVALID_PARAMS,
        }
    }
}

#[derive(Error, Debug)]
pub enum TicketmasterError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    UpstreamFault(#[from] ApiError),

    #[error(transparent)]
    TransportError(#[from] TransportError),

    #[error(transparent)]
    InvalidInvocation(#[from] InvocationError),
}

pub type Result<T, E = TicketmasterError> = std::result::Result<T, E>;

/// Builds the classified error for a completed call with a failing status.
/// Never fails: an unreadable or missing fault body falls back to `fallback`.
pub fn classify_response(response: &HttpResponse, fallback: &str) -> ApiError {
    let fault = serde_json::from_slice::<FaultBody>(&response.body)
        .ok()
        .and_then(|body| body.fault);

    let (message, code) = match fault {
        Some(fault) => (
            fault.faultstring,
            fault.detail.and_then(|detail| detail.errorcode),
        ),
        None => (None, None),
    };

    ApiError {
        message: message.unwrap_or_else(|| fallback.to_string()),
        code,
        status: Some(response.status),
    }
}

/// Separates "upstream answered with an error" from "call never completed".
/// Transport failures pass through untouched; non-success responses become
/// `UpstreamFault`.
pub fn classify(
    outcome: std::result::Result<HttpResponse, TransportError>,
    fallback: &str,
) -> Result<HttpResponse> {
    let response = outcome?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(classify_response(&response, fallback).into())
    }
}

pub fn fallback_message(resource: &str) -> String {
    format!("Failed to fetch {}", resource)
}
