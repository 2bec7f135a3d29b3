use serde::{Deserialize, Serialize};

/// Error category reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    MalformedRequest,
    Unauthorized,
    PermissionDenied,
    Internal,
}

/// JSON body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub detail: String,
}
