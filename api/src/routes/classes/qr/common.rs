use attendance::IssuedToken;
use serde::Serialize;

/// The token handed back when a broadcast starts.
#[derive(Debug, Serialize, Default)]
pub struct QrTokenResponse {
    pub class_id: i64,
    pub token: String,
    pub issued_at: String,
}

impl QrTokenResponse {
    pub fn new(class_id: i64, issued: IssuedToken) -> Self {
        Self {
            class_id,
            token: issued.token,
            issued_at: issued.issued_at.to_rfc3339(),
        }
    }
}

/// What the QR display polls for: the token currently on screen plus the
/// number of students already marked.
#[derive(Debug, Serialize, Default)]
pub struct CurrentQrResponse {
    pub class_id: i64,
    pub token: String,
    pub issued_at: String,
    pub marked_count: u64,
}
