use serde::{Deserialize, Serialize};

/// JWT payload: the user id, an admin flag for staff, and the expiry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

/// The authenticated caller, as inserted into request extensions by the
/// guard middleware or extracted directly from the bearer header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
