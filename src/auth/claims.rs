use serde::{Deserialize, Serialize};

/// JWT payload for a session token. The subject is the stringified numeric
/// user id; it is parsed back to an integer only at the token-service
/// boundary so claim encoding never depends on the identity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id, stringified
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}
