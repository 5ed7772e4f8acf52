use serde::{Deserialize, Serialize};

/// JWT claims. The payload is opaque beyond the identity claim; tokens are
/// minted by an external issuer sharing the signing secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Decoded identity, inserted as a request extension by the auth gate and
/// attached to the GraphQL context.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
}
