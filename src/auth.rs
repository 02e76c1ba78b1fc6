//! Request authentication.
//!
//! The guard only asks whether the context carries a user. Turning a bearer
//! token into that user is the transport's job; [`TokenKeys`] is the piece of
//! it that signs and checks the tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ResolverError;
use crate::graphql::Context;
use crate::model::User;

pub fn is_authenticated(context: &Context) -> bool {
    context.user.is_some()
}

/// Fails with [`ResolverError::Unauthorized`] unless the request is
/// authenticated. Protected resolvers call this before doing anything else.
pub fn require_user(context: &Context) -> Result<&User, ResolverError> {
    match &context.user {
        Some(user) if is_authenticated(context) => Ok(user),
        _ => Err(ResolverError::Unauthorized),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the student the token was issued to.
    pub sub: String,
    pub exp: i64,
}

/// HS256 keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        TokenKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn issue(&self, student_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: student_id.to_owned(),
            exp: Utc::now().timestamp() + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
