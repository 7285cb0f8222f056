use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::auth::entities::IdentityClaims;
use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::TokenCodec;

/// HS256 session-token codec.
///
/// Tokens carry the identity claims and no expiry: revocation through the
/// session table is the only way a token dies, so `exp` is neither set nor
/// required during validation.
pub struct JwtTokenCodec {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
}

impl JwtTokenCodec {
  /// Creates a codec over the shared signing secret
  pub fn new(secret: &str) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
    }
  }
}

impl TokenCodec for JwtTokenCodec {
  fn mint(&self, claims: &IdentityClaims) -> Result<String, AuthError> {
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
      .map_err(|e| AuthError::Token(TokenError::SigningFailed(e.to_string())))
  }

  fn decode(&self, token: &str) -> Result<IdentityClaims, AuthError> {
    jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
      .map(|data| data.claims)
      .map_err(|e| AuthError::Token(TokenError::VerificationFailed(e.to_string())))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::{Role, RoleBinding};
  use crate::domain::auth::value_objects::TokenSignature;
  use uuid::Uuid;

  fn claims() -> IdentityClaims {
    IdentityClaims {
      sub: Uuid::new_v4(),
      name: "Jane".into(),
      email: "jane@x.com".into(),
      roles: vec![RoleBinding::new(Role::Diner)],
      iat: 1_700_000_000,
    }
  }

  #[test]
  fn test_mint_produces_three_segments() {
    let codec = JwtTokenCodec::new("secret");
    let token = codec.mint(&claims()).unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert!(!TokenSignature::of(&token).is_empty());
  }

  #[test]
  fn test_decode_round_trip() {
    let codec = JwtTokenCodec::new("secret");
    let original = claims();
    let token = codec.mint(&original).unwrap();

    let decoded = codec.decode(&token).unwrap();
    assert_eq!(decoded.sub, original.sub);
    assert_eq!(decoded.email, original.email);
    assert_eq!(decoded.roles, original.roles);
  }

  #[test]
  fn test_decode_rejects_wrong_secret() {
    let token = JwtTokenCodec::new("secret").mint(&claims()).unwrap();
    let result = JwtTokenCodec::new("other").decode(&token);
    assert!(matches!(
      result,
      Err(AuthError::Token(TokenError::VerificationFailed(_)))
    ));
  }

  #[test]
  fn test_decode_rejects_tampered_payload() {
    let codec = JwtTokenCodec::new("secret");
    let token = codec.mint(&claims()).unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    let forged_payload = "eyJmb3JnZWQiOnRydWV9";
    parts[1] = forged_payload;
    let tampered = parts.join(".");

    assert!(codec.decode(&tampered).is_err());
  }

  #[test]
  fn test_decode_rejects_garbage() {
    let codec = JwtTokenCodec::new("secret");
    assert!(codec.decode("test").is_err());
    assert!(codec.decode("a.b.c").is_err());
  }
}
