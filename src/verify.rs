// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Detached Ed25519 verification of inbound interaction webhooks.
//!
//! Discord signs `timestamp || body` with the application's key and sends the
//! signature and timestamp as request headers. Verification runs over the
//! exact bytes received on the wire; the body must never be re-serialized
//! before checking. Requests missing either header are rejected without
//! invoking the cryptographic primitive.

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

/// Signature verification error types.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("missing signature headers")]
    MissingHeaders,

    #[error("malformed signature encoding")]
    MalformedSignature,

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Verifier bound to one application public key.
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Build a verifier from the hex-encoded public key Discord publishes
    /// in the developer portal.
    pub fn from_hex(public_key: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|_| SignatureError::InvalidPublicKey("not hex-encoded".to_string()))?;

        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            SignatureError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;

        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| SignatureError::InvalidPublicKey("not a valid curve point".to_string()))?;

        Ok(Self { key })
    }

    /// Verify a detached signature over `timestamp || body`.
    ///
    /// `signature` and `timestamp` are the raw header values; `None` for
    /// either fails closed with [`SignatureError::MissingHeaders`].
    pub fn verify(
        &self,
        body: &[u8],
        signature: Option<&str>,
        timestamp: Option<&str>,
    ) -> Result<(), SignatureError> {
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            return Err(SignatureError::MissingHeaders);
        };

        let signature_bytes =
            hex::decode(signature).map_err(|_| SignatureError::MalformedSignature)?;
        let signature = Signature::from_slice(&signature_bytes)
            .map_err(|_| SignatureError::MalformedSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| SignatureError::VerificationFailed)
    }
}
