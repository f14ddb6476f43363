//! Request verification — proof that a lifecycle call comes from the device
//! cloud.
//!
//! `PING` is never verified: it is sent while the app is being registered,
//! before any public key exists.
//!
//! Every other call carries an HTTP signature:
//!
//! ```text
//! Authorization: Signature keyId="…",algorithm="rsa-sha256",
//!     headers="(request-target) digest date",signature="<base64>"
//! ```
//!
//! The signature covers one `name: value` line per listed header, joined by
//! `\n`. When a `Digest` header is present it must match the body.

use std::path::Path;

use axum::http::{HeaderMap, Method, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::RsaPublicKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use sha2::{Digest, Sha256};

const REQUEST_TARGET: &str = "(request-target)";

/// The parts of an inbound request a verifier may look at.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    pub method: &'a Method,
    /// Path and query, as received.
    pub path: &'a str,
    pub headers: &'a HeaderMap,
    pub body: &'a [u8],
}

/// Decides whether a non-`PING` lifecycle call is trusted.
pub trait RequestVerifier: Send + Sync {
    /// `true` when the request carries a valid signature.
    fn verify(&self, request: &SignedRequest<'_>) -> bool;
}

/// Trusts every request. Only suitable behind a proxy that already checks
/// HTTP signatures, or for local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RequestVerifier for AllowAll {
    fn verify(&self, _request: &SignedRequest<'_>) -> bool {
        true
    }
}

/// Errors raised while loading the public key of the device cloud.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("failed to read public key file")]
    Io(#[from] std::io::Error),

    #[error("invalid public key: {0}")]
    InvalidKey(#[from] rsa::pkcs8::spki::Error),
}

/// Why a request was turned away. Only logged.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("no signature header")]
    MissingSignature,
    #[error("malformed signature header")]
    Malformed,
    #[error("unsupported algorithm `{0}`")]
    UnsupportedAlgorithm(String),
    #[error("signed header `{0}` is absent")]
    MissingHeader(String),
    #[error("body does not match its digest")]
    DigestMismatch,
    #[error("signature does not match")]
    BadSignature,
}

/// Verifies `rsa-sha256` HTTP signatures against the device cloud's public
/// key.
#[derive(Debug, Clone)]
pub struct HttpSignatureVerifier {
    key: VerifyingKey<Sha256>,
}

impl HttpSignatureVerifier {
    /// Build a verifier from a PEM public key, SPKI (`BEGIN PUBLIC KEY`) or
    /// PKCS#1 (`BEGIN RSA PUBLIC KEY`).
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::InvalidKey`] when the PEM holds no RSA key.
    pub fn from_pem(pem: &str) -> Result<Self, VerifierError> {
        let key = match RsaPublicKey::from_public_key_pem(pem) {
            Ok(key) => key,
            Err(err) => RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| err)?,
        };
        Ok(Self {
            key: VerifyingKey::new(key),
        })
    }

    /// Read the PEM public key at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::Io`] when the file cannot be read and
    /// [`VerifierError::InvalidKey`] when it holds no RSA key.
    pub fn from_file(path: &Path) -> Result<Self, VerifierError> {
        let pem = std::fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    fn check(&self, request: &SignedRequest<'_>) -> Result<(), Rejection> {
        let params = signature_header(request.headers)
            .ok_or(Rejection::MissingSignature)
            .and_then(SignatureParams::parse)?;
        if let Some(algorithm) = &params.algorithm
            && !matches!(algorithm.as_str(), "rsa-sha256" | "hs2019")
        {
            return Err(Rejection::UnsupportedAlgorithm(algorithm.clone()));
        }
        check_digest(request)?;

        let message = signing_string(request, &params.headers)?;
        let signature = Signature::try_from(params.signature.as_slice())
            .map_err(|_| Rejection::BadSignature)?;
        self.key
            .verify(message.as_bytes(), &signature)
            .map_err(|_| Rejection::BadSignature)
    }
}

impl RequestVerifier for HttpSignatureVerifier {
    fn verify(&self, request: &SignedRequest<'_>) -> bool {
        match self.check(request) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(%reason, "rejected request signature");
                false
            }
        }
    }
}

struct SignatureParams {
    algorithm: Option<String>,
    headers: Vec<String>,
    signature: Vec<u8>,
}

impl SignatureParams {
    fn parse(value: &str) -> Result<Self, Rejection> {
        let mut algorithm = None;
        let mut headers: Option<Vec<String>> = None;
        let mut signature = None;

        let params = value.strip_prefix("Signature ").unwrap_or(value);
        for param in params.split(',') {
            let (name, raw) = param.trim().split_once('=').ok_or(Rejection::Malformed)?;
            let raw = raw.trim().trim_matches('"');
            match name.trim() {
                "algorithm" => algorithm = Some(raw.to_ascii_lowercase()),
                "headers" => {
                    headers = Some(
                        raw.split_ascii_whitespace()
                            .map(str::to_ascii_lowercase)
                            .collect(),
                    );
                }
                "signature" => {
                    signature = Some(STANDARD.decode(raw).map_err(|_| Rejection::Malformed)?);
                }
                _ => {}
            }
        }

        Ok(Self {
            algorithm,
            // Only `date` is signed when the list is omitted.
            headers: headers.unwrap_or_else(|| vec!["date".to_string()]),
            signature: signature.ok_or(Rejection::Malformed)?,
        })
    }
}

fn signature_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.starts_with("Signature "))
        .or_else(|| {
            headers
                .get("signature")
                .and_then(|value| value.to_str().ok())
        })
}

fn signing_string(request: &SignedRequest<'_>, names: &[String]) -> Result<String, Rejection> {
    let mut lines = Vec::with_capacity(names.len());
    for name in names {
        if name == REQUEST_TARGET {
            lines.push(format!(
                "{REQUEST_TARGET}: {} {}",
                request.method.as_str().to_ascii_lowercase(),
                request.path
            ));
            continue;
        }
        let values: Vec<&str> = request
            .headers
            .get_all(name.as_str())
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if values.is_empty() {
            return Err(Rejection::MissingHeader(name.clone()));
        }
        lines.push(format!("{name}: {}", values.join(", ")));
    }
    Ok(lines.join("\n"))
}

fn check_digest(request: &SignedRequest<'_>) -> Result<(), Rejection> {
    let Some(value) = request
        .headers
        .get("digest")
        .and_then(|value| value.to_str().ok())
    else {
        return Ok(());
    };
    let expected = STANDARD.encode(Sha256::digest(request.body));
    let matches = value
        .split(',')
        .filter_map(|entry| entry.trim().split_once('='))
        .any(|(algorithm, digest)| algorithm.eq_ignore_ascii_case("SHA-256") && digest == expected);
    if matches {
        Ok(())
    } else {
        Err(Rejection::DigestMismatch)
    }
}
