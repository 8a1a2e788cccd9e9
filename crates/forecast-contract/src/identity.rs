//! Caller identity resolution from transport-supplied credentials.
//!
//! The invocation transport hands the contract an opaque creator blob per
//! call: an X.509 certificate in PEM armor, possibly wrapped in surrounding
//! framing bytes. This module slices out the PEM block, parses the
//! certificate, and derives the `(common_name, organization)` pair the
//! authorization policy keys on. Trust roots are the transport's concern;
//! nothing here validates a chain.
//!
//! Resolution is injected into the service as a trait object so tests can
//! substitute a fixed identity.

use std::io::BufReader;

use thiserror::Error;
use x509_parser::prelude::*;

/// The five-character PEM boundary marker. The PEM block is the slice
/// between the first and last occurrence in the creator bytes, inclusive
/// of the final marker.
const PEM_MARKER: &[u8] = b"-----";

/// The identity derived from a caller's credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The certificate subject's common name.
    pub common_name: String,
    /// The issuer organization, truncated at its first `.` character.
    ///
    /// Certificate issuers encode the organization as
    /// `orgname.more.detail`; authorization keys on the leading segment.
    pub organization: String,
}

/// Errors raised while resolving a caller identity.
///
/// These reject the caller; they are never process-level failures.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The creator bytes contain no well-formed PEM block.
    #[error("creator credential contains no PEM block")]
    MissingPemBlock,

    /// The PEM block could not be decoded to a DER certificate.
    #[error("cannot decode PEM block: {message}")]
    PemDecode {
        /// Description of the decode failure.
        message: String,
    },

    /// The DER bytes are not a parseable X.509 certificate.
    #[error("cannot parse certificate: {message}")]
    CertificateParse {
        /// Description of the parse failure.
        message: String,
    },

    /// The certificate's issuer carries no usable organization.
    #[error("certificate issuer has no organization")]
    MissingOrganization,
}

/// Resolves a caller identity from the transport-supplied creator bytes.
///
/// Injected into the service at construction time so authorization can be
/// exercised in tests without minting certificates.
pub trait IdentityResolver: Send + Sync {
    /// Derives the caller's identity from the raw creator bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when no PEM block is present, the PEM
    /// does not decode, the certificate does not parse, or the issuer has
    /// no organization.
    fn resolve(&self, creator: &[u8]) -> Result<CallerIdentity, IdentityError>;
}

/// Production resolver: PEM-armored X.509 certificate in the creator bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateIdentityResolver;

impl CertificateIdentityResolver {
    /// Creates a new certificate resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IdentityResolver for CertificateIdentityResolver {
    fn resolve(&self, creator: &[u8]) -> Result<CallerIdentity, IdentityError> {
        let block = pem_block(creator)?;

        let mut reader = BufReader::new(block);
        let der = rustls_pemfile::certs(&mut reader)
            .next()
            .transpose()
            .map_err(|err| IdentityError::PemDecode {
                message: err.to_string(),
            })?
            .ok_or_else(|| IdentityError::PemDecode {
                message: "no certificate entries in PEM block".to_string(),
            })?;

        let (_, cert) = X509Certificate::from_der(der.as_ref()).map_err(|err| {
            IdentityError::CertificateParse {
                message: err.to_string(),
            }
        })?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|attr| attr.as_str().ok())
            .unwrap_or_default()
            .to_string();

        let organization = cert
            .issuer()
            .iter_organization()
            .next()
            .and_then(|attr| attr.as_str().ok())
            .ok_or(IdentityError::MissingOrganization)?;

        let short_name = organization.split('.').next().unwrap_or_default();
        if short_name.is_empty() {
            return Err(IdentityError::MissingOrganization);
        }

        tracing::debug!(
            common_name = %common_name,
            organization = %short_name,
            "resolved caller identity"
        );

        Ok(CallerIdentity {
            common_name,
            organization: short_name.to_string(),
        })
    }
}

/// Fixed-identity resolver for tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub CallerIdentity);

impl StaticIdentity {
    /// Creates a resolver that always yields the given identity.
    #[must_use]
    pub fn new(common_name: impl Into<String>, organization: impl Into<String>) -> Self {
        Self(CallerIdentity {
            common_name: common_name.into(),
            organization: organization.into(),
        })
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve(&self, _creator: &[u8]) -> Result<CallerIdentity, IdentityError> {
        Ok(self.0.clone())
    }
}

/// Slices the PEM block out of the creator bytes: from the first `-----`
/// marker through the end of the last one. The surrounding framing may not
/// be valid UTF-8, so the search runs over raw bytes.
fn pem_block(creator: &[u8]) -> Result<&[u8], IdentityError> {
    let start = find_marker(creator).ok_or(IdentityError::MissingPemBlock)?;
    let end = rfind_marker(creator).ok_or(IdentityError::MissingPemBlock)?;
    if end <= start {
        // A single marker is not a block.
        return Err(IdentityError::MissingPemBlock);
    }
    Ok(&creator[start..end + PEM_MARKER.len()])
}

fn find_marker(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(PEM_MARKER.len())
        .position(|window| window == PEM_MARKER)
}

fn rfind_marker(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(PEM_MARKER.len())
        .rposition(|window| window == PEM_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_creator_has_no_pem_block() {
        let err = CertificateIdentityResolver::new().resolve(b"").unwrap_err();
        assert!(matches!(err, IdentityError::MissingPemBlock));
    }

    #[test]
    fn creator_without_markers_has_no_pem_block() {
        let err = CertificateIdentityResolver::new()
            .resolve(b"\x0a\x07org1MSP not a certificate")
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingPemBlock));
    }

    #[test]
    fn single_marker_is_not_a_block() {
        let err = CertificateIdentityResolver::new()
            .resolve(b"prefix ----- suffix")
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingPemBlock));
    }

    #[test]
    fn garbage_between_markers_fails_pem_decode() {
        let blob = b"-----BEGIN CERTIFICATE-----\nnot base64!!\n-----END CERTIFICATE-----";
        let err = CertificateIdentityResolver::new().resolve(blob).unwrap_err();
        assert!(matches!(
            err,
            IdentityError::PemDecode { .. } | IdentityError::MissingPemBlock
        ));
    }

    #[test]
    fn pem_block_slices_between_outer_markers() {
        let framed = b"\x01\x02framing-----BEGIN X-----abc-----END X-----trailing\x03";
        let block = pem_block(framed).expect("block");
        assert!(block.starts_with(b"-----BEGIN X-----"));
        assert!(block.ends_with(b"-----END X-----"));
    }

    #[test]
    fn static_identity_resolves_without_credential() {
        let resolver = StaticIdentity::new("buyer@walmart", "walmart");
        let identity = resolver.resolve(b"ignored").expect("identity");
        assert_eq!(identity.organization, "walmart");
        assert_eq!(identity.common_name, "buyer@walmart");
    }
}
