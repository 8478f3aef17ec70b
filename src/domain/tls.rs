//! TLS policy types
//!
//! Certificate and trust sources are tagged unions: exactly one branch is
//! populated, and the type makes a second branch unrepresentable. On the
//! wire each union is an object with a single key naming the branch
//! (`{"acm": {...}}` or `{"file": {...}}`); an object naming two branches
//! fails to decode.

use serde::{Deserialize, Serialize};

use super::enums::ListenerTlsMode;
use super::render::impl_render_display;

/// Certificate issued by AWS Certificate Manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerTlsAcmCertificate {
    pub certificate_arn: String,
}

/// Certificate read from the proxy's local file system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerTlsFileCertificate {
    /// Path to the certificate chain, 1-255 characters
    pub certificate_chain: String,

    /// Path to the private key, 1-255 characters
    pub private_key: String,
}

/// Where a listener's certificate comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerTlsCertificate {
    Acm(ListenerTlsAcmCertificate),
    File(ListenerTlsFileCertificate),
}

impl ListenerTlsCertificate {
    pub fn acm(certificate_arn: impl Into<String>) -> Self {
        Self::Acm(ListenerTlsAcmCertificate { certificate_arn: certificate_arn.into() })
    }

    pub fn file(certificate_chain: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self::File(ListenerTlsFileCertificate {
            certificate_chain: certificate_chain.into(),
            private_key: private_key.into(),
        })
    }

    pub fn as_acm(&self) -> Option<&ListenerTlsAcmCertificate> {
        match self {
            Self::Acm(acm) => Some(acm),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&ListenerTlsFileCertificate> {
        match self {
            Self::File(file) => Some(file),
            Self::Acm(_) => None,
        }
    }
}

/// Inbound TLS settings of a listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerTls {
    pub certificate: ListenerTlsCertificate,

    pub mode: ListenerTlsMode,
}

impl ListenerTls {
    pub fn new(certificate: ListenerTlsCertificate, mode: ListenerTlsMode) -> Self {
        Self { certificate, mode }
    }

    pub fn strict(certificate: ListenerTlsCertificate) -> Self {
        Self::new(certificate, ListenerTlsMode::Strict)
    }

    pub fn with_certificate(mut self, certificate: ListenerTlsCertificate) -> Self {
        self.certificate = certificate;
        self
    }

    pub fn with_mode(mut self, mode: ListenerTlsMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Trust anchored in ACM Private CA authorities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsValidationContextAcmTrust {
    /// 1-3 certificate authority ARNs
    pub certificate_authority_arns: Vec<String>,
}

/// Trust anchored in a certificate chain on the local file system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsValidationContextFileTrust {
    pub certificate_chain: String,
}

/// Source of truth used to validate a peer certificate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TlsValidationContextTrust {
    Acm(TlsValidationContextAcmTrust),
    File(TlsValidationContextFileTrust),
}

impl TlsValidationContextTrust {
    pub fn acm<I, S>(certificate_authority_arns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Acm(TlsValidationContextAcmTrust {
            certificate_authority_arns: certificate_authority_arns
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }

    pub fn file(certificate_chain: impl Into<String>) -> Self {
        Self::File(TlsValidationContextFileTrust { certificate_chain: certificate_chain.into() })
    }
}

/// Peer certificate validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsValidationContext {
    pub trust: TlsValidationContextTrust,
}

impl TlsValidationContext {
    pub fn new(trust: TlsValidationContextTrust) -> Self {
        Self { trust }
    }
}

/// Outbound TLS policy toward a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicyTls {
    /// Absent means the service default (enforced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<bool>,

    /// Ports the policy applies to; empty means every port
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,

    pub validation: TlsValidationContext,
}

impl ClientPolicyTls {
    pub fn new(validation: TlsValidationContext) -> Self {
        Self { enforce: None, ports: Vec::new(), validation }
    }

    pub fn with_enforce(mut self, enforce: bool) -> Self {
        self.enforce = Some(enforce);
        self
    }

    pub fn with_ports(mut self, ports: Vec<i32>) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_port(mut self, port: i32) -> Self {
        self.ports.push(port);
        self
    }

    /// Whether TLS is enforced once the service default is applied.
    pub fn is_enforced(&self) -> bool {
        self.enforce.unwrap_or(true)
    }

    /// Whether the policy covers `port`.
    pub fn applies_to(&self, port: i32) -> bool {
        self.ports.is_empty() || self.ports.contains(&port)
    }
}

/// Client-side policy applied to backend traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientPolicyTls>,
}

impl ClientPolicy {
    pub fn with_tls(mut self, tls: ClientPolicyTls) -> Self {
        self.tls = Some(tls);
        self
    }
}

impl_render_display!(
    ListenerTlsAcmCertificate,
    ListenerTlsFileCertificate,
    ListenerTlsCertificate,
    ListenerTls,
    TlsValidationContextAcmTrust,
    TlsValidationContextFileTrust,
    TlsValidationContextTrust,
    TlsValidationContext,
    ClientPolicyTls,
    ClientPolicy,
);
