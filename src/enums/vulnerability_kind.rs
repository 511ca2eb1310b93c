use std::fmt;
use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

/// Closed set of vulnerability categories. Wire names match the display names.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum VulnerabilityKind {
    #[serde(rename = "SQL/Command Injection")]
    Injection,
    #[serde(rename = "Cross-Site Scripting (XSS)")]
    CrossSiteScripting,
    #[serde(rename = "Hardcoded Credentials")]
    HardcodedCredentials,
    #[serde(rename = "Path Traversal")]
    PathTraversal,
    #[serde(rename = "Insecure Deserialization")]
    InsecureDeserialization,
    #[serde(rename = "Weak Cryptography")]
    WeakCryptography,
    #[serde(rename = "Open Redirect")]
    OpenRedirect,
    #[serde(rename = "Insufficient Input Validation")]
    InsufficientInputValidation,
    #[serde(rename = "Insecure Randomness")]
    InsecureRandomness,
    #[serde(rename = "Server-Side Request Forgery (SSRF)")]
    ServerSideRequestForgery,
    #[serde(rename = "Unhandled Runtime Error")]
    UnhandledRuntimeError,
    #[serde(rename = "Resource Exhaustion")]
    ResourceExhaustion,
}

/// Static attributes attached to every category.
#[derive(Debug, Clone, Copy)]
pub struct KindAttributes {
    pub name: &'static str,
    pub default_severity: Severity,
    pub default_cwe: &'static str,
    pub fallback_fix: &'static str,
}

impl VulnerabilityKind {
    pub const ALL: [VulnerabilityKind; 12] = [
        VulnerabilityKind::Injection,
        VulnerabilityKind::CrossSiteScripting,
        VulnerabilityKind::HardcodedCredentials,
        VulnerabilityKind::PathTraversal,
        VulnerabilityKind::InsecureDeserialization,
        VulnerabilityKind::WeakCryptography,
        VulnerabilityKind::OpenRedirect,
        VulnerabilityKind::InsufficientInputValidation,
        VulnerabilityKind::InsecureRandomness,
        VulnerabilityKind::ServerSideRequestForgery,
        VulnerabilityKind::UnhandledRuntimeError,
        VulnerabilityKind::ResourceExhaustion,
    ];

    pub const fn attributes(&self) -> KindAttributes {
        match self {
            Self::Injection => KindAttributes {
                name: "SQL/Command Injection",
                default_severity: Severity::Critical,
                default_cwe: "CWE-89",
                fallback_fix: "Use parameterized queries or prepared statements. Never concatenate user input directly into SQL queries or shell commands.",
            },
            Self::CrossSiteScripting => KindAttributes {
                name: "Cross-Site Scripting (XSS)",
                default_severity: Severity::High,
                default_cwe: "CWE-79",
                fallback_fix: "Sanitize and escape all user input before rendering. Use Content Security Policy (CSP) headers. Avoid using innerHTML or dangerouslySetInnerHTML with user data.",
            },
            Self::HardcodedCredentials => KindAttributes {
                name: "Hardcoded Credentials",
                default_severity: Severity::High,
                default_cwe: "CWE-798",
                fallback_fix: "Store credentials in environment variables or a secure secrets manager. Never commit sensitive data to version control.",
            },
            Self::PathTraversal => KindAttributes {
                name: "Path Traversal",
                default_severity: Severity::High,
                default_cwe: "CWE-22",
                fallback_fix: "Validate and sanitize file paths. Use allowlists for permitted paths. Implement proper access controls.",
            },
            Self::InsecureDeserialization => KindAttributes {
                name: "Insecure Deserialization",
                default_severity: Severity::High,
                default_cwe: "CWE-502",
                fallback_fix: "Validate data before deserialization. Use safe alternatives like JSON. Implement integrity checks.",
            },
            Self::WeakCryptography => KindAttributes {
                name: "Weak Cryptography",
                default_severity: Severity::Medium,
                default_cwe: "CWE-327",
                fallback_fix: "Use modern cryptographic algorithms (AES-256, SHA-256+). Implement proper key management. Use TLS 1.2+ for network communications.",
            },
            Self::OpenRedirect => KindAttributes {
                name: "Open Redirect",
                default_severity: Severity::Medium,
                default_cwe: "CWE-601",
                fallback_fix: "Validate redirect URLs against an allowlist. Avoid using user input directly in redirect functions.",
            },
            Self::InsufficientInputValidation => KindAttributes {
                name: "Insufficient Input Validation",
                default_severity: Severity::Low,
                default_cwe: "CWE-20",
                fallback_fix: "Implement strict input validation. Use allowlists over denylists. Sanitize all user input.",
            },
            Self::InsecureRandomness => KindAttributes {
                name: "Insecure Randomness",
                default_severity: Severity::Medium,
                default_cwe: "CWE-338",
                fallback_fix: "Use cryptographically secure random number generators (crypto.randomBytes, secrets module).",
            },
            Self::ServerSideRequestForgery => KindAttributes {
                name: "Server-Side Request Forgery (SSRF)",
                default_severity: Severity::High,
                default_cwe: "CWE-918",
                fallback_fix: "Validate and sanitize URLs. Implement allowlists for permitted domains. Use network segmentation.",
            },
            Self::UnhandledRuntimeError => KindAttributes {
                name: "Unhandled Runtime Error",
                default_severity: Severity::Medium,
                default_cwe: "CWE-248",
                fallback_fix: "Catch and handle exceptions at trust boundaries. Never expose stack traces or internal error details to callers.",
            },
            Self::ResourceExhaustion => KindAttributes {
                name: "Resource Exhaustion",
                default_severity: Severity::High,
                default_cwe: "CWE-400",
                fallback_fix: "Bound loops, recursion and allocations. Enforce timeouts and size limits on work driven by untrusted input.",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.attributes().name
    }

    pub fn fallback_fix(&self) -> &'static str {
        self.attributes().fallback_fix
    }

    pub fn default_cwe(&self) -> &'static str {
        self.attributes().default_cwe
    }

    /// Severity a finding of this category gets unless its signature says otherwise.
    pub const fn default_severity(&self) -> Severity {
        self.attributes().default_severity
    }
}

impl fmt::Display for VulnerabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_name_matches_display_name() {
        for kind in VulnerabilityKind::ALL {
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{}\"", kind.name()));
            let parsed: VulnerabilityKind = serde_json::from_str(&wire).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_attribute_table_is_complete() {
        let names: HashSet<_> = VulnerabilityKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), VulnerabilityKind::ALL.len());

        for kind in VulnerabilityKind::ALL {
            assert!(!kind.fallback_fix().is_empty());
            assert!(kind.default_cwe().starts_with("CWE-"));
        }
    }

    #[test]
    fn test_runtime_categories_default_severity() {
        assert_eq!(VulnerabilityKind::UnhandledRuntimeError.default_severity(), Severity::Medium);
        assert_eq!(VulnerabilityKind::ResourceExhaustion.default_severity(), Severity::High);
    }
}
