// src/checker/translate.rs
// =============================================================================
// The legacy (Turkish) -> current (English) path segment table.
//
// Early versions of the English docs linked to pages using the Turkish
// folder and file names. The English tree uses English names, so before we
// declare such a link broken we try the translated spelling.
//
// The table is a plain value handed to the link checker. The built-in table
// is the Default; a JSON object of "legacy": "current" pairs can replace it.
// =============================================================================

use crate::error::{DocsError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TranslationTable {
    segments: HashMap<String, String>,
}

// Segment pairs in the order they were collected from the old tree.
const BUILTIN_SEGMENTS: &[(&str, &str)] = &[
    // Concepts
    ("temel-kavramlar", "core-concepts"),
    ("temel-bilesenler", "core-components"),
    ("fundamental-concepts", "core-concepts"),
    ("fundamental-components", "core-components"),
    ("konnektor", "connector"),
    // File names
    ("environment", "what-is-environment"),
    ("api-proxy", "what-is-api-proxy"),
    ("policy", "what-is-policy"),
    ("api-listesi-yonetimi", "api-list-management"),
    ("yonlendirme", "routing"),
    ("http-yonlendirme", "http-routing"),
    ("websocket-yonlendirme", "websocket-routing"),
    ("grpc-yonlendirme", "grpc-routing"),
    ("api-proxy-olusturma", "api-proxy-creation"),
    ("api-proxy-konfigurasyonu", "api-proxy-configuration"),
    ("client-route-ayarlari", "client-route-settings"),
    ("api-creator-db-api-olusturma", "api-creator-db-api-creation"),
    ("db-api-creation", "api-creator-db-api-creation"),
    ("connector-api-proxy-olusturma", "connector-api-proxy-creation"),
    ("rest-api-proxy-olusturma", "rest-api-proxy-creation"),
    ("soaprest-api-proxy-creation", "soap-rest-api-proxy-creation"),
    ("politika-yonetimi", "policy-management"),
    ("politikalar", "policies"),
    ("script", "script"),
    ("mTLS", "mtls-authentication"),
    ("oidc", "oidc-authentication"),
    ("ws-timestamp", "ws-security-timestamp"),
    ("ws-encryption", "ws-security-encryption"),
    ("api-bazli-daraltma", "api-based-throttling"),
    ("upload-and-definition-file-information", "deployment-and-specification-information"),
    // Admin
    ("sertifikalar", "certificates"),
    ("role", "roles"),
    ("proje-olusturma", "project-creation"),
    ("ag-gecidi-ortamlari", "gateway-environments"),
    ("api-proxy-grup-acl", "api-proxy-group-acl"),
    // Integrations
    ("baglanti-yonetimi", "connection-management"),
    ("konnektorler", "connectors"),
    ("genel-bakis", "overview"),
    ("task-flow-tasarimi", "task-flow-design"),
    ("linux", "linux"),
    ("logback", "logback"),
    ("syslog", "syslog"),
    ("snmp", "snmp"),
    // Operations
    ("sorun-giderme", "troubleshooting"),
    ("mongodb-issues", "mongodb-troubleshooting"),
    ("common-issues-solutions", "common-problems-solutions"),
    (
        "kubernetes-high-availability-yuksek-erisim-cluster",
        "kubernetes-high-availability-cluster",
    ),
    ("centos-7-private-docker-registry", "private-docker-registry-on-centos-7"),
    // Analytic
    ("move-unsent-api-traffic-logs", "transfer-unsent-api-traffic-logs"),
    ("step-by-step-tracking", "step-by-step-tracing"),
    ("uptime-monitoring-usage", "uptime-monitor-usage"),
    // API Portal
    ("faq", "frequently-asked-questions"),
    // Setup
    ("setup", "setup/overview"),
];

impl Default for TranslationTable {
    fn default() -> Self {
        TranslationTable::from_pairs(BUILTIN_SEGMENTS.iter().copied())
    }
}

impl TranslationTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        TranslationTable {
            segments: pairs
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Loads a table from a JSON object such as `{"temel-kavramlar": "core-concepts"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DocsError::read(path, e))?;
        serde_json::from_str(&text).map_err(|e| DocsError::json(path, e))
    }

    pub fn lookup(&self, segment: &str) -> Option<&str> {
        self.segments.get(segment).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_core_concepts() {
        let table = TranslationTable::default();
        assert_eq!(table.lookup("temel-kavramlar"), Some("core-concepts"));
        assert_eq!(table.lookup("core-concepts"), None);
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"eski": "new"}"#).unwrap();

        let table = TranslationTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("eski"), Some("new"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            TranslationTable::from_json_file(&path),
            Err(DocsError::Json { .. })
        ));
    }
}
