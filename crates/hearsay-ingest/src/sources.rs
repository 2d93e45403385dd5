//! External source references for report citation
//!
//! Parses the Markdown reference-list format maintained alongside the
//! transcripts so session analyses can point at published documents.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// One published document usable as a citation target.
#[derive(Debug, Clone)]
pub struct ExternalDocument {
    pub doc_id: String,
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Session-to-document association.
#[derive(Debug, Clone)]
pub struct SessionDocumentMapping {
    pub session_id: String,
    pub related_doc_ids: Vec<String>,
    pub description: String,
}

/// Parsed external-source list: documents plus per-session mappings.
#[derive(Debug, Default)]
pub struct ExternalSourcesRepository {
    documents: HashMap<String, ExternalDocument>,
    session_mappings: HashMap<String, SessionDocumentMapping>,
}

impl ExternalSourcesRepository {
    pub fn add_document(&mut self, document: ExternalDocument) {
        self.documents.insert(document.doc_id.clone(), document);
    }

    pub fn add_session_mapping(&mut self, mapping: SessionDocumentMapping) {
        self.session_mappings.insert(mapping.session_id.clone(), mapping);
    }

    pub fn document(&self, doc_id: &str) -> Option<&ExternalDocument> {
        self.documents.get(doc_id)
    }

    /// Documents related to a session, in mapping order; unknown document
    /// ids are silently dropped.
    pub fn documents_for_session(&self, session_id: &str) -> Vec<&ExternalDocument> {
        let Some(mapping) = self.session_mappings.get(session_id) else {
            return Vec::new();
        };
        mapping
            .related_doc_ids
            .iter()
            .filter_map(|doc_id| self.documents.get(doc_id))
            .collect()
    }

    /// Primary citation URL for a session, empty when unmapped.
    pub fn primary_url_for_session(&self, session_id: &str) -> &str {
        self.documents_for_session(session_id)
            .first()
            .map(|document| document.url.as_str())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.session_mappings.is_empty()
    }
}

static DOC_PATTERN: OnceLock<Regex> = OnceLock::new();
static SESSION_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Parse the Markdown external-source list format: document entries
/// (`- **文書ID**: ...`) followed by per-session mappings
/// (`### セッション: ...`).
pub fn parse_external_sources_markdown(content: &str) -> ExternalSourcesRepository {
    let doc_re = DOC_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?s)-\s*\*\*文書ID\*\*:\s*(?P<doc_id>\S+).*?-\s*\*\*タイトル\*\*:\s*(?P<title>[^\n]+).*?-\s*\*\*URL\*\*:\s*(?P<url>\S+).*?-\s*\*\*説明\*\*:\s*(?P<description>[^\n]+)",
        )
        .expect("document pattern must compile")
    });
    let session_re = SESSION_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?s)###\s*セッション:\s*(?P<session_id>\S+).*?-\s*\*\*関連文書\*\*:\s*(?P<doc_ids>[^\n]+).*?-\s*\*\*説明\*\*:\s*(?P<description>[^\n]+)",
        )
        .expect("session pattern must compile")
    });

    let mut repo = ExternalSourcesRepository::default();

    for capture in doc_re.captures_iter(content) {
        let document = ExternalDocument {
            doc_id: capture["doc_id"].trim().to_string(),
            title: capture["title"].trim().to_string(),
            url: capture["url"].trim().to_string(),
            description: capture["description"].trim().to_string(),
        };
        debug!(doc_id = %document.doc_id, title = %document.title, "external document parsed");
        repo.add_document(document);
    }

    for capture in session_re.captures_iter(content) {
        let mapping = SessionDocumentMapping {
            session_id: capture["session_id"].trim().to_string(),
            related_doc_ids: capture["doc_ids"]
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            description: capture["description"].trim().to_string(),
        };
        debug!(session_id = %mapping.session_id, "session mapping parsed");
        repo.add_session_mapping(mapping);
    }

    info!(
        documents = repo.documents.len(),
        mappings = repo.session_mappings.len(),
        "external source list parsed"
    );
    repo
}

/// Load the external-source list, tolerating a missing or unreadable file.
pub fn load_external_sources(path: &Path) -> ExternalSourcesRepository {
    if !path.exists() {
        warn!(path = %path.display(), "external source list not found");
        return ExternalSourcesRepository::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => parse_external_sources_markdown(&content),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read external source list");
            ExternalSourcesRepository::default()
        }
    }
}
