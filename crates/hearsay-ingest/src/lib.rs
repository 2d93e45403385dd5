//! Tabular input collaborator: CSV transcript loading, session selection,
//! format conversion and supplementary material loading

mod convert;
mod loader;
mod references;
mod sessions;
mod sources;

pub use convert::convert_csv_to_json;
pub use loader::{load_messages, parse_timestamp, CONTENT_COL, ROLE_COL, SESSION_ID_COL, TIMESTAMP_COL};
pub use references::load_reference_materials;
pub use sessions::{load_session_order, select_sessions};
pub use sources::{
    load_external_sources, parse_external_sources_markdown, ExternalDocument,
    ExternalSourcesRepository, SessionDocumentMapping,
};
