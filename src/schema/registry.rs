//! Per-index document registry
//!
//! An [`Index`] owns the document types declared for one index. Unknown
//! type names resolve to schema-less documents, synthesized on first use and
//! cached, unless the index settings disable that.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use super::document::Document;
use crate::compiler::{MappingCompiler, QueryCompiler};
use crate::config::IndexSettings;
use crate::error::DslError;
use crate::query::SearchQuery;
use crate::Result;

/// Handle to a named index and its document types
#[derive(Debug)]
pub struct Index {
    settings: IndexSettings,
    documents: RwLock<HashMap<String, Arc<Document>>>,
}

impl Index {
    pub fn new(settings: IndexSettings) -> Self {
        Self {
            settings,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Create an index handle with default settings
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(IndexSettings::new(name))
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Register a declared document type, replacing any previous one
    pub fn register(&self, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        let previous = self
            .documents
            .write()
            .insert(document.doc_type().to_string(), Arc::clone(&document));
        debug!(
            index = %self.settings.name,
            doc_type = document.doc_type(),
            replaced = previous.is_some(),
            "registered document type"
        );
        document
    }

    /// Look up a document type
    pub fn doc_type(&self, name: &str) -> Result<Arc<Document>> {
        if let Some(document) = self.documents.read().get(name) {
            return Ok(Arc::clone(document));
        }

        if !self.settings.dynamic_documents {
            return Err(DslError::Validation(format!(
                "document type `{}` is not registered on index `{}`",
                name, self.settings.name
            )));
        }

        let mut documents = self.documents.write();
        let document = documents.entry(name.to_string()).or_insert_with(|| {
            debug!(
                index = %self.settings.name,
                doc_type = name,
                "synthesized schema-less document type"
            );
            Arc::new(Document::dynamic(name))
        });
        Ok(Arc::clone(document))
    }

    /// Names of all known document types, sorted
    pub fn doc_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.documents.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Start a search request compiled with this index's settings
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new().with_compiler_config(self.settings.compiler.clone())
    }

    /// Compile a search body with this index's compiler settings
    pub fn search_body(&self, query: &SearchQuery) -> Result<Value> {
        QueryCompiler::new(self.settings.compiler.clone()).compile_search(query)
    }

    /// Compile the put-mapping body of a registered document type
    pub fn put_mapping_body(&self, doc_type: &str) -> Result<Value> {
        let document = self.doc_type(doc_type)?;
        MappingCompiler::new(self.settings.compiler.clone()).compile_document(&document)
    }
}
