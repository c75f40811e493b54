//! Put-mapping dialect
//!
//! Only schema nodes compile here: documents, declared fields and meta
//! fields. Query nodes are rejected with `UnsupportedNode`.

use serde_json::{Map, Value};
use tracing::debug;

use super::{single, Compiler};
use crate::config::CompilerConfig;
use crate::query::{Field, MultiFields, Node};
use crate::schema::{Document, MappingField};
use crate::Result;

/// Compiler for index mapping bodies
#[derive(Clone, Debug, Default)]
pub struct MappingCompiler {
    config: CompilerConfig,
}

impl MappingCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile the full mapping of a document type
    pub fn compile_document(&self, document: &Document) -> Result<Value> {
        let body = self.visit_document(document, self.enter(0)?)?;
        debug!(
            doc_type = document.doc_type(),
            fields = document.user_fields().len(),
            "compiled document mapping"
        );
        Ok(body)
    }

    /// Mapping fragment of a single field, without the name wrapper
    pub fn field_mapping(&self, field: &Field, depth: usize) -> Result<Map<String, Value>> {
        let depth = self.enter(depth)?;
        let mut mapping = Map::new();
        mapping.insert("type".to_string(), field.field_type().wire_name().into());

        if let Some(document) = field.field_type().document() {
            let properties = self
                .visit_fields(document.user_fields(), depth)
                .map_err(|e| e.at_key("properties"))?;
            mapping.insert("properties".to_string(), Value::Object(properties));
        }

        let sub_fields = match field.multi_fields() {
            MultiFields::None => Map::new(),
            MultiFields::Types(types) => types
                .iter()
                .map(|(name, field_type)| {
                    (name.clone(), single("type", field_type.wire_name().into()))
                })
                .collect(),
            MultiFields::Fields(fields) => self
                .visit_fields(fields, depth)
                .map_err(|e| e.at_key("fields"))?,
        };
        if !sub_fields.is_empty() {
            mapping.insert("fields".to_string(), Value::Object(sub_fields));
        }

        mapping.extend(self.visit_params(field.mapping_options(), depth)?);
        Ok(mapping)
    }

    fn visit_field(&self, field: &Field, depth: usize) -> Result<Map<String, Value>> {
        let fragment = self
            .field_mapping(field, depth)
            .map_err(|e| e.at_key(field.name()))?;
        let mut out = Map::with_capacity(1);
        out.insert(field.name().to_string(), Value::Object(fragment));
        Ok(out)
    }

    fn visit_fields(&self, fields: &[Field], depth: usize) -> Result<Map<String, Value>> {
        let mut out = Map::with_capacity(fields.len());
        for field in fields {
            out.extend(self.visit_field(field, depth)?);
        }
        Ok(out)
    }

    fn visit_mapping_field(&self, field: &MappingField, depth: usize) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        if field.options().is_empty() {
            return Ok(out);
        }
        let options = self
            .visit_params(field.options(), depth)
            .map_err(|e| e.at_key(field.name()))?;
        out.insert(field.name().to_string(), Value::Object(options));
        Ok(out)
    }

    fn visit_document(&self, document: &Document, depth: usize) -> Result<Value> {
        let mut mapping = self.visit_params(document.mapping_options(), depth)?;

        for field in document.mapping_fields() {
            mapping.extend(self.visit_mapping_field(field, depth)?);
        }

        let properties = self
            .visit_fields(document.user_fields(), depth)
            .map_err(|e| e.at_key("properties"))?;
        mapping.insert("properties".to_string(), Value::Object(properties));

        if !document.dynamic_fields().is_empty() {
            let templates = document
                .dynamic_fields()
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let mut template = Map::new();
                    template.insert("path_match".to_string(), field.name().into());
                    let fragment = self
                        .field_mapping(field, depth)
                        .map_err(|e| e.at_index(i).at_key("dynamic_templates"))?;
                    template.insert("mapping".to_string(), Value::Object(fragment));
                    Ok(single(field.name(), Value::Object(template)))
                })
                .collect::<Result<Vec<_>>>()?;
            mapping.insert("dynamic_templates".to_string(), Value::Array(templates));
        }

        Ok(single(document.doc_type(), Value::Object(mapping)))
    }
}

impl Compiler for MappingCompiler {
    const DIALECT: &'static str = "mapping";

    fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn visit_node(&self, node: &Node, depth: usize) -> Result<Value> {
        match node {
            Node::Field(field) => self.visit_field(field, depth).map(Value::Object),
            Node::MappingField(field) => self.visit_mapping_field(field, depth).map(Value::Object),
            Node::Document(document) => self.visit_document(document, depth),
            Node::Boost(_)
            | Node::FieldQuery(_)
            | Node::QueryExpression(_)
            | Node::Range(_)
            | Node::Terms(_)
            | Node::MultiMatch(_)
            | Node::Query(_)
            | Node::Boolean(_)
            | Node::Not(_)
            | Node::Sort(_)
            | Node::Aggregation(_)
            | Node::Source(_)
            | Node::Rescore(_)
            | Node::Search(_) => Err(self.unsupported(node)),
        }
    }
}
