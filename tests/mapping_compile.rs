//! Integration tests for put-mapping compilation

use searchdsl::query::{Field, MultiFields};
use searchdsl::schema::{Document, FieldType, Index, MappingField};
use searchdsl::{Compiler, DslError, IndexSettings, MappingCompiler};
use serde_json::json;

fn author() -> Document {
    Document::builder("author")
        .field(Field::typed("name", FieldType::String))
        .field(Field::typed("born", FieldType::Date).with_mapping_option("format", "year"))
        .build()
        .unwrap()
}

fn book() -> Document {
    Document::builder("book")
        .mapping_option("date_detection", false)
        .mapping_field(MappingField::parent("shelf"))
        .mapping_field(MappingField::routing())
        .field(
            Field::typed("title", FieldType::String)
                .with_multi_field("raw", FieldType::Keyword)
                .with_mapping_option("analyzer", "english"),
        )
        .field(Field::typed("tags", FieldType::list(FieldType::Keyword)))
        .field(Field::typed("author", FieldType::object(author())))
        .dynamic_field(Field::typed("attr_*", FieldType::Keyword).with_mapping_option("index", "not_analyzed"))
        .build()
        .unwrap()
}

#[test]
fn test_document_mapping_end_to_end() {
    let mapping = book().to_mapping().unwrap();
    assert_eq!(
        mapping,
        json!({"book": {
            "date_detection": false,
            "_parent": {"type": "shelf"},
            "properties": {
                "title": {
                    "type": "string",
                    "fields": {"raw": {"type": "keyword"}},
                    "analyzer": "english"
                },
                "tags": {"type": "keyword"},
                "author": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "born": {"type": "date", "format": "year"}
                    }
                }
            },
            "dynamic_templates": [
                {"attr_*": {
                    "path_match": "attr_*",
                    "mapping": {"type": "keyword", "index": "not_analyzed"}
                }}
            ]
        }})
    );

    let keys: Vec<&String> = mapping["book"].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["date_detection", "_parent", "properties", "dynamic_templates"]
    );
}

#[test]
fn test_dynamic_template_matches_static_fragment() {
    let doc = book();
    let template = doc.dynamic_fields()[0].clone();
    let compiled = doc.to_mapping().unwrap();
    let entry = &compiled["book"]["dynamic_templates"][0][template.name()];

    assert_eq!(entry["path_match"], json!(template.name()));

    let fragment = MappingCompiler::default().compile(&template.clone().into()).unwrap();
    assert_eq!(entry["mapping"], fragment[template.name()]);
}

#[test]
fn test_multi_field_forms_agree() {
    let by_type = Field::typed("name", FieldType::Text).with_multi_field("raw", FieldType::Keyword);
    let by_field = Field::typed("name", FieldType::Text)
        .with_multi_fields(MultiFields::Fields(vec![Field::typed("raw", FieldType::Keyword)]));

    let compiler = MappingCompiler::default();
    assert_eq!(
        compiler.compile(&by_type.into()).unwrap(),
        compiler.compile(&by_field.into()).unwrap()
    );
}

#[test]
fn test_nested_document_properties() {
    let comments = Document::builder("comment")
        .field(Field::typed("body", FieldType::Text))
        .build()
        .unwrap();
    let field = Field::typed("comments", FieldType::nested(comments));

    assert_eq!(
        MappingCompiler::default().compile(&field.into()).unwrap(),
        json!({"comments": {"type": "nested", "properties": {"body": {"type": "text"}}}})
    );
}

#[test]
fn test_search_nodes_are_rejected() {
    let err = MappingCompiler::default()
        .compile(&Field::new("age").gte(3).into())
        .unwrap_err();
    assert!(err.is_programming_error());
    assert!(matches!(
        err,
        DslError::UnsupportedNode { tag: "range", dialect: "mapping" }
    ));
}

#[test]
fn test_index_put_mapping_body() {
    let index = Index::new(IndexSettings::new("library").with_dynamic_documents(false));
    index.register(book());

    let body = index.put_mapping_body("book").unwrap();
    assert_eq!(body, book().to_mapping().unwrap());
    assert!(index.put_mapping_body("magazine").is_err());
}
