//! Abstract Syntax Tree for queries and schemas
//!
//! This module defines the closed set of node kinds the compilers dispatch on.
//! Each node reports a stable [`CompileTag`]; each dialect compiler matches
//! exhaustively over [`Node`], so a new node kind does not build until every
//! dialect has decided how to handle it.

use std::fmt;
use std::sync::Arc;

use super::expr::Expr;
use super::nodes::{
    Aggregation, BooleanExpression, BoostExpression, Field, FieldQuery, MultiMatch,
    NotExpression, QueryExpression, QueryRescorer, Range, Sort, Source, Terms, WrappedQuery,
};
use super::search::SearchQuery;
use crate::schema::{Document, MappingField};

/// Stable dispatch tag of a node kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompileTag {
    Field,
    BoostExpression,
    FieldQuery,
    QueryExpression,
    Range,
    Terms,
    MultiMatch,
    Query,
    BooleanExpression,
    Not,
    Sort,
    Agg,
    BucketAgg,
    FilterAgg,
    Source,
    Rescore,
    SearchQuery,
    MappingField,
    Document,
}

impl CompileTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompileTag::Field => "field",
            CompileTag::BoostExpression => "boost_expression",
            CompileTag::FieldQuery => "field_query",
            CompileTag::QueryExpression => "query_expression",
            CompileTag::Range => "range",
            CompileTag::Terms => "terms",
            CompileTag::MultiMatch => "multi_match",
            CompileTag::Query => "query",
            CompileTag::BooleanExpression => "boolean_expression",
            CompileTag::Not => "not",
            CompileTag::Sort => "sort",
            CompileTag::Agg => "agg",
            CompileTag::BucketAgg => "bucket_agg",
            CompileTag::FilterAgg => "filter_agg",
            CompileTag::Source => "source",
            CompileTag::Rescore => "rescore",
            CompileTag::SearchQuery => "search_query",
            CompileTag::MappingField => "mapping_field",
            CompileTag::Document => "document",
        }
    }
}

impl fmt::Display for CompileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compilable node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Field(Field),
    Boost(BoostExpression),
    FieldQuery(FieldQuery),
    QueryExpression(QueryExpression),
    Range(Range),
    Terms(Terms),
    MultiMatch(MultiMatch),
    Query(WrappedQuery),
    Boolean(BooleanExpression),
    Not(NotExpression),
    Sort(Sort),
    Aggregation(Aggregation),
    Source(Source),
    Rescore(QueryRescorer),
    Search(SearchQuery),
    MappingField(MappingField),
    Document(Arc<Document>),
}

impl Node {
    /// Get the dispatch tag of this node
    pub fn tag(&self) -> CompileTag {
        match self {
            Node::Field(_) => CompileTag::Field,
            Node::Boost(_) => CompileTag::BoostExpression,
            Node::FieldQuery(_) => CompileTag::FieldQuery,
            Node::QueryExpression(_) => CompileTag::QueryExpression,
            Node::Range(_) => CompileTag::Range,
            Node::Terms(_) => CompileTag::Terms,
            Node::MultiMatch(_) => CompileTag::MultiMatch,
            Node::Query(_) => CompileTag::Query,
            Node::Boolean(_) => CompileTag::BooleanExpression,
            Node::Not(_) => CompileTag::Not,
            Node::Sort(_) => CompileTag::Sort,
            Node::Aggregation(agg) => agg.tag(),
            Node::Source(_) => CompileTag::Source,
            Node::Rescore(_) => CompileTag::Rescore,
            Node::Search(_) => CompileTag::SearchQuery,
            Node::MappingField(_) => CompileTag::MappingField,
            Node::Document(_) => CompileTag::Document,
        }
    }
}

macro_rules! impl_node_conversions {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(v: $ty) -> Self {
                    Node::$variant(v)
                }
            }

            impl From<$ty> for Expr {
                fn from(v: $ty) -> Self {
                    Expr::Node(Box::new(Node::$variant(v)))
                }
            }
        )+
    };
}

impl_node_conversions! {
    Field => Field,
    BoostExpression => Boost,
    FieldQuery => FieldQuery,
    QueryExpression => QueryExpression,
    Range => Range,
    Terms => Terms,
    MultiMatch => MultiMatch,
    WrappedQuery => Query,
    BooleanExpression => Boolean,
    NotExpression => Not,
    Sort => Sort,
    Aggregation => Aggregation,
    Source => Source,
    QueryRescorer => Rescore,
    SearchQuery => Search,
    MappingField => MappingField,
    Arc<Document> => Document,
}

impl From<&Field> for Expr {
    fn from(v: &Field) -> Self {
        Expr::from(v.clone())
    }
}

impl From<Document> for Expr {
    fn from(v: Document) -> Self {
        Expr::from(Arc::new(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::BucketAgg;

    #[test]
    fn test_tags_are_stable() {
        let field: Expr = Field::new("status").into();
        assert_eq!(field.as_node().map(Node::tag), Some(CompileTag::Field));

        let term: Expr = Field::new("status").term("active").into();
        assert_eq!(term.as_node().map(Node::tag), Some(CompileTag::FieldQuery));
        assert_eq!(CompileTag::FieldQuery.to_string(), "field_query");
    }

    #[test]
    fn test_aggregation_tag_follows_kind() {
        let node = Node::from(Aggregation::from(BucketAgg::terms(Field::new("category"))));
        assert_eq!(node.tag(), CompileTag::BucketAgg);
        assert_eq!(node.tag().as_str(), "bucket_agg");
    }
}
