//! `_source` field selection

use crate::query::expr::Expr;

/// Which parts of the stored source the engine returns
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// Return no source at all (`"_source": false`)
    Disabled,
    /// Explicit field list
    Fields(Vec<Expr>),
    /// Include/exclude patterns
    Filter { include: Vec<Expr>, exclude: Vec<Expr> },
}

impl Source {
    pub fn fields<T: Into<Expr>>(fields: impl IntoIterator<Item = T>) -> Self {
        Source::Fields(fields.into_iter().map(Into::into).collect())
    }

    pub fn include<T: Into<Expr>>(fields: impl IntoIterator<Item = T>) -> Self {
        Source::Filter {
            include: fields.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude<T: Into<Expr>>(fields: impl IntoIterator<Item = T>) -> Self {
        Source::Filter {
            include: Vec::new(),
            exclude: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn filter<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
        E: IntoIterator,
        E::Item: Into<Expr>,
    {
        Source::Filter {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// A selector that would not change the engine's default behaviour
    pub fn is_empty(&self) -> bool {
        match self {
            Source::Disabled => false,
            Source::Fields(fields) => fields.is_empty(),
            Source::Filter { include, exclude } => include.is_empty() && exclude.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::Field;

    #[test]
    fn test_emptiness() {
        assert!(!Source::Disabled.is_empty());
        assert!(Source::fields(Vec::<Expr>::new()).is_empty());
        assert!(!Source::fields([Field::new("name")]).is_empty());
        assert!(Source::filter(Vec::<Expr>::new(), Vec::<Expr>::new()).is_empty());
        assert!(!Source::exclude(["body"]).is_empty());
    }
}
