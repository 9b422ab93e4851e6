//! Collection query vocabulary: `orderBy`, `where` and `limit` constraints.

use super::FieldValue;

// == Direction ==
/// Sort direction of an `order_by` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

// == Filter Operator ==
/// Comparison operator of a `where` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `==`
    Equal,
    /// `>=`
    GreaterOrEqual,
}

// == Constraint ==
/// One constraint of a collection query.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    OrderBy {
        field: String,
        direction: Direction,
    },
    Where {
        field: String,
        op: FilterOp,
        value: FieldValue,
    },
    Limit(usize),
}

// == Query ==
/// A query against one collection: an ordered list of constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Target collection name
    pub collection: String,
    /// Constraints in the order they were added
    pub constraints: Vec<Constraint>,
}

impl Query {
    /// Starts an unconstrained query over `name`.
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            constraints: Vec::new(),
        }
    }

    /// Appends an ordering constraint.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.constraints.push(Constraint::OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Appends a filter constraint.
    pub fn where_field(
        mut self,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.constraints.push(Constraint::Where {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Appends a row cap.
    pub fn limit(mut self, n: usize) -> Self {
        self.constraints.push(Constraint::Limit(n));
        self
    }

    /// Ordering constraints, in precedence order.
    pub fn orderings(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::OrderBy { field, direction } => Some((field.as_str(), *direction)),
            _ => None,
        })
    }

    /// Filter constraints.
    pub fn filters(&self) -> impl Iterator<Item = (&str, FilterOp, &FieldValue)> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Where { field, op, value } => Some((field.as_str(), *op, value)),
            _ => None,
        })
    }

    /// Effective row cap; the smallest one wins when several were added.
    pub fn row_cap(&self) -> Option<usize> {
        self.constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::Limit(n) => Some(*n),
                _ => None,
            })
            .min()
    }
}
