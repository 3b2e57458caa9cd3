use std::collections::BTreeSet;
use std::fmt::Write;

use super::table::ColumnRef;

/// One side of a comparison.
///
/// Literals are `&'static str` on purpose: only constants compiled into
/// the crate can end up inline in query text. Runtime values go through
/// [`Operand::Param`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Column(ColumnRef),
    Param(String),
    Literal(&'static str),
}

/// `select <column> from <column.table> where <filter>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subquery {
    pub select: ColumnRef,
    pub filter: Expr,
}

/// Boolean predicate tree over table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Eq(Operand, Operand),
    InSubquery {
        column: ColumnRef,
        subquery: Box<Subquery>,
    },
}

impl ColumnRef {
    pub fn eq_param(self, name: &str) -> Expr {
        Expr::Eq(Operand::Column(self), Operand::Param(name.to_string()))
    }

    pub fn eq_literal(self, literal: &'static str) -> Expr {
        Expr::Eq(Operand::Column(self), Operand::Literal(literal))
    }

    pub fn in_subquery(self, select: ColumnRef, filter: Expr) -> Expr {
        Expr::InSubquery {
            column: self,
            subquery: Box::new(Subquery { select, filter }),
        }
    }
}

impl Expr {
    /// Names of all parameters referenced anywhere in the tree.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_parameters(&mut names);
        names
    }

    fn collect_parameters(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::And(items) | Expr::Or(items) => {
                for item in items {
                    item.collect_parameters(names);
                }
            }
            Expr::Eq(left, right) => {
                for operand in [left, right] {
                    if let Operand::Param(name) = operand {
                        names.insert(name.clone());
                    }
                }
            }
            Expr::InSubquery { subquery, .. } => subquery.filter.collect_parameters(names),
        }
    }

    /// Lower to SQL text with `:name` placeholders. Every AND/OR group is
    /// parenthesized, so the output never depends on operator precedence.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self {
            Expr::And(items) => write_group(out, items, " and ", "1 = 1"),
            Expr::Or(items) => write_group(out, items, " or ", "1 = 0"),
            Expr::Eq(left, right) => {
                write_operand(out, left);
                out.push_str(" = ");
                write_operand(out, right);
            }
            Expr::InSubquery { column, subquery } => {
                let table = subquery.select.table;
                let _ = write!(
                    out,
                    "{column} in (select {} from {} {} where ",
                    subquery.select,
                    table.name(),
                    table.alias()
                );
                subquery.filter.write_sql(out);
                out.push(')');
            }
        }
    }
}

fn write_group(out: &mut String, items: &[Expr], separator: &str, empty: &str) {
    out.push('(');
    if items.is_empty() {
        out.push_str(empty);
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        item.write_sql(out);
    }
    out.push(')');
}

fn write_operand(out: &mut String, operand: &Operand) {
    match operand {
        Operand::Column(column) => {
            let _ = write!(out, "{column}");
        }
        Operand::Param(name) => {
            out.push(':');
            out.push_str(name);
        }
        Operand::Literal(literal) => {
            out.push('\'');
            out.push_str(&literal.replace('\'', "''"));
            out.push('\'');
        }
    }
}
