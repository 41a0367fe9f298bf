use crate::query::{
    ast::projection::Projection, builder::projection::SelectiveQueryBuilder, dialect::Dialect,
    error::QueryError,
};
use model::catalog::FieldCatalog;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod macros;
pub mod renderer;

/// Builds and renders a projection in one step.
pub fn select<S: AsRef<str>>(
    catalog: &FieldCatalog,
    fields: Option<&[S]>,
    dialect: &dyn Dialect,
) -> Result<String, QueryError> {
    let projection: Projection = SelectiveQueryBuilder::new(catalog).build(fields)?;
    Ok(projection.to_select(dialect))
}
