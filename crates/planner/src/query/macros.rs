/// Shorthand for a [`RelationClause`](crate::query::ast::projection::RelationClause).
///
/// ```
/// use planner::relation;
///
/// let all = relation!(WeightClasses => *);
/// let some = relation!(Users => ["name", "username"]);
/// assert_ne!(all, some);
/// ```
#[macro_export]
macro_rules! relation {
    ($table:ident => *) => {
        $crate::query::ast::projection::RelationClause {
            table: $crate::query::ast::projection::RelatedTable::$table,
            columns: $crate::query::ast::projection::RelationColumns::All,
        }
    };
    ($table:ident => [$($column:expr),* $(,)?]) => {
        $crate::query::ast::projection::RelationClause {
            table: $crate::query::ast::projection::RelatedTable::$table,
            columns: $crate::query::ast::projection::RelationColumns::Columns(
                vec![$($column.to_string()),*],
            ),
        }
    };
}
