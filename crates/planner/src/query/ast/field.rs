/// A single caller-supplied field, split on its first `.`.
///
/// Parsing never fails; whether the pieces name anything real is decided
/// against the catalog later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    /// `column` on the root row, or a full-table name.
    Bare(&'a str),
    /// `table.column` on an embedded relation.
    Nested { table: &'a str, column: &'a str },
}

impl<'a> FieldRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('.') {
            Some((table, column)) => FieldRef::Nested { table, column },
            None => FieldRef::Bare(raw),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldRef::Nested { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::FieldRef;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(FieldRef::parse("division_id"), FieldRef::Bare("division_id"));
        assert_eq!(
            FieldRef::parse("users.name"),
            FieldRef::Nested {
                table: "users",
                column: "name"
            }
        );
    }

    #[test]
    fn test_parse_splits_on_first_dot_only() {
        assert_eq!(
            FieldRef::parse("users.name.first"),
            FieldRef::Nested {
                table: "users",
                column: "name.first"
            }
        );
        assert!(FieldRef::parse(".name").is_nested());
    }
}
