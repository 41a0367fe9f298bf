use serde_json::Value;

/// Single-row read matching every `column = value` filter, with the
/// projection already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOneRequest {
    pub table: String,
    pub filters: Vec<(String, String)>,
    pub select: String,
}

impl FetchOneRequest {
    pub fn new(table: impl Into<String>, key_column: impl Into<String>, key: impl Into<String>) -> Self {
        FetchOneRequest {
            table: table.into(),
            filters: vec![(key_column.into(), key.into())],
            select: "*".to_string(),
        }
    }

    /// Adds another equality filter.
    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = select.into();
        self
    }
}

/// Inserts one row.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub table: String,
    pub row: Value,
}

impl InsertRequest {
    pub fn new(table: impl Into<String>, row: Value) -> Self {
        InsertRequest {
            table: table.into(),
            row,
        }
    }
}

/// Applies `changes` to the rows where `key_column = key`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub table: String,
    pub key_column: String,
    pub key: String,
    pub changes: Value,
}

impl UpdateRequest {
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        key: impl Into<String>,
        changes: Value,
    ) -> Self {
        UpdateRequest {
            table: table.into(),
            key_column: key_column.into(),
            key: key.into(),
            changes,
        }
    }
}

/// `id = 'a1' and federation_id = 'f1'`, for logs.
pub fn describe_filters(filters: &[(String, String)]) -> String {
    filters
        .iter()
        .map(|(column, value)| format!("{column} = '{value}'"))
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_filters_accumulate() {
        let request = FetchOneRequest::new("divisions", "id", "d1")
            .and_eq("federation_id", "f1")
            .select("id");

        assert_eq!(request.select, "id");
        assert_eq!(
            describe_filters(&request.filters),
            "id = 'd1' and federation_id = 'f1'"
        );
    }
}
