use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Related tables that can be embedded into an `athletes` read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedTable {
    Users,
    Federation,
    Division,
    WeightClasses,
}

impl RelatedTable {
    pub const ALL: [RelatedTable; 4] = [
        RelatedTable::Users,
        RelatedTable::Federation,
        RelatedTable::Division,
        RelatedTable::WeightClasses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelatedTable::Users => "users",
            RelatedTable::Federation => "federation",
            RelatedTable::Division => "division",
            RelatedTable::WeightClasses => "weight_classes",
        }
    }
}

impl fmt::Display for RelatedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelatedTable {
    type Err = String;

    // Table names are matched exactly; `Users` is not `users`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelatedTable::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| format!("Unknown related table: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::RelatedTable;
    use std::str::FromStr;

    #[test]
    fn test_names_parse_back() {
        for table in RelatedTable::ALL {
            assert_eq!(RelatedTable::from_str(table.as_str()), Ok(table));
        }
    }

    #[test]
    fn test_unknown_and_miscased_names_rejected() {
        assert!(RelatedTable::from_str("horses").is_err());
        assert!(RelatedTable::from_str("Users").is_err());
        assert!(RelatedTable::from_str("").is_err());
    }

    #[test]
    fn test_serde_uses_table_names() {
        let json = serde_json::to_string(&RelatedTable::WeightClasses).unwrap();
        assert_eq!(json, r#""weight_classes""#);
    }
}
