//! OData Filter building
//!
//! Provides type-safe filter construction for Graph `$filter` expressions

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    StartsWith(String, String),
}

impl Filter {
    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::StartsWith(field.into(), value.into())
    }

    /// Convert filter to OData query string
    pub fn to_odata_string(&self) -> String {
        match self {
            Filter::StartsWith(field, value) => {
                format!("startswith({},'{}')", field, value.replace('\'', "''"))
            }
        }
    }
}
