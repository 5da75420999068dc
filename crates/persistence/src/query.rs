use chrono::NaiveDate;
use uuid::Uuid;

/// A parameter value bound into a [`Query`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Uuid(Uuid),
    Text(String),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
}

impl QueryValue {
    /// JSON form, matching how entity columns serialize.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            QueryValue::Uuid(v) => serde_json::Value::String(v.to_string()),
            QueryValue::Text(v) => serde_json::Value::String(v.clone()),
            QueryValue::Int(v) => serde_json::Value::from(*v),
            QueryValue::Bool(v) => serde_json::Value::Bool(*v),
            QueryValue::Date(v) => serde_json::Value::String(v.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<Uuid> for QueryValue {
    fn from(v: Uuid) -> Self {
        QueryValue::Uuid(v)
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Text(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Text(v.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(v: NaiveDate) -> Self {
        QueryValue::Date(v)
    }
}

/// Parameterized SQL plus named parameters.
///
/// Parameters are bound positionally (`$1`, `$2`, ...) in the order they were
/// added. Each name is the column the parameter is compared with, which lets
/// the in-memory database evaluate the query as equality filters.
///
/// ```
/// use persistence::Query;
/// use uuid::Uuid;
///
/// let tenant_id = Uuid::new_v4();
/// let query = Query::new("SELECT * FROM employees WHERE tenant_id = $1 LIMIT 1")
///     .bind("tenant_id", tenant_id);
/// assert_eq!(query.params().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    params: Vec<(&'static str, QueryValue)>,
}

impl Query {
    /// Creates a query with no parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Adds the next positional parameter, named after the column it filters.
    pub fn bind(mut self, column: &'static str, value: impl Into<QueryValue>) -> Self {
        self.params.push((column, value.into()));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[(&'static str, QueryValue)] {
        &self.params
    }
}
