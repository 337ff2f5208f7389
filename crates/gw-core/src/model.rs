//! Workflow wire model.
//!
//! These types mirror the JSON documents produced by the Graphic Walker
//! front end. They are immutable compiler inputs: nothing here carries
//! state across compilations.

use crate::error::{CoreError, CoreResult};
use crate::literal::Literal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of rowsource a [`Dataset`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// An unqualified table name
    Table,
    /// The text of a pre-existing SELECT statement
    SubQuery,
}

/// The rowsource a workflow is compiled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub source: String,
}

impl Dataset {
    /// A plain table dataset.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            kind: DatasetKind::Table,
            source: name.into(),
        }
    }

    /// A dataset backed by an existing SELECT statement.
    pub fn sub_query(sql: impl Into<String>) -> Self {
        Self {
            kind: DatasetKind::SubQuery,
            source: sql.into(),
        }
    }

    /// Deserialize a dataset document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::malformed(format!("dataset: {e}")))
    }
}

/// An ordered pipeline of workflow nodes plus paging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(rename = "workflow", default)]
    pub nodes: Vec<WorkflowNode>,

    /// `0` means no LIMIT clause
    #[serde(default)]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

impl Workflow {
    /// Deserialize a workflow document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::malformed(format!("workflow: {e}")))
    }

    /// Deserialize a workflow from an already-parsed JSON value.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        serde_json::from_value(value).map_err(|e| CoreError::malformed(format!("workflow: {e}")))
    }
}

/// One step of a workflow, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkflowNode {
    Filter(FilterNode),
    Transform(TransformNode),
    View(ViewNode),
    Sort(SortNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterNode {
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

/// A predicate over one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub rule: FilterRule,
}

impl FilterSpec {
    /// Column the predicate applies to: `fid` when present, else `key`.
    pub fn column(&self) -> Option<&str> {
        non_empty(&self.fid).or_else(|| non_empty(&self.key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterRuleKind {
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "temporal range")]
    TemporalRange,
    #[serde(rename = "one of")]
    OneOf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    #[serde(rename = "type")]
    pub kind: FilterRuleKind,

    #[serde(rename = "value", default)]
    pub values: Vec<Value>,
}

impl FilterRule {
    /// Classified literals, checked against the arity the rule kind needs.
    pub fn literals(&self) -> CoreResult<Vec<Literal>> {
        match self.kind {
            FilterRuleKind::Range | FilterRuleKind::TemporalRange if self.values.len() != 2 => {
                Err(CoreError::malformed(format!(
                    "{:?} filter needs exactly two values, got {}",
                    self.kind,
                    self.values.len()
                )))
            }
            FilterRuleKind::OneOf if self.values.is_empty() => {
                Err(CoreError::malformed("one of filter needs at least one value"))
            }
            _ => Literal::classify(&self.values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformNode {
    #[serde(rename = "transform", default)]
    pub items: Vec<TransformSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,

    pub expression: TransformExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformExpression {
    pub op: TransformOp,

    #[serde(rename = "as")]
    pub output_alias: String,

    #[serde(default)]
    pub params: Vec<TransformParam>,

    /// Bucket count for binning, base for `log`
    #[serde(default, alias = "count", skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,
}

impl TransformExpression {
    /// Value of the first param carrying `tag`.
    pub fn param(&self, tag: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.tag == tag)
            .map(|p| p.value.as_str())
    }

    /// The operand column: the `field` param, else the first param.
    pub fn field(&self) -> Option<&str> {
        self.param("field")
            .or_else(|| self.params.first().map(|p| p.value.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformParam {
    #[serde(rename = "type")]
    pub tag: String,
    pub value: String,
}

/// Transform operator name. Unknown names are kept so the compiler can
/// report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransformOp {
    Bin,
    BinCount,
    Log2,
    Log10,
    Log,
    One,
    Sql,
    DateTimeDrill,
    Other(String),
}

impl TransformOp {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bin => "bin",
            Self::BinCount => "binCount",
            Self::Log2 => "log2",
            Self::Log10 => "log10",
            Self::Log => "log",
            Self::One => "one",
            Self::Sql => "sql",
            Self::DateTimeDrill => "dateTimeDrill",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for TransformOp {
    fn from(s: String) -> Self {
        match s.as_str() {
            "bin" => Self::Bin,
            "binCount" => Self::BinCount,
            "log2" => Self::Log2,
            "log10" => Self::Log10,
            "log" => Self::Log,
            "one" => Self::One,
            "sql" => Self::Sql,
            "dateTimeDrill" => Self::DateTimeDrill,
            _ => Self::Other(s),
        }
    }
}

impl From<TransformOp> for String {
    fn from(op: TransformOp) -> Self {
        match op {
            TransformOp::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNode {
    #[serde(rename = "query", default)]
    pub queries: Vec<ViewQuery>,
}

/// A projection over the rowsource: grouped aggregation or raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ViewQuery {
    #[serde(rename_all = "camelCase")]
    Aggregate {
        #[serde(default)]
        group_by: Vec<String>,
        #[serde(default)]
        measures: Vec<Measure>,
    },
    Raw {
        #[serde(default)]
        fields: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub field: String,

    #[serde(rename = "agg")]
    pub aggregator: Aggregator,

    #[serde(rename = "asFieldKey")]
    pub output_alias: String,
}

/// Aggregation function name. Unknown names are kept so the compiler can
/// report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregator {
    Sum,
    Count,
    Max,
    Min,
    Mean,
    Median,
    Variance,
    Stdev,
    Other(String),
}

impl Aggregator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Max => "max",
            Self::Min => "min",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Variance => "variance",
            Self::Stdev => "stdev",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Aggregator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sum" => Self::Sum,
            "count" => Self::Count,
            "max" => Self::Max,
            "min" => Self::Min,
            "mean" => Self::Mean,
            "median" => Self::Median,
            "variance" => Self::Variance,
            "stdev" => Self::Stdev,
            _ => Self::Other(s),
        }
    }
}

impl From<Aggregator> for String {
    fn from(agg: Aggregator) -> Self {
        match agg {
            Aggregator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortNode {
    #[serde(rename = "sort", default, deserialize_with = "null_as_default")]
    pub direction: SortDirection,

    #[serde(default)]
    pub by: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    /// No ORDER BY is produced
    #[default]
    #[serde(other)]
    None,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
