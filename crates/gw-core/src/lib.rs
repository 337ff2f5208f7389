//! gw-core - Core library for gw
//!
//! This crate provides the Graphic Walker workflow wire model (datasets,
//! workflow nodes, filter rules, transforms, views and sorts), literal
//! classification for filter values, the core error type, and YAML
//! configuration shared by the compiler and the CLI.

pub mod config;
pub mod error;
pub mod literal;
pub mod model;

pub use config::{Config, Dialect, ServerConfig};
pub use error::{CoreError, CoreResult};
pub use literal::Literal;
pub use model::{
    Aggregator, Dataset, DatasetKind, FilterNode, FilterRule, FilterRuleKind, FilterSpec, Measure,
    SortDirection, SortNode, TransformExpression, TransformNode, TransformOp, TransformParam,
    TransformSpec, ViewNode, ViewQuery, Workflow, WorkflowNode,
};
