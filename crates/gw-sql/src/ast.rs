//! Relational AST assembled by the compiler.
//!
//! The tree covers exactly what compiled workflows need: literals, column
//! references, arithmetic, conjunctions, range and list predicates, function
//! calls (optionally windowed), derived tables and a single SELECT with
//! WHERE / GROUP BY / ORDER BY / LIMIT. Rendering lives in `display.rs`.

/// A scalar or boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference, printed as a restricted identifier
    Column(String),
    /// Unqualified `*`
    Wildcard,
    /// Numeric literal, printed exactly as rendered
    Number(String),
    /// String literal
    String(String),
    /// Verbatim SQL text, inserted unescaped
    Raw(String),
    /// Explicit parenthesized grouping
    Nested(Box<Expr>),
    /// `left <op> right`
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `expr BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr IN (list...)`
    InList { expr: Box<Expr>, list: Vec<Expr> },
    /// Function call, optionally with a window
    Function(Function),
    /// `PERCENTILE_CONT(<fraction>) WITHIN GROUP (ORDER BY <order_by>)`
    PercentileCont {
        fraction: String,
        order_by: Box<Expr>,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Integer literal.
    pub fn integer(value: i64) -> Self {
        Self::Number(value.to_string())
    }

    /// Float literal with a fixed number of fractional digits.
    pub fn float(value: f64, precision: usize) -> Self {
        Self::Number(format!("{value:.precision$}"))
    }

    pub fn nested(inner: Expr) -> Self {
        Self::Nested(Box::new(inner))
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOperator::And, right)
    }

    pub fn between(expr: Expr, low: Expr, high: Expr) -> Self {
        Self::Between {
            expr: Box::new(expr),
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    pub fn in_list(expr: Expr, list: Vec<Expr>) -> Self {
        Self::InList {
            expr: Box::new(expr),
            list,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Function(Function {
            name: name.into(),
            args,
            windowed: false,
        })
    }

    /// `name(args) OVER ()`
    pub fn window_call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Function(Function {
            name: name.into(),
            args,
            windowed: true,
        })
    }

    /// Whether this node is an operator expression. Operator expressions
    /// are parenthesized when they appear as operands of another operator.
    pub(crate) fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::BinaryOp { .. } | Self::Between { .. } | Self::InList { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    And,
}

impl BinaryOperator {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::And => "AND",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: Vec<Expr>,
    /// Rendered with an empty `OVER ()` window
    pub windowed: bool,
}

/// One entry of a select-list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// Empty item; renders as nothing
    Placeholder,
    Unnamed(Expr),
    Aliased { expr: Expr, alias: String },
}

impl SelectItem {
    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self::Aliased {
            expr,
            alias: alias.into(),
        }
    }

    /// The expression without its alias, if any.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Self::Placeholder => None,
            Self::Unnamed(expr) | Self::Aliased { expr, .. } => Some(expr),
        }
    }
}

/// A FROM target.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    /// Unqualified table reference
    Table { name: String },
    /// `(SELECT ...) AS alias` built by the compiler
    Derived { subquery: Box<Select>, alias: String },
    /// `(<parsed query>) AS alias` absorbed from a sub-query dataset
    Parsed { query: ParsedQuery, alias: String },
}

impl TableFactor {
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table { name: name.into() }
    }
}

/// A query parsed from existing SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery(pub(crate) Box<sqlparser::ast::Query>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<OrderDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: i64,
    pub offset: i64,
}

/// A complete SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Vec<SelectItem>,
    pub from: TableFactor,
    pub selection: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Limit>,
}

impl Select {
    /// `SELECT <projection> FROM <from>` with no other clauses.
    pub fn new(projection: Vec<SelectItem>, from: TableFactor) -> Self {
        Self {
            projection,
            from,
            selection: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Render with the canonical printer.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}
