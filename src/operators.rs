//! The closed operator grammar for match arms.
//!
//! Both whitelists here are fixed constants, not configurable at call time.
//! A consumer needing a different schema must fork the validator.

/// Top-level fields a pattern may filter on. Any other root key is an error.
pub const ROOT_FIELDS: [&str; 8] = [
    "source",
    "detail-type",
    "detail",
    "account",
    "region",
    "time",
    "id",
    "resources",
];

/// A named matching strategy applied to one field's candidate values.
///
/// Inside a match-value sequence, an arm is either a bare literal (implicit
/// equality) or a single-key object whose key names one of these operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Prefix,
    Suffix,
    AnythingBut,
    Numeric,
    Exists,
    Cidr,
    EqualsIgnoreCase,
    Wildcard,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Prefix,
        Operator::Suffix,
        Operator::AnythingBut,
        Operator::Numeric,
        Operator::Exists,
        Operator::Cidr,
        Operator::EqualsIgnoreCase,
        Operator::Wildcard,
    ];

    /// Resolve an arm object's key to an operator. `None` means the key is
    /// not part of the grammar.
    pub fn from_key(key: &str) -> Option<Operator> {
        match key {
            "prefix" => Some(Operator::Prefix),
            "suffix" => Some(Operator::Suffix),
            "anything-but" => Some(Operator::AnythingBut),
            "numeric" => Some(Operator::Numeric),
            "exists" => Some(Operator::Exists),
            "cidr" => Some(Operator::Cidr),
            "equals-ignore-case" => Some(Operator::EqualsIgnoreCase),
            "wildcard" => Some(Operator::Wildcard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Prefix => "prefix",
            Operator::Suffix => "suffix",
            Operator::AnythingBut => "anything-but",
            Operator::Numeric => "numeric",
            Operator::Exists => "exists",
            Operator::Cidr => "cidr",
            Operator::EqualsIgnoreCase => "equals-ignore-case",
            Operator::Wildcard => "wildcard",
        }
    }
}

/// Comparator inside a `numeric` operator's alternating
/// `(comparator, number)` sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericComparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl NumericComparator {
    pub fn from_symbol(symbol: &str) -> Option<NumericComparator> {
        match symbol {
            "=" => Some(NumericComparator::Eq),
            "!=" => Some(NumericComparator::Ne),
            "<" => Some(NumericComparator::Lt),
            "<=" => Some(NumericComparator::Le),
            ">" => Some(NumericComparator::Gt),
            ">=" => Some(NumericComparator::Ge),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumericComparator::Eq => "=",
            NumericComparator::Ne => "!=",
            NumericComparator::Lt => "<",
            NumericComparator::Le => "<=",
            NumericComparator::Gt => ">",
            NumericComparator::Ge => ">=",
        }
    }
}
