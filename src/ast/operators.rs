use std::str::FromStr;

/// `$`-prefixed filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    // Comparison
    /// Deep equality (`$eq`)
    Eq,
    /// Deep inequality (`$ne`)
    Ne,
    /// Greater than (`$gt`)
    Gt,
    /// Greater than or equal (`$gte`)
    Gte,
    /// Less than (`$lt`)
    Lt,
    /// Less than or equal (`$lte`)
    Lte,

    // Logical, applied to the whole document
    /// All sub-filters match (`$and`)
    And,
    /// Any sub-filter matches (`$or`)
    Or,
    /// The sub-filter does not match (`$not`)
    Not,
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::And => "$and",
            Operator::Or => "$or",
            Operator::Not => "$not",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$eq" => Ok(Operator::Eq),
            "$ne" => Ok(Operator::Ne),
            "$gt" => Ok(Operator::Gt),
            "$gte" => Ok(Operator::Gte),
            "$lt" => Ok(Operator::Lt),
            "$lte" => Ok(Operator::Lte),
            "$and" => Ok(Operator::And),
            "$or" => Ok(Operator::Or),
            "$not" => Ok(Operator::Not),
            _ => Err(()),
        }
    }
}
