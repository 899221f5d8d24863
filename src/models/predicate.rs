use serde::{Deserialize, Serialize};

/// Boolean test over the fields of a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum Predicate {
    True,
    False,
    SimplePredicate {
        field: String,
        operator: SimpleOperator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    SimpleSetPredicate {
        field: String,
        boolean_operator: SetOperator,
        values: Vec<String>,
    },
    CompoundPredicate {
        boolean_operator: BooleanOperator,
        predicates: Vec<Predicate>,
    },
}

impl Predicate {
    pub fn simple(field: impl Into<String>, operator: SimpleOperator, value: impl Into<String>) -> Self {
        Predicate::SimplePredicate {
            field: field.into(),
            operator,
            value: Some(value.into()),
        }
    }

    pub fn compound(boolean_operator: BooleanOperator, predicates: Vec<Predicate>) -> Self {
        Predicate::CompoundPredicate {
            boolean_operator,
            predicates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleOperator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    IsMissing,
    IsNotMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetOperator {
    IsIn,
    IsNotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BooleanOperator {
    And,
    Or,
    Xor,
    /// First operand whose outcome is known decides
    Surrogate,
}
