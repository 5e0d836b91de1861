use std::fmt;

use crate::category::Category;

#[derive(Debug)]
pub enum BalanceError {
    OutOfRange { category: Category, value: i32 },
    BadTotal { total: i32 },
    UnknownCategory(String),
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceError::OutOfRange { category, value } => {
                write!(f, "{} is out of range: {value} not in 0..=100", category.as_str())
            }
            BalanceError::BadTotal { total } => {
                write!(f, "values sum to {total}, expected 100")
            }
            BalanceError::UnknownCategory(name) => write!(f, "unknown category: '{name}'"),
        }
    }
}

impl std::error::Error for BalanceError {}

pub type Result<T> = std::result::Result<T, BalanceError>;
