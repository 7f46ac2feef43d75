use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// The dataset has no points, or none of its points is valid.
    EmptyDataset,
    /// A training argument was rejected before any iteration started.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingColumn {
        name: String,
    },
    Parse {
        line: usize,
        column: String,
        value: String,
    },
    RowLength {
        line: usize,
        got: usize,
        expected: usize,
    },
}

impl RegressionErr {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::EmptyDataset => {
                write!(f, "the dataset has no valid points to fit")
            }
            RegressionErr::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            RegressionErr::Io(e) => write!(f, "io error: {e}"),
            RegressionErr::Csv(e) => write!(f, "invalid csv: {e}"),
            RegressionErr::Json(e) => write!(f, "invalid json: {e}"),
            RegressionErr::MissingColumn { name } => {
                write!(f, "the csv header has no column named '{name}'")
            }
            RegressionErr::Parse {
                line,
                column,
                value,
            } => write!(
                f,
                "line {line}: cannot parse '{value}' in column '{column}' as a number"
            ),
            RegressionErr::RowLength {
                line,
                got,
                expected,
            } => write!(f, "line {line}: expected {expected} values, got {got}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::Io(e) => Some(e),
            RegressionErr::Csv(e) => Some(e),
            RegressionErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegressionErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for RegressionErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for RegressionErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = RegressionErr::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn invalid_parameter_names_the_parameter() {
        let err = RegressionErr::invalid("learning_rate", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `learning_rate`: must be positive, got 0"
        );
        assert!(err.source().is_none());
    }
}
