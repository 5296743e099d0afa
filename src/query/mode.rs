//! Query modes, arguments and requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KhabarError, Result};
use crate::lexical::posting::Term;

/// The supported query modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryMode {
    /// Documents containing a term.
    DocsOfTerm,
    /// `(doc, position)` pairs of a term.
    DocsWithPositions,
    /// Number of documents containing a term.
    DocFrequency,
    /// Number of occurrences of a term across all documents.
    TermFrequencyTotal,
    /// The N terms with the highest document frequency.
    TopNByDocFrequency,
    /// The N terms with the most occurrences.
    TopNByPositionFrequency,
    /// Reserved; always reports not implemented.
    Advanced,
}

impl QueryMode {
    /// Every mode, ordered by code.
    pub const ALL: [QueryMode; 7] = [
        QueryMode::DocsOfTerm,
        QueryMode::DocsWithPositions,
        QueryMode::DocFrequency,
        QueryMode::TermFrequencyTotal,
        QueryMode::TopNByDocFrequency,
        QueryMode::TopNByPositionFrequency,
        QueryMode::Advanced,
    ];

    /// The integer code of this mode.
    pub fn code(self) -> i64 {
        match self {
            QueryMode::DocsOfTerm => 0,
            QueryMode::DocsWithPositions => 1,
            QueryMode::DocFrequency => 2,
            QueryMode::TermFrequencyTotal => 3,
            QueryMode::TopNByDocFrequency => 4,
            QueryMode::TopNByPositionFrequency => 5,
            QueryMode::Advanced => 6,
        }
    }

    /// Whether this mode takes a term argument.
    pub fn takes_term(self) -> bool {
        matches!(
            self,
            QueryMode::DocsOfTerm
                | QueryMode::DocsWithPositions
                | QueryMode::DocFrequency
                | QueryMode::TermFrequencyTotal
        )
    }

    /// Whether this mode takes a count argument.
    pub fn takes_count(self) -> bool {
        matches!(
            self,
            QueryMode::TopNByDocFrequency | QueryMode::TopNByPositionFrequency
        )
    }
}

impl TryFrom<i64> for QueryMode {
    type Error = KhabarError;

    fn try_from(code: i64) -> Result<Self> {
        QueryMode::ALL
            .into_iter()
            .find(|mode| mode.code() == code)
            .ok_or(KhabarError::InvalidQueryMode(code))
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryMode::DocsOfTerm => "DOCS_OF_TERM",
            QueryMode::DocsWithPositions => "DOCS_WITH_POSITIONS",
            QueryMode::DocFrequency => "DOC_FREQUENCY",
            QueryMode::TermFrequencyTotal => "TERM_FREQUENCY_TOTAL",
            QueryMode::TopNByDocFrequency => "TOP_N_BY_DOC_FREQUENCY",
            QueryMode::TopNByPositionFrequency => "TOP_N_BY_POSITION_FREQUENCY",
            QueryMode::Advanced => "ADVANCED",
        };
        write!(f, "{name}")
    }
}

/// The argument of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryArgument {
    /// A term, looked up verbatim.
    Term(Term),
    /// A result count.
    Count(usize),
    /// No argument.
    None,
}

impl QueryArgument {
    /// Shorthand for [`QueryArgument::Term`].
    pub fn term<S: Into<String>>(term: S) -> Self {
        QueryArgument::Term(term.into())
    }
}

impl fmt::Display for QueryArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryArgument::Term(term) => write!(f, "{term}"),
            QueryArgument::Count(n) => write!(f, "{n}"),
            QueryArgument::None => Ok(()),
        }
    }
}

/// A mode paired with an argument that fits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub mode: QueryMode,
    pub argument: QueryArgument,
}

impl QueryRequest {
    /// Pair `mode` with `argument`, rejecting arguments of the wrong kind.
    pub fn new(mode: QueryMode, argument: QueryArgument) -> Result<Self> {
        let fits = match &argument {
            QueryArgument::Term(_) => mode.takes_term(),
            QueryArgument::Count(_) => mode.takes_count(),
            QueryArgument::None => mode == QueryMode::Advanced,
        };
        if !fits {
            return Err(KhabarError::invalid_argument(format!(
                "{mode} does not accept argument {argument:?}"
            )));
        }
        Ok(QueryRequest { mode, argument })
    }

    /// Build a request from an integer mode code and a raw textual argument.
    pub fn parse(code: i64, raw: Option<&str>) -> Result<Self> {
        let mode = QueryMode::try_from(code)?;

        let argument = if mode.takes_count() {
            let raw = raw.ok_or_else(|| {
                KhabarError::invalid_argument(format!("{mode} requires a count"))
            })?;
            let count = raw.trim().parse::<usize>().map_err(|e| {
                KhabarError::invalid_argument(format!("{mode} count {raw:?}: {e}"))
            })?;
            QueryArgument::Count(count)
        } else if mode.takes_term() {
            let raw = raw.ok_or_else(|| {
                KhabarError::invalid_argument(format!("{mode} requires a term"))
            })?;
            QueryArgument::term(raw)
        } else {
            QueryArgument::None
        };

        Self::new(mode, argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_codes() {
        for (code, mode) in QueryMode::ALL.into_iter().enumerate() {
            assert_eq!(mode.code(), code as i64);
            assert_eq!(QueryMode::try_from(code as i64).unwrap(), mode);
        }
        assert!(matches!(
            QueryMode::try_from(7),
            Err(KhabarError::InvalidQueryMode(7))
        ));
        assert!(matches!(
            QueryMode::try_from(-1),
            Err(KhabarError::InvalidQueryMode(-1))
        ));
    }

    #[test]
    fn test_parse_requests() {
        let request = QueryRequest::parse(0, Some("خبر")).unwrap();
        assert_eq!(request.mode, QueryMode::DocsOfTerm);
        assert_eq!(request.argument, QueryArgument::term("خبر"));

        let request = QueryRequest::parse(4, Some(" 10 ")).unwrap();
        assert_eq!(request.argument, QueryArgument::Count(10));

        let request = QueryRequest::parse(6, Some("ignored")).unwrap();
        assert_eq!(request.argument, QueryArgument::None);
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(matches!(
            QueryRequest::parse(5, Some("many")),
            Err(KhabarError::InvalidArgument(_))
        ));
        assert!(matches!(
            QueryRequest::parse(2, None),
            Err(KhabarError::InvalidArgument(_))
        ));
        assert!(matches!(
            QueryRequest::parse(9, Some("x")),
            Err(KhabarError::InvalidQueryMode(9))
        ));
    }

    #[test]
    fn test_mismatched_argument() {
        assert!(QueryRequest::new(QueryMode::DocFrequency, QueryArgument::Count(3)).is_err());
        assert!(QueryRequest::new(QueryMode::TopNByDocFrequency, QueryArgument::term("x")).is_err());
        assert!(QueryRequest::new(QueryMode::DocsOfTerm, QueryArgument::None).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryMode::TopNByDocFrequency.to_string(), "TOP_N_BY_DOC_FREQUENCY");
    }
}
