use std::fmt;

/// State of a charge-value text field.
///
/// While the user is typing, the field can hold text that is not yet a number
/// (`""`, `"-"`, `"1e"`). That text stays `Pending` and never reaches the
/// charge set; only `Committed` values do.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeInput {
    Committed(f64),
    Pending(String),
}

impl ChargeInput {
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(q) if q.is_finite() => Self::Committed(q),
            _ => Self::Pending(text.to_owned()),
        }
    }

    pub fn committed(&self) -> Option<f64> {
        match self {
            Self::Committed(q) => Some(*q),
            Self::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl fmt::Display for ChargeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed(q) => write!(f, "{q}"),
            Self::Pending(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_text_stays_pending() {
        assert_eq!(ChargeInput::parse(""), ChargeInput::Pending(String::new()));
        assert_eq!(ChargeInput::parse("-"), ChargeInput::Pending("-".into()));
        assert!(ChargeInput::parse("abc").is_pending());
        assert!(ChargeInput::parse("inf").is_pending());
        assert!(ChargeInput::parse("NaN").is_pending());
    }

    #[test]
    fn numbers_commit() {
        assert_eq!(ChargeInput::parse("-12.5").committed(), Some(-12.5));
        assert_eq!(ChargeInput::parse("0").committed(), Some(0.0));
        assert_eq!(ChargeInput::parse(" 3 ").committed(), Some(3.0));
    }

    #[test]
    fn display_echoes_what_the_user_sees() {
        assert_eq!(ChargeInput::parse("-").to_string(), "-");
        assert_eq!(ChargeInput::Committed(10.0).to_string(), "10");
    }
}
