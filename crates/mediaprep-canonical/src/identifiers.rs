use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            fn pattern() -> &'static Regex {
                static RE: OnceLock<Regex> = OnceLock::new();
                RE.get_or_init(|| Regex::new($pattern).expect("invalid regex"))
            }

            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// True when `value` matches the pattern.
            pub fn is_valid(value: &str) -> bool {
                Self::pattern().is_match(value)
            }

            /// Parses a validated value from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Self::is_valid(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Borrowed string form.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);
newtype!(
    DurationSpec,
    "Duration string such as `5m`, `2h`, `1h30m` or `45s`.",
    r"^(\d+h)?(\d+m)?(\d+s)?$"
);
newtype!(
    LanguageTag,
    "BCP-47 shaped language tag: `language[-Script][-REGION]`, e.g. `en-US`.",
    r"^[a-z]{2,3}(-[A-Z][a-z]{3})?(-[A-Z]{2}|-\d{3})?$"
);

impl DurationSpec {
    /// Formats a number of whole minutes as `<M>m`, `<H>h` or `<H>h<M>m`.
    pub fn from_minutes(total_minutes: u64) -> Self {
        if total_minutes < 60 {
            return Self(format!("{}m", total_minutes));
        }
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if minutes == 0 {
            Self(format!("{}h", hours))
        } else {
            Self(format!("{}h{}m", hours, minutes))
        }
    }

    /// Formats whole seconds as `<H>h<M>m<S>s`, leaving out zero parts.
    pub fn from_seconds(total_seconds: u64) -> Self {
        if total_seconds == 0 {
            return Self("0s".to_string());
        }
        let hours = total_seconds / 3600;
        let minutes = total_seconds % 3600 / 60;
        let seconds = total_seconds % 60;
        let mut out = String::new();
        if hours > 0 {
            out.push_str(&format!("{}h", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        if seconds > 0 {
            out.push_str(&format!("{}s", seconds));
        }
        Self(out)
    }
}
