//! The fixed set of languages a user can pick.

use std::fmt;

/// Label shown for a code that is not in the table.
const UNSELECTED_LABEL: &str = "Not selected";

/// Language option offered by the upload form.
///
/// The same table drives the `<select>` on the upload page and the label on
/// the result page, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageOption {
    Eng,
    Fr,
    Ar,
    /// Anything else. The result page reports these as still processing.
    Other,
}

impl LanguageOption {
    /// Every option, in the order the form lists them.
    pub const ALL: [LanguageOption; 4] = [Self::Eng, Self::Fr, Self::Ar, Self::Other];

    /// Wire code sent as the `option` form field and query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eng => "eng",
            Self::Fr => "fr",
            Self::Ar => "ar",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Eng => "English",
            Self::Fr => "French",
            Self::Ar => "Arabic",
            Self::Other => "Others",
        }
    }

    /// Parses a wire code. Codes are matched exactly.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.code() == code)
    }

    /// Label for an arbitrary code, falling back to "Not selected".
    pub fn label_for_code(code: &str) -> &'static str {
        Self::from_code(code).map_or(UNSELECTED_LABEL, |option| option.label())
    }
}

impl fmt::Display for LanguageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
