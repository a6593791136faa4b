//! Diagnostics — resolution error reporting.
//!
//! Malformed identifier input is reported as data: an `Invalid` node
//! carrying a stable code plus the offending text, rendered into a
//! [`Diagnostic`] with a localized message. Codes are locale-independent
//! and stable across releases.

use smol_str::SmolStr;

use crate::base::TextRegion;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message with a stable code and source region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable code, e.g. `FLC0101`.
    pub code: &'static str,
    pub severity: Severity,
    /// Human-readable, localized text.
    pub text: String,
    /// Region of the offending identifier text.
    pub region: TextRegion,
}

impl Diagnostic {
    pub fn error(code: &'static str, text: impl Into<String>, region: TextRegion) -> Self {
        Self {
            code,
            severity: Severity::Error,
            text: text.into(),
            region,
        }
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes for identifier resolution.
///
/// `FLC01xx` covers resolution errors; generation-time faults are not
/// diagnostics (they are internal-consistency errors).
pub mod codes {
    /// No resolver could resolve a segment: unknown parameter, attribute
    /// not found or filtered, unknown enum value, or unresolvable datatype.
    pub const UNDEFINED_IDENTIFIER: &str = "FLC0101";
    /// A bracket clause is neither a qualifier matching a known product
    /// component nor a valid integer index.
    pub const UNKNOWN_QUALIFIER: &str = "FLC0102";
    /// An index was applied where neither the association nor prior context
    /// establishes list multiplicity.
    pub const NO_INDEX_FOR_1TO1_ASSOCIATION: &str = "FLC0103";
}

// ============================================================================
// LOCALE
// ============================================================================

/// Language for diagnostic message texts.
///
/// The surrounding product is bilingual; messages exist in English and
/// German, any other tag falls back to English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: SmolStr,
}

impl Locale {
    pub const fn new_static(tag: &'static str) -> Self {
        Self {
            tag: SmolStr::new_static(tag),
        }
    }

    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn english() -> Self {
        Self::new_static("en")
    }

    pub fn german() -> Self {
        Self::new_static("de")
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn is_german(&self) -> bool {
        self.tag == "de" || self.tag.starts_with("de-")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

/// Render the message for a diagnostic code over the offending text.
pub fn message_for(code: &str, subject: &str, locale: &Locale) -> String {
    if locale.is_german() {
        match code {
            codes::UNDEFINED_IDENTIFIER => {
                format!("Der Bezeichner '{subject}' kann nicht aufgelöst werden.")
            }
            codes::UNKNOWN_QUALIFIER => format!(
                "Der Qualifier '{subject}' bezeichnet keinen bekannten Produktbaustein."
            ),
            codes::NO_INDEX_FOR_1TO1_ASSOCIATION => format!(
                "Die Beziehung '{subject}' ist eine 1-zu-1-Beziehung, ein Index ist hier nicht erlaubt."
            ),
            _ => format!("Unbekannter Fehler bei '{subject}'."),
        }
    } else {
        match code {
            codes::UNDEFINED_IDENTIFIER => {
                format!("The identifier '{subject}' cannot be resolved.")
            }
            codes::UNKNOWN_QUALIFIER => format!(
                "The qualifier '{subject}' does not identify a known product component."
            ),
            codes::NO_INDEX_FOR_1TO1_ASSOCIATION => format!(
                "The association '{subject}' is a to-one association, an index is not allowed here."
            ),
            _ => format!("Unknown error at '{subject}'."),
        }
    }
}
