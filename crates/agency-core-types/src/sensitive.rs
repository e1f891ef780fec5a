//! Sensitive data marker for automatic redaction
//!
//! Contact details (agent, author and customer phone numbers) pass through
//! log statements wrapped in `Sensitive<T>` so they never reach a log sink.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use agency_core_types::Sensitive;
///
/// let phone = Sensitive::new("555-0100");
/// println!("{:?}", phone); // Prints: ***REDACTED***
/// println!("{}", phone);   // Prints: ***REDACTED***
///
/// assert_eq!(phone.expose(), &"555-0100");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let phone = Sensitive::new("555-0199");
        let debug_str = format!("{:?}", phone);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("555"));
    }

    #[test]
    fn test_sensitive_display_redaction() {
        let phone = Sensitive::new("555-0142");
        assert_eq!(format!("{}", phone), "***REDACTED***");
    }

    #[test]
    fn test_sensitive_expose_and_into_inner() {
        let phone = Sensitive::new(String::from("555-0100"));
        assert_eq!(phone.expose(), "555-0100");
        assert_eq!(phone.clone().into_inner(), "555-0100");
    }

    #[test]
    fn test_sensitive_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Contact {
            name: String,
            phone: Sensitive<String>,
        }

        let contact = Contact {
            name: "Ada".to_string(),
            phone: Sensitive::new("555-0111".to_string()),
        };

        let debug_str = format!("{:?}", contact);
        assert!(debug_str.contains("Ada"));
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("555-0111"));
    }
}
