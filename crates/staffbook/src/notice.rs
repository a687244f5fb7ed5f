//! User-facing notifications.

use std::fmt;

/// A short title/description pair shown after an action completes or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Headline.
    pub title: &'static str,
    /// Detail line.
    pub description: &'static str,
}

impl Notice {
    /// Build a notice.
    #[must_use]
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let notice = Notice::new("Success", "Employee added successfully!");
        assert_eq!(notice.to_string(), "Success: Employee added successfully!");
    }
}
