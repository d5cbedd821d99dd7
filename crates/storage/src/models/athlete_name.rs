/// An athlete name split into explicit first and last parts.
///
/// Results pages print names either as `Last, First` or `First Last`. Both
/// forms go through one splitting rule so the same runner always produces the
/// same (first, last) pair, which is the natural key used to find athletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteName {
    first: String,
    last: String,
}

impl AthleteName {
    /// Builds a name from parts that are already split.
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: collapse_whitespace(&first.into()),
            last: collapse_whitespace(&last.into()),
        }
    }

    /// Splits a raw name on the comma if there is one (`Last, First`),
    /// otherwise takes the final whitespace token as the last name.
    ///
    /// Returns `None` when either part would be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use storage::models::AthleteName;
    ///
    /// let a = AthleteName::parse("Smith, Jane").unwrap();
    /// let b = AthleteName::parse("Jane Smith").unwrap();
    ///
    /// assert_eq!(a, b);
    /// assert_eq!(a.first_name(), "Jane");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = collapse_whitespace(raw);

        let (first, last) = match raw.split_once(',') {
            Some((last, first)) => (first.trim(), last.trim()),
            None => {
                let (first, last) = raw.rsplit_once(' ')?;
                (first.trim(), last.trim())
            }
        };

        if first.is_empty() || last.is_empty() {
            return None;
        }

        Some(Self::new(first, last))
    }

    pub fn first_name(&self) -> &str {
        &self.first
    }

    pub fn last_name(&self) -> &str {
        &self.last
    }

    /// Returns both parts as a tuple (first_name, last_name) for database storage
    pub fn as_database_tuple(&self) -> (&str, &str) {
        (&self.first, &self.last)
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_comma_first() {
        let name = AthleteName::parse("Smith, Jane").unwrap();
        assert_eq!(name.first_name(), "Jane");
        assert_eq!(name.last_name(), "Smith");
    }

    #[test]
    fn test_first_last() {
        let name = AthleteName::parse("Jane Smith").unwrap();
        assert_eq!(name.as_database_tuple(), ("Jane", "Smith"));
    }

    #[test]
    fn test_multi_word_first_name_keeps_last_token_as_surname() {
        let name = AthleteName::parse("Mary  Kate   Olsen").unwrap();
        assert_eq!(name.first_name(), "Mary Kate");
        assert_eq!(name.last_name(), "Olsen");
    }

    #[test]
    fn test_comma_form_keeps_compound_surname() {
        let name = AthleteName::parse("De La Cruz, Ana").unwrap();
        assert_eq!(name.first_name(), "Ana");
        assert_eq!(name.last_name(), "De La Cruz");
    }

    #[test]
    fn test_unsplittable_names() {
        assert!(AthleteName::parse("Cher").is_none());
        assert!(AthleteName::parse("Smith,").is_none());
        assert!(AthleteName::parse("   ").is_none());
    }
}
