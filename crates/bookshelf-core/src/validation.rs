//! Required-field rule for create and update requests.

use crate::types::{BookInput, NewBook};

/// A request body failed the required-field rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more of title, author, genre is absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    /// Names of the fields that were missing.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}

impl BookInput {
    /// Check that title, author and genre are all present and non-empty.
    ///
    /// Whitespace-only values count as present.
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        let mut missing = Vec::new();
        let title = required("title", self.title, &mut missing);
        let author = required("author", self.author, &mut missing);
        let genre = required("genre", self.genre, &mut missing);

        match (title, author, genre) {
            (Some(title), Some(author), Some(genre)) => Ok(NewBook {
                title,
                author,
                genre,
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

fn required(
    name: &'static str,
    value: Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: Option<&str>, author: Option<&str>, genre: Option<&str>) -> BookInput {
        BookInput {
            title: title.map(String::from),
            author: author.map(String::from),
            genre: genre.map(String::from),
        }
    }

    #[test]
    fn test_complete_input_is_valid() {
        let book = input(Some("Dune"), Some("Herbert"), Some("SciFi"))
            .validate()
            .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.genre, "SciFi");
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let cases = [
            (input(None, Some("a"), Some("g")), vec!["title"]),
            (input(Some("t"), None, Some("g")), vec!["author"]),
            (input(Some("t"), Some("a"), None), vec!["genre"]),
            (input(None, None, None), vec!["title", "author", "genre"]),
        ];
        for (case, expected) in cases {
            let err = case.validate().unwrap_err();
            assert_eq!(err.missing(), expected.as_slice());
        }
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let err = input(Some(""), Some("a"), Some("")).validate().unwrap_err();
        assert_eq!(err.missing(), &["title", "genre"]);
        assert_eq!(err.to_string(), "missing required fields: title, genre");
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        assert!(input(Some(" "), Some("a"), Some("g")).validate().is_ok());
    }
}
