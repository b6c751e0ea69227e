use thiserror::Error;

/// Default cap on simultaneously selected cultures.
pub const MAX_CULTURES: usize = 5;

/// Cultures offered as one-click choices.
pub const POPULAR_CULTURES: [&str; 12] = [
    "French",
    "Japanese",
    "Korean",
    "Italian",
    "Moroccan",
    "Indian",
    "Mexican",
    "Scandinavian",
    "Brazilian",
    "British",
    "Spanish",
    "African",
];

/// Reasons a culture tag was not added to a selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("at most {max} cultures can be selected")]
    Full { max: usize },
    #[error("culture '{0}' is already selected")]
    Duplicate(String),
    #[error("culture tag is empty")]
    Empty,
}

/// Ordered, de-duplicated set of culture tags with a size cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureSelection {
    cultures: Vec<String>,
    max: usize,
}

impl Default for CultureSelection {
    fn default() -> Self {
        Self::new(MAX_CULTURES)
    }
}

impl CultureSelection {
    /// Create an empty selection holding at most `max` tags (`max >= 1`).
    pub fn new(max: usize) -> Self {
        Self {
            cultures: Vec::new(),
            max: max.max(1),
        }
    }

    /// Add a trimmed tag; the selection is left untouched on error.
    pub fn add(&mut self, culture: &str) -> Result<(), SelectionError> {
        let culture = culture.trim();
        if culture.is_empty() {
            return Err(SelectionError::Empty);
        }
        if self.cultures.iter().any(|c| c == culture) {
            return Err(SelectionError::Duplicate(culture.to_owned()));
        }
        if self.is_full() {
            return Err(SelectionError::Full { max: self.max });
        }
        self.cultures.push(culture.to_owned());
        Ok(())
    }

    /// Remove a tag, returning whether it was present.
    pub fn remove(&mut self, culture: &str) -> bool {
        let before = self.cultures.len();
        self.cultures.retain(|c| c != culture.trim());
        self.cultures.len() != before
    }

    pub fn contains(&self, culture: &str) -> bool {
        self.cultures.iter().any(|c| c == culture.trim())
    }

    pub fn is_full(&self) -> bool {
        self.cultures.len() >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.cultures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cultures.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cultures
    }

    pub fn into_vec(self) -> Vec<String> {
        self.cultures
    }
}
