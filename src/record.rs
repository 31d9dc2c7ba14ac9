use crate::field::quote;

/// One flashcard: a term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Front of the card.
    pub term: String,
    /// Back of the card.
    pub definition: String,
}

impl Record {
    /// Create a new Record.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// Render as one CSV line: both fields quoted, comma separated, `\n` terminated.
    pub fn to_csv_line(&self) -> String {
        format!("{},{}\n", quote(&self.term), quote(&self.definition))
    }
}

impl From<(String, String)> for Record {
    fn from((term, definition): (String, String)) -> Self {
        Self { term, definition }
    }
}
