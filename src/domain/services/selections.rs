#[cfg(test)]
#[path = "selections_test.rs"]
mod tests;

use crate::domain::models::IntakeError;

/// Staging area for the checkboxes of a multi-select prompt. Options are
/// kept in the order they were ticked.
#[derive(Default)]
pub struct SelectionAggregator {
    selected: Vec<String>,
}

impl SelectionAggregator {
    pub fn toggle(&mut self, option: &str, included: bool) {
        let position = self.selected.iter().position(|e| return e == option);
        match (included, position) {
            (true, None) => self.selected.push(option.to_string()),
            (false, Some(idx)) => {
                self.selected.remove(idx);
            }
            _ => (),
        }
    }

    pub fn current(&self) -> &[String] {
        return &self.selected;
    }

    pub fn is_empty(&self) -> bool {
        return self.selected.is_empty();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Joins the staged options into the single text turn the engine
    /// expects.
    pub fn commit(&self) -> Result<String, IntakeError> {
        if self.selected.is_empty() {
            return Err(IntakeError::EmptySelection);
        }

        return Ok(self.selected.join(", "));
    }
}
