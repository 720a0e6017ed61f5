#[cfg(test)]
#[path = "case_notes_test.rs"]
mod tests;

use serde_json::Value;

const MISSING: &str = "—";

/// Read-only projection of the engine's case state into the handful of
/// facts worth showing next to the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseNotes {
    pub female_age: String,
    pub male_age: String,
    pub years_trying: String,
    pub prior_pregnancies: String,
    pub ivf_done: String,
    pub reports_reviewed: String,
}

fn format_value(state: &Value, pointer: &str) -> String {
    return match state.pointer(pointer) {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(val)) => val.to_string(),
        Some(val) => val.to_string(),
    };
}

fn format_bool(state: &Value, pointer: &str) -> String {
    return match state.pointer(pointer).and_then(Value::as_bool) {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => MISSING.to_string(),
    };
}

impl CaseNotes {
    pub fn from_state(state: &Value) -> CaseNotes {
        let reports_checked = state
            .pointer("/reports_availability_checked")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        return CaseNotes {
            female_age: format_value(state, "/demographics/female_age"),
            male_age: format_value(state, "/demographics/male_age"),
            years_trying: format_value(state, "/fertility_timeline/years_trying"),
            prior_pregnancies: format_bool(state, "/has_prior_pregnancies"),
            ivf_done: format_bool(state, "/treatments/ivf/done"),
            reports_reviewed: if reports_checked {
                "Checked".to_string()
            } else {
                "Pending".to_string()
            },
        };
    }

    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        return vec![
            ("Female Age", self.female_age.as_str()),
            ("Male Age", self.male_age.as_str()),
            ("Years Trying", self.years_trying.as_str()),
            ("Prior Pregnancies", self.prior_pregnancies.as_str()),
            ("IVF Done", self.ivf_done.as_str()),
            ("Tests Reviewed", self.reports_reviewed.as_str()),
        ];
    }
}
