use test_utils::case_state_fixture;

use super::CaseNotes;

#[test]
fn it_projects_case_state() {
    let notes = CaseNotes::from_state(&case_state_fixture());

    assert_eq!(notes.female_age, "34");
    assert_eq!(notes.male_age, "—");
    assert_eq!(notes.years_trying, "3.5");
    assert_eq!(notes.prior_pregnancies, "No");
    assert_eq!(notes.ivf_done, "Yes");
    assert_eq!(notes.reports_reviewed, "Pending");
}

#[test]
fn it_fills_missing_sections_with_placeholders() {
    let notes = CaseNotes::from_state(&serde_json::json!({}));

    assert_eq!(notes.female_age, "—");
    assert_eq!(notes.years_trying, "—");
    assert_eq!(notes.prior_pregnancies, "—");
    assert_eq!(notes.ivf_done, "—");
    assert_eq!(notes.reports_reviewed, "Pending");
}

#[test]
fn it_lists_rows_in_display_order() {
    let notes = CaseNotes::from_state(&serde_json::json!({
        "reports_availability_checked": true,
    }));
    let labels = notes
        .rows()
        .iter()
        .map(|(label, _)| return *label)
        .collect::<Vec<&str>>();

    assert_eq!(
        labels,
        vec![
            "Female Age",
            "Male Age",
            "Years Trying",
            "Prior Pregnancies",
            "IVF Done",
            "Tests Reviewed"
        ]
    );
    assert_eq!(notes.rows()[5].1, "Checked");
}
