pub fn reply_fixture() -> String {
    return serde_json::json!({
        "reply": "How old are you?",
        "options": ["<30", "30-35", "35+"],
    })
    .to_string();
}

pub fn multi_select_reply_fixture() -> String {
    return serde_json::json!({
        "reply": "Which treatments have you tried so far?",
        "options": ["IUI", "IVF", "ICSI"],
        "multi_select": true,
    })
    .to_string();
}

pub fn checkpoint_reply_fixture() -> &'static str {
    return r#"
Section A: My Understanding

- Age: 34 (Partner: 36)
- Trying to conceive: 3 years
- Prior pregnancies: None reported
- Treatments: IUI x2

Please let me know if I've understood this correctly so far.
"#
    .trim();
}

pub fn case_state_fixture() -> serde_json::Value {
    return serde_json::json!({
        "status": "INTAKE",
        "demographics": {
            "female_age": 34,
            "male_age": null,
        },
        "fertility_timeline": {
            "years_trying": 3.5,
        },
        "has_prior_pregnancies": false,
        "treatments": {
            "ivf": { "done": true, "total_cycles": 2 },
        },
        "reports_availability_checked": false,
    });
}
