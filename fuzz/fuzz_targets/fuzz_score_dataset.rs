#![no_main]
use libfuzzer_sys::fuzz_target;
use rmm_tools::config::ScoringConfig;
use rmm_tools::model::{Action, Factor, Response};
use rmm_tools::pipeline::{
    parse_table, run_assessment, run_trends, AssessmentOptions, Dataset, TableFormat,
};

const FACTORS: &str = r#"[
    {"factor_id": "PM_01", "area": "Project Management", "factor_name": "Scope",
     "target_level": 4, "owner_group": "PMO", "evidence_required": true},
    {"factor_id": "INV_01", "area": "Invoicing Process", "factor_name": "Approval",
     "weight": 2.0, "target_level": 3, "owner_group": "Finance"}
]"#;

const ACTIONS: &str = r#"[
    {"action_id": "A1", "factor_id": "PM_01", "if_level_leq": 3, "action_text": "Improve {factor}",
     "impact": 4, "effort": 2, "timeframe": "short"},
    {"action_id": "B1", "factor_id": "INV_01", "if_level_leq": 2, "action_text": "Automate",
     "impact": 3, "effort": 0, "timeframe": "long"}
]"#;

/// Fuzz scoring over arbitrary response tables.
///
/// Parsed responses run through validation, assessment and trends against a
/// fixed catalog.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(responses) = parse_table::<Response>(s, TableFormat::Json) else {
        return;
    };
    let (Ok(factors), Ok(actions)) = (
        parse_table::<Factor>(FACTORS, TableFormat::Json),
        parse_table::<Action>(ACTIONS, TableFormat::Json),
    ) else {
        return;
    };
    let Ok(dataset) = Dataset::from_parts(factors, responses, actions) else {
        return;
    };

    let config = ScoringConfig::default();
    if let Ok(report) = run_assessment(&dataset, &config, &AssessmentOptions::default()) {
        assert!(report.overall.overall_index >= 1.0);
        assert!(report.overall.overall_index <= 5.0);
    }
    let _ = run_trends(&dataset, &config);
});
