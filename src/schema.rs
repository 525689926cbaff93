//! The fixed all-campaigns label column schema.
//!
//! Columns are vote counts for one answer of one decision-tree question,
//! asked once per campaign, named `<question>-<campaign>_<answer>`. The
//! order below is the canonical order every consumer relies on; it never
//! changes between calls.

/// Campaign tags, in schema order.
pub const CAMPAIGNS: [&str; 3] = ["dr12", "dr5", "dr8"];

/// Decision-tree questions and their answers, in schema order.
const QUESTIONS: [(&str, &[&str]); 10] = [
    ("smooth-or-featured", &["smooth", "featured-or-disk", "artifact"]),
    ("disk-edge-on", &["yes", "no"]),
    ("has-spiral-arms", &["yes", "no"]),
    ("bar", &["strong", "weak", "no"]),
    (
        "bulge-size",
        &["dominant", "large", "moderate", "small", "none"],
    ),
    ("how-rounded", &["round", "in-between", "cigar-shaped"]),
    ("edge-on-bulge", &["boxy", "none", "rounded"]),
    ("spiral-winding", &["tight", "medium", "loose"]),
    (
        "spiral-arm-count",
        &["1", "2", "3", "4", "more-than-4", "cant-tell"],
    ),
    (
        "merging",
        &["none", "minor-disturbance", "major-disturbance", "merger"],
    ),
];

/// Label columns for a single campaign.
pub fn campaign_label_cols(campaign: &str) -> Vec<String> {
    QUESTIONS
        .iter()
        .flat_map(|(question, answers)| {
            answers
                .iter()
                .map(move |answer| format!("{question}-{campaign}_{answer}"))
        })
        .collect()
}

/// The full ordered label column set across all campaigns.
pub fn all_campaigns_label_cols() -> Vec<String> {
    CAMPAIGNS
        .iter()
        .flat_map(|campaign| campaign_label_cols(campaign))
        .collect()
}
