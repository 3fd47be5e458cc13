//! Action plan construction

use shopdx_core::{ActionItem, ActionPlan, Issue, Priority, Severity};

use crate::playbook::Playbook;

/// One item per issue, plus generic P2 items when nothing is serious
///
/// The result always holds at least one item.
pub fn build_action_plan(issues: &[Issue], playbook: &Playbook) -> ActionPlan {
    let mut plan = ActionPlan::new();

    for issue in issues {
        let entry = playbook.entry(issue.metric);
        plan.push(ActionItem {
            priority: issue.severity.priority(),
            title: format!("Fix: {}", issue.title),
            description: entry.suggestion,
            expected_effect: entry.expected_effect,
            time_estimate: playbook.time_estimate(issue.metric, issue.severity),
            dimension: Some(issue.dimension),
            metric: Some(issue.metric),
        });
    }

    let serious = issues.iter().any(|i| i.severity >= Severity::Major);
    if !serious {
        for item in &playbook.general {
            plan.push(ActionItem {
                priority: Priority::P2,
                title: item.title.clone(),
                description: item.description.clone(),
                expected_effect: item.expected_effect.clone(),
                time_estimate: item.time_estimate.clone(),
                dimension: None,
                metric: None,
            });
        }
    }

    if plan.is_empty() {
        plan.push(ActionItem {
            priority: Priority::P2,
            title: "Keep monitoring".to_string(),
            description: "Re-run the diagnosis every week".to_string(),
            expected_effect: "Early warning on any regression".to_string(),
            time_estimate: "weekly".to_string(),
            dimension: None,
            metric: None,
        });
    }

    plan
}
