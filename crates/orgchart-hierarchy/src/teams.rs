//! Team grouping: headcounts and membership by team label.
//!
//! Team labels are free text and compared exactly.

use std::collections::BTreeMap;

use orgchart_protocol::{Employee, TeamSummary};

/// Headcount per team, sorted by team name.
pub fn team_summaries<'a, I>(employees: I) -> Vec<TeamSummary>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for employee in employees {
        *counts.entry(employee.team.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| TeamSummary {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Members of one team, in input order.
pub fn team_members<'a, I>(employees: I, team: &str) -> Vec<&'a Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    employees.into_iter().filter(|e| e.team == team).collect()
}
