use crate::error::ReconError;
use crate::model::{CategoryAggregate, CategoryRoleAggregate, ResultTable};

pub const COMMITTEES_TITLE: &str = "Committees - Total Strength";
pub const ROLES_TITLE: &str = "CM Level Role - Total Cadre Members";

pub const COMMITTEES_HEADERS: [&str; 4] = ["Category", "Total Strength", "Registered", "%"];
pub const ROLES_HEADERS: [&str; 5] = [
    "Category",
    "Role",
    "Total Cadre Members",
    "Registered",
    "% Registered",
];

/// Table 1: one row per category plus the total row.
pub fn committees_table(rows: &[CategoryAggregate]) -> Result<ResultTable, ReconError> {
    let table = ResultTable {
        title: COMMITTEES_TITLE.into(),
        headers: COMMITTEES_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.total_strength.to_string(),
                    r.registered.to_string(),
                    r.registered_percent.clone(),
                ]
            })
            .collect(),
    };
    non_empty(table)
}

/// Table 2: one row per (category, role) pair, no total row.
pub fn roles_table(rows: &[CategoryRoleAggregate]) -> Result<ResultTable, ReconError> {
    let table = ResultTable {
        title: ROLES_TITLE.into(),
        headers: ROLES_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.role.clone(),
                    r.total_cadre_members.to_string(),
                    r.registered.to_string(),
                    r.registered_percent.clone(),
                ]
            })
            .collect(),
    };
    non_empty(table)
}

fn non_empty(table: ResultTable) -> Result<ResultTable, ReconError> {
    if table.is_empty() {
        return Err(ReconError::EmptyReport { table: table.title });
    }
    Ok(table)
}
