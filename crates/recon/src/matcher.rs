use std::collections::HashSet;

use tracing::trace;

use crate::model::{CellValue, FlaggedRecord, RosterRecord};
use crate::normalize::normalize_identifier;

/// Normalized weekly identifiers plus counts of what was read.
#[derive(Debug, Default)]
pub struct RegisteredSet {
    pub ids: HashSet<String>,
    pub rows: usize,
    pub unrecoverable: usize,
}

impl RegisteredSet {
    pub fn contains(&self, identifier: &str) -> bool {
        self.ids.contains(identifier)
    }
}

/// Normalize every weekly identifier; blank and digit-free values are skipped.
pub fn build_registered_set<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> RegisteredSet {
    let mut set = RegisteredSet::default();
    for value in values {
        set.rows += 1;
        match normalize_identifier(value) {
            Some(id) => {
                set.ids.insert(id);
            }
            None => {
                trace!(row = set.rows, value = %value, "weekly identifier unrecoverable");
                set.unrecoverable += 1;
            }
        }
    }
    set
}

/// Flag each roster record by exact membership of its identifier.
pub fn flag_roster(roster: &[RosterRecord], registered: &RegisteredSet) -> Vec<FlaggedRecord> {
    roster
        .iter()
        .map(|record| FlaggedRecord {
            is_registered: registered.contains(&record.identifier),
            record: record.clone(),
        })
        .collect()
}

/// Weekly identifiers that match no roster record.
pub fn unmatched_weekly<'a>(roster: &[RosterRecord], registered: &'a RegisteredSet) -> Vec<&'a str> {
    let roster_ids: HashSet<&str> = roster.iter().map(|r| r.identifier.as_str()).collect();
    let mut out: Vec<&str> = registered
        .ids
        .iter()
        .map(String::as_str)
        .filter(|id| !roster_ids.contains(id))
        .collect();
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(category: &str, role: &str, id: &str) -> RosterRecord {
        RosterRecord {
            category: category.into(),
            role: role.into(),
            identifier: id.into(),
        }
    }

    #[test]
    fn duplicates_collapse_and_blanks_skip() {
        let weekly = vec![
            CellValue::Text("123".into()),
            CellValue::Text("#123".into()),
            CellValue::Int(123),
            CellValue::Empty,
            CellValue::Text("n/a".into()),
        ];
        let set = build_registered_set(&weekly);
        assert_eq!(set.rows, 5);
        assert_eq!(set.unrecoverable, 2);
        assert_eq!(set.ids.len(), 1);
        assert!(set.contains("#00000123"));
    }

    #[test]
    fn formatting_differences_still_match() {
        let roster = vec![
            rec("Ward", "President", "#00000123"),
            rec("Ward", "Secretary", "#00000456"),
        ];
        let weekly = vec![CellValue::Text(" 123 ".into()), CellValue::Float(999.0)];
        let set = build_registered_set(&weekly);
        let flagged = flag_roster(&roster, &set);

        assert!(flagged[0].is_registered);
        assert!(!flagged[1].is_registered);
        assert_eq!(flagged[0].record, roster[0]);
    }

    #[test]
    fn roster_ids_are_not_normalized() {
        // Roster values are compared verbatim; only the weekly side is canonicalized.
        let roster = vec![rec("Unit", "Convenor", "123")];
        let set = build_registered_set(&[CellValue::Int(123)]);
        assert!(!flag_roster(&roster, &set)[0].is_registered);
    }

    #[test]
    fn unmatched_weekly_ids_sorted() {
        let roster = vec![rec("Unit", "Convenor", "#00000002")];
        let set = build_registered_set(&[CellValue::Int(3), CellValue::Int(2), CellValue::Int(1)]);
        assert_eq!(unmatched_weekly(&roster, &set), vec!["#00000001", "#00000003"]);
    }
}
