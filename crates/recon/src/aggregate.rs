use std::collections::HashMap;

use crate::config::RoleRow;
use crate::model::{CategoryAggregate, CategoryRoleAggregate, FlaggedRecord};

/// Registered share with one decimal, e.g. `"66.7%"`. Zero total reads `"0.0%"`.
pub fn percent(registered: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".into();
    }
    format!("{:.1}%", registered as f64 / total as f64 * 100.0)
}

/// (total, registered) counts keyed by category.
fn count_by_category(flagged: &[FlaggedRecord]) -> HashMap<&str, (usize, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for f in flagged {
        let entry = counts.entry(f.record.category.as_str()).or_default();
        entry.0 += 1;
        if f.is_registered {
            entry.1 += 1;
        }
    }
    counts
}

/// (total, registered) counts keyed by (category, role).
fn count_by_role(flagged: &[FlaggedRecord]) -> HashMap<(&str, &str), (usize, usize)> {
    let mut counts: HashMap<(&str, &str), (usize, usize)> = HashMap::new();
    for f in flagged {
        let key = (f.record.category.as_str(), f.record.role.as_str());
        let entry = counts.entry(key).or_default();
        entry.0 += 1;
        if f.is_registered {
            entry.1 += 1;
        }
    }
    counts
}

/// One row per listed category in order, then a total row over those rows only.
/// Categories outside `order` contribute to neither.
pub fn aggregate_by_category(
    flagged: &[FlaggedRecord],
    order: &[String],
    total_label: &str,
) -> Vec<CategoryAggregate> {
    let counts = count_by_category(flagged);

    let mut rows = Vec::with_capacity(order.len() + 1);
    let mut total_strength = 0;
    let mut total_registered = 0;

    for category in order {
        let (total, registered) = counts.get(category.as_str()).copied().unwrap_or_default();
        total_strength += total;
        total_registered += registered;
        rows.push(CategoryAggregate {
            category: category.clone(),
            total_strength: total,
            registered,
            registered_percent: percent(registered, total),
        });
    }

    rows.push(CategoryAggregate {
        category: total_label.to_string(),
        total_strength,
        registered: total_registered,
        registered_percent: percent(total_registered, total_strength),
    });

    rows
}

/// One row per listed (category, role) pair, zero-filled when absent.
pub fn aggregate_by_role(flagged: &[FlaggedRecord], order: &[RoleRow]) -> Vec<CategoryRoleAggregate> {
    let counts = count_by_role(flagged);

    order
        .iter()
        .map(|row| {
            let (total, registered) = counts
                .get(&(row.category.as_str(), row.role.as_str()))
                .copied()
                .unwrap_or_default();
            CategoryRoleAggregate {
                category: row.category.clone(),
                role: row.role.clone(),
                total_cadre_members: total,
                registered,
                registered_percent: percent(registered, total),
            }
        })
        .collect()
}

/// Records whose category is not in `order`.
pub fn count_unlisted(flagged: &[FlaggedRecord], order: &[String]) -> usize {
    flagged
        .iter()
        .filter(|f| !order.iter().any(|c| *c == f.record.category))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RosterRecord;

    fn flagged(category: &str, role: &str, registered: bool) -> FlaggedRecord {
        FlaggedRecord {
            record: RosterRecord {
                category: category.into(),
                role: role.into(),
                identifier: String::new(),
            },
            is_registered: registered,
        }
    }

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(percent(0, 0), "0.0%");
        assert_eq!(percent(1, 4), "25.0%");
        assert_eq!(percent(2, 3), "66.7%");
        assert_eq!(percent(1, 3), "33.3%");
        assert_eq!(percent(5, 5), "100.0%");
    }

    #[test]
    fn category_rows_follow_order_and_total_sums() {
        let data = vec![
            flagged("Unit", "Convenor", true),
            flagged("Cluster", "Convenor", false),
            flagged("Unit", "Co-Convenor", false),
            flagged("Cluster", "Co-Convenor", true),
            flagged("Unit", "Convenor", true),
        ];
        let rows = aggregate_by_category(&data, &order(&["Cluster", "Unit", "Booth"]), "Total");

        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, ["Cluster", "Unit", "Booth", "Total"]);

        assert_eq!((rows[0].total_strength, rows[0].registered), (2, 1));
        assert_eq!((rows[1].total_strength, rows[1].registered), (3, 2));
        assert_eq!(rows[1].registered_percent, "66.7%");
        assert_eq!((rows[2].total_strength, rows[2].registered), (0, 0));
        assert_eq!(rows[2].registered_percent, "0.0%");

        let total = rows.last().unwrap();
        let body = &rows[..rows.len() - 1];
        assert_eq!(total.total_strength, body.iter().map(|r| r.total_strength).sum::<usize>());
        assert_eq!(total.registered, body.iter().map(|r| r.registered).sum::<usize>());
        for r in &rows {
            assert!(r.registered <= r.total_strength);
        }
    }

    #[test]
    fn unlisted_categories_excluded_from_total() {
        let data = vec![
            flagged("Cluster", "Convenor", true),
            flagged("State", "President", true),
            flagged("nan", "nan", false),
        ];
        let list = order(&["Cluster"]);
        let rows = aggregate_by_category(&data, &list, "Total");
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[1].total_strength, rows[1].registered), (1, 1));
        assert_eq!(count_unlisted(&data, &list), 2);
    }

    #[test]
    fn missing_pairs_zero_filled() {
        let data = vec![flagged("Ward", "President", false)];
        let pairs = vec![
            RoleRow::new("Cluster", "Convenor"),
            RoleRow::new("Ward", "President"),
        ];
        let rows = aggregate_by_role(&data, &pairs);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Cluster");
        assert_eq!(rows[0].role, "Convenor");
        assert_eq!(rows[0].total_cadre_members, 0);
        assert_eq!(rows[0].registered, 0);
        assert_eq!(rows[0].registered_percent, "0.0%");
        assert_eq!(rows[1].total_cadre_members, 1);
    }

    #[test]
    fn role_outside_layout_not_reported() {
        let data = vec![
            flagged("Ward", "President", true),
            flagged("Ward", "Spokesperson", true),
        ];
        let rows = aggregate_by_role(&data, &[RoleRow::new("Ward", "President")]);
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].total_cadre_members, rows[0].registered), (1, 1));
        assert_eq!(rows[0].registered_percent, "100.0%");
    }
}
