use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::layout::{COMMITTEE_ORDER, ROLE_ORDER};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Banner title printed above the first table.
    #[serde(default = "default_title")]
    pub title: String,
    /// Label of the synthetic last row of Table 1.
    #[serde(default = "default_total_label")]
    pub total_label: String,
    #[serde(default)]
    pub fixed: FixedColumns,
    #[serde(default)]
    pub weekly: WeeklyColumns,
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_name() -> String {
    "Weekly Report".into()
}

fn default_title() -> String {
    "Analysis of members registered in MyTDP App".into()
}

fn default_total_label() -> String {
    "Total".into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
            total_label: default_total_label(),
            fixed: FixedColumns::default(),
            weekly: WeeklyColumns::default(),
            layout: LayoutConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Column names in the fixed roster file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixedColumns {
    #[serde(default = "default_category_column")]
    pub category: String,
    #[serde(default = "default_role_column")]
    pub role: String,
    #[serde(default = "default_fixed_id_column")]
    pub identifier: String,
}

fn default_category_column() -> String {
    "CMLEVEL".into()
}

fn default_role_column() -> String {
    "ROLE".into()
}

fn default_fixed_id_column() -> String {
    "MIMD".into()
}

impl Default for FixedColumns {
    fn default() -> Self {
        Self {
            category: default_category_column(),
            role: default_role_column(),
            identifier: default_fixed_id_column(),
        }
    }
}

/// Column names in the weekly registration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeeklyColumns {
    #[serde(default = "default_weekly_id_column")]
    pub identifier: String,
}

fn default_weekly_id_column() -> String {
    "mid".into()
}

impl Default for WeeklyColumns {
    fn default() -> Self {
        Self {
            identifier: default_weekly_id_column(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RoleRow {
    pub category: String,
    pub role: String,
}

impl RoleRow {
    pub fn new(category: &str, role: &str) -> Self {
        Self {
            category: category.into(),
            role: role.into(),
        }
    }
}

/// Ordered row lists for both tables. Defaults to the built-in layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<RoleRow>,
}

fn default_categories() -> Vec<String> {
    COMMITTEE_ORDER.iter().map(|c| c.to_string()).collect()
}

fn default_roles() -> Vec<RoleRow> {
    ROLE_ORDER.iter().map(|(c, r)| RoleRow::new(c, r)).collect()
}

impl LayoutConfig {
    /// Roles listed under one category, in report order.
    pub fn roles_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.roles
            .iter()
            .filter(move |r| r.category == category)
            .map(|r| r.role.as_str())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            roles: default_roles(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for (field, value) in [
            ("fixed.category", &self.fixed.category),
            ("fixed.role", &self.fixed.role),
            ("fixed.identifier", &self.fixed.identifier),
            ("weekly.identifier", &self.weekly.identifier),
        ] {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{field} must name a column"
                )));
            }
        }

        // An empty layout would produce an empty report
        if self.layout.categories.is_empty() {
            return Err(ReconError::ConfigValidation(
                "layout.categories must not be empty".into(),
            ));
        }
        if self.layout.roles.is_empty() {
            return Err(ReconError::ConfigValidation(
                "layout.roles must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.layout.categories {
            if !seen.insert(category.as_str()) {
                return Err(ReconError::ConfigValidation(format!(
                    "category '{category}' listed more than once"
                )));
            }
        }

        let mut seen = HashSet::new();
        for row in &self.layout.roles {
            if !self.layout.categories.contains(&row.category) {
                return Err(ReconError::ConfigValidation(format!(
                    "role row '{} / {}' names a category missing from layout.categories",
                    row.category, row.role
                )));
            }
            if !seen.insert(row) {
                return Err(ReconError::ConfigValidation(format!(
                    "role row '{} / {}' listed more than once",
                    row.category, row.role
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config.fixed.category, "CMLEVEL");
        assert_eq!(config.fixed.role, "ROLE");
        assert_eq!(config.fixed.identifier, "MIMD");
        assert_eq!(config.weekly.identifier, "mid");
        assert_eq!(config.total_label, "Total");
        assert_eq!(config.layout.categories.len(), 10);
        assert_eq!(config.layout.roles.len(), 53);
        assert_eq!(config.layout.roles[0], RoleRow::new("Cluster", "Convenor"));
        assert_eq!(
            config.layout.roles_for("Village").collect::<Vec<_>>(),
            ["President", "General Secretary", "Secretary", "Vice-President", "Organizing Secretary", "Treasurer"]
        );
    }

    #[test]
    fn column_names_override() {
        let config = ReportConfig::from_toml(
            r#"
name = "Ward audit"

[fixed]
category = "Level"
identifier = "Member ID"

[weekly]
identifier = "Membership No"
"#,
        )
        .unwrap();
        assert_eq!(config.name, "Ward audit");
        assert_eq!(config.fixed.category, "Level");
        assert_eq!(config.fixed.role, "ROLE");
        assert_eq!(config.fixed.identifier, "Member ID");
        assert_eq!(config.weekly.identifier, "Membership No");
    }

    #[test]
    fn layout_override() {
        let config = ReportConfig::from_toml(
            r#"
[layout]
categories = ["Ward", "Division"]
roles = [
  { category = "Ward", role = "President" },
  { category = "Division", role = "Treasurer" },
]
"#,
        )
        .unwrap();
        assert_eq!(config.layout.categories, vec!["Ward", "Division"]);
        assert_eq!(config.layout.roles[1], RoleRow::new("Division", "Treasurer"));
    }

    #[test]
    fn empty_layout_rejected() {
        let err = ReportConfig::from_toml("[layout]\ncategories = []\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));

        let err = ReportConfig::from_toml("[layout]\nroles = []\n").unwrap_err();
        assert!(err.to_string().contains("layout.roles"));
    }

    #[test]
    fn duplicate_rows_rejected() {
        let err = ReportConfig::from_toml("[layout]\ncategories = [\"Ward\", \"Ward\"]\n").unwrap_err();
        assert!(err.to_string().contains("'Ward' listed more than once"));

        let err = ReportConfig::from_toml(
            r#"
[layout]
roles = [
  { category = "Ward", role = "President" },
  { category = "Ward", role = "President" },
]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
    }

    #[test]
    fn role_under_unlisted_category_rejected() {
        let err = ReportConfig::from_toml(
            r#"
[layout]
categories = ["Ward"]
roles = [
  { category = "Ward", role = "President" },
  { category = "Town", role = "Treasurer" },
]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
        assert!(err.to_string().contains("'Town / Treasurer'"), "{err}");
    }

    #[test]
    fn blank_column_rejected() {
        let err = ReportConfig::from_toml("[weekly]\nidentifier = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("weekly.identifier"));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = ReportConfig::from_toml("name = ").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = ReportConfig::default().to_toml().unwrap();
        let back = ReportConfig::from_toml(&text).unwrap();
        assert_eq!(back.layout.roles.len(), 53);
        assert_eq!(back.title, ReportConfig::default().title);
    }
}
