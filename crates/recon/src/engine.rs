use tracing::{debug, info, info_span};

use crate::aggregate::{aggregate_by_category, aggregate_by_role, count_unlisted, percent};
use crate::assemble::{committees_table, roles_table};
use crate::config::{FixedColumns, ReportConfig};
use crate::error::ReconError;
use crate::matcher::{build_registered_set, flag_roster, unmatched_weekly};
use crate::model::{
    CategoryAggregate, Dataset, Report, ReportMeta, ReportSummary, RosterRecord,
};

/// Build the report from the fixed roster and the weekly extract.
///
/// Required columns of both datasets are checked before any row is read, so
/// a schema error never yields partial output.
pub fn run(config: &ReportConfig, fixed: &Dataset, weekly: &Dataset) -> Result<Report, ReconError> {
    let _span = info_span!("report", config = %config.name).entered();

    config.validate()?;
    let fixed_cols = FixedIndices::resolve(fixed, &config.fixed)?;
    let weekly_id = weekly.require_column(&config.weekly.identifier)?;

    let roster = load_roster(fixed, &fixed_cols);
    debug!(records = roster.len(), "roster loaded");

    let registered = build_registered_set(weekly.column(weekly_id));
    debug!(
        rows = registered.rows,
        distinct = registered.ids.len(),
        unrecoverable = registered.unrecoverable,
        "weekly identifiers normalized"
    );

    let flagged = flag_roster(&roster, &registered);

    let committees = aggregate_by_category(&flagged, &config.layout.categories, &config.total_label);
    let roles = aggregate_by_role(&flagged, &config.layout.roles);
    let tables = vec![committees_table(&committees)?, roles_table(&roles)?];

    let total = total_row(&committees, &config.total_label)?;
    let summary = ReportSummary {
        roster_records: roster.len(),
        roster_unlisted_category: count_unlisted(&flagged, &config.layout.categories),
        weekly_records: registered.rows,
        weekly_unrecoverable: registered.unrecoverable,
        weekly_distinct_ids: registered.ids.len(),
        weekly_unmatched_ids: unmatched_weekly(&roster, &registered).len(),
        total_strength: total.total_strength,
        registered: total.registered,
        registered_percent: percent(total.registered, total.total_strength),
    };

    info!(
        total = summary.total_strength,
        registered = summary.registered,
        percent = %summary.registered_percent,
        "report built"
    );

    Ok(Report {
        meta: ReportMeta {
            config_name: config.name.clone(),
            title: config.title.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        committees,
        roles,
        tables,
    })
}

/// Summary figures are read off Table 1's total row rather than recounted.
fn total_row<'a>(
    committees: &'a [CategoryAggregate],
    label: &str,
) -> Result<&'a CategoryAggregate, ReconError> {
    committees
        .last()
        .filter(|row| row.category == label)
        .ok_or_else(|| ReconError::EmptyReport {
            table: format!("'{label}' row"),
        })
}

struct FixedIndices {
    category: usize,
    role: usize,
    identifier: usize,
}

impl FixedIndices {
    fn resolve(fixed: &Dataset, cols: &FixedColumns) -> Result<Self, ReconError> {
        Ok(Self {
            category: fixed.require_column(&cols.category)?,
            role: fixed.require_column(&cols.role)?,
            identifier: fixed.require_column(&cols.identifier)?,
        })
    }
}

/// Roster rows with category, role and identifier trimmed. Identifiers are
/// otherwise taken verbatim.
fn load_roster(fixed: &Dataset, idx: &FixedIndices) -> Vec<RosterRecord> {
    fixed
        .rows()
        .iter()
        .map(|row| RosterRecord {
            category: row[idx.category].to_text().trim().to_string(),
            role: row[idx.role].to_text().trim().to_string(),
            identifier: row[idx.identifier].to_text().trim().to_string(),
        })
        .collect()
}
