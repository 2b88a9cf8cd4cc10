//! Per-scope read models.
//!
//! Each scope is read on its own. A dashboard covering several scopes is
//! composed from independent fetches, and one scope failing does not hide
//! the others.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use yumemaga_models::{ScopeId, UnitId, UnitStatus, Workflow, WorkflowKind};
use yumemaga_progress::{
    self as progress, DelayReport, Milestone, ProgressSummary, UnitFilter,
};

use crate::backend::ProgressBackend;

/// Scope-level column holding the payment state of a contract.
pub const PAYMENT_STATUS_FIELD: &str = "payment_status";

/// Production progress of one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionProgress {
    pub scope_id: ScopeId,
    pub title: String,
    pub summary: ProgressSummary,
    pub by_category: BTreeMap<String, ProgressSummary>,
    pub delayed: Vec<DelayReport>,
    pub next_milestone: Option<Milestone>,
}

impl ProductionProgress {
    pub fn build(workflow: &Workflow, today: NaiveDate) -> Self {
        Self {
            scope_id: workflow.scope_id.clone(),
            title: workflow.title.clone(),
            summary: progress::summarize(&workflow.units),
            by_category: progress::summarize_by_category(&workflow.units),
            delayed: progress::delays(&workflow.units, today),
            next_milestone: progress::next_milestone(&workflow.units, today),
        }
    }
}

/// The step a contract is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub unit_id: UnitId,
    pub name: String,
    /// Status as shown for contracts (`pending`, `in_progress`, ...).
    pub status: &'static str,
    pub planned_date: Option<String>,
}

/// Reminders for one contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractReminders {
    pub scope_id: ScopeId,
    pub title: String,
    pub summary: ProgressSummary,
    /// Open steps past their planned date.
    pub overdue: Vec<DelayReport>,
    /// First step in order that is not completed.
    pub next_step: Option<NextStep>,
    pub payment_status: Option<String>,
}

impl ContractReminders {
    pub fn build(workflow: &Workflow, today: NaiveDate) -> Self {
        let overdue_filter = UnitFilter::new().overdue_on(today);
        let overdue = overdue_filter
            .apply(&workflow.units)
            .into_iter()
            .filter_map(|u| progress::evaluate(u, today))
            .collect();

        let next_step = workflow
            .units
            .iter()
            .find(|u| !u.is_completed())
            .map(|u| NextStep {
                unit_id: u.id.clone(),
                name: u.name.clone(),
                status: workflow.kind.status_label(u.status),
                planned_date: u.planned_date.clone(),
            });

        Self {
            scope_id: workflow.scope_id.clone(),
            title: workflow.title.clone(),
            summary: progress::summarize(&workflow.units),
            overdue,
            next_step,
            payment_status: workflow.fields.get(PAYMENT_STATUS_FIELD).cloned(),
        }
    }

    /// True when no step is open.
    pub fn is_closed(&self) -> bool {
        self.next_step.is_none()
    }
}

/// The read model matching a workflow's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeReport {
    Production(ProductionProgress),
    Contract(ContractReminders),
}

impl ScopeReport {
    pub fn build(workflow: &Workflow, today: NaiveDate) -> Self {
        match workflow.kind {
            WorkflowKind::Production => {
                ScopeReport::Production(ProductionProgress::build(workflow, today))
            }
            WorkflowKind::Contract => {
                ScopeReport::Contract(ContractReminders::build(workflow, today))
            }
        }
    }

    pub fn scope_id(&self) -> &ScopeId {
        match self {
            ScopeReport::Production(p) => &p.scope_id,
            ScopeReport::Contract(c) => &c.scope_id,
        }
    }

    pub fn summary(&self) -> &ProgressSummary {
        match self {
            ScopeReport::Production(p) => &p.summary,
            ScopeReport::Contract(c) => &c.summary,
        }
    }
}

/// A scope that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeFailure {
    pub scope_id: ScopeId,
    pub error: String,
}

/// Reports for several scopes, each fetched on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub reports: Vec<ScopeReport>,
    pub failures: Vec<ScopeFailure>,
}

impl Dashboard {
    /// Fetches every scope and builds its report.
    pub async fn load<B: ProgressBackend>(backend: &B, scopes: &[ScopeId], today: NaiveDate) -> Self {
        let mut dashboard = Dashboard::default();

        for scope in scopes {
            match backend.fetch(scope).await {
                Ok(workflow) => {
                    debug!(scope = %scope, units = workflow.units.len(), "scope loaded");
                    dashboard.reports.push(ScopeReport::build(&workflow, today));
                }
                Err(e) => {
                    warn!(scope = %scope, error = %e, "scope unavailable");
                    dashboard.failures.push(ScopeFailure {
                        scope_id: scope.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        dashboard
    }

    /// Units flagged `delayed` across every loaded scope.
    pub fn delayed_count(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.summary().counts.get(UnitStatus::Delayed))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yumemaga_models::UnitOfWork;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn issue() -> Workflow {
        Workflow::new("2025-11", WorkflowKind::Production)
            .with_title("November issue")
            .with_unit(UnitOfWork::new("A-1", "Plan").with_status(UnitStatus::Completed))
            .with_unit(
                UnitOfWork::new("A-2", "Interview")
                    .with_status(UnitStatus::Delayed)
                    .with_planned_date("10/10"),
            )
            .with_unit(
                UnitOfWork::new("B-1", "Layout")
                    .with_status(UnitStatus::InProgress)
                    .with_planned_date("2025-10-20"),
            )
            .with_unit(UnitOfWork::new("B-2", "Proof").with_planned_date("-"))
    }

    fn contract() -> Workflow {
        let mut wf = Workflow::new("contract-12", WorkflowKind::Contract)
            .with_unit(UnitOfWork::new("1", "Hearing").with_status(UnitStatus::Completed))
            .with_unit(
                UnitOfWork::new("2", "Proposal")
                    .with_status(UnitStatus::InProgress)
                    .with_planned_date("2025-10-01"),
            )
            .with_unit(UnitOfWork::new("3", "Contract").with_planned_date("11/1"));
        wf.fields
            .insert(PAYMENT_STATUS_FIELD.to_string(), "未入金".to_string());
        wf
    }

    #[test]
    fn test_production_progress() {
        let report = ProductionProgress::build(&issue(), date(2025, 10, 15));

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.progress_rate, 25);
        assert_eq!(report.by_category["A"].progress_rate, 50);
        assert_eq!(report.by_category["B"].progress_rate, 0);

        assert_eq!(report.delayed.len(), 1);
        assert_eq!(report.delayed[0].unit_id.as_str(), "A-2");
        assert_eq!(report.delayed[0].delay_days, 5);

        let next = report.next_milestone.unwrap();
        assert_eq!(next.unit_id.as_str(), "B-1");
        assert_eq!(next.days_until, 5);
    }

    #[test]
    fn test_contract_reminders() {
        let report = ContractReminders::build(&contract(), date(2025, 10, 15));

        assert_eq!(report.summary.progress_rate, 33);
        assert_eq!(report.overdue.len(), 1);
        assert_eq!(report.overdue[0].unit_id.as_str(), "2");
        assert_eq!(report.overdue[0].delay_days, 14);

        let next = report.next_step.as_ref().unwrap();
        assert_eq!(next.unit_id.as_str(), "2");
        assert_eq!(next.status, "in_progress");
        assert_eq!(report.payment_status.as_deref(), Some("未入金"));
        assert!(!report.is_closed());
    }

    #[test]
    fn test_contract_next_step_uses_contract_label() {
        let wf = Workflow::new("contract-1", WorkflowKind::Contract)
            .with_unit(UnitOfWork::new("1", "Hearing"));
        let report = ContractReminders::build(&wf, date(2025, 10, 15));
        assert_eq!(report.next_step.unwrap().status, "pending");
    }

    #[test]
    fn test_scope_report_follows_kind() {
        let today = date(2025, 10, 15);
        assert!(matches!(
            ScopeReport::build(&issue(), today),
            ScopeReport::Production(_)
        ));
        let report = ScopeReport::build(&contract(), today);
        assert!(matches!(report, ScopeReport::Contract(_)));
        assert_eq!(report.scope_id().as_str(), "contract-12");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "contract");
        assert_eq!(json["paymentStatus"], "未入金");
    }
}
