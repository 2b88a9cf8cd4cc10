//! Command handlers for CLI subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use yumemaga_api::{ApiConfig, AppState};
use yumemaga_models::{ChecklistItemId, ScopeId, UnitId, Workflow};
use yumemaga_persistence::WorkflowStore;
use yumemaga_progress::{self as progress, DelayReport, Milestone, ProgressSummary};
use yumemaga_workflow::{
    ContractReminders, Dashboard, HttpBackend, ProductionProgress, ProgressBackend, ScopeReport,
    WorkflowSession,
};

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub format: OutputFormat,
}

/// Execute a CLI command.
pub async fn execute(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Serve { host, port } => cmd_serve(ctx, host, port).await,
        Commands::Seed { file } => cmd_seed(ctx, &file),
        Commands::Progress { scope, today } => cmd_progress(ctx, &scope, resolve_today(today)).await,
        Commands::Delays { scope, today } => cmd_delays(ctx, &scope, resolve_today(today)).await,
        Commands::Milestones { scope, days, today } => {
            cmd_milestones(ctx, &scope, days, resolve_today(today)).await
        }
        Commands::Check {
            scope,
            unit,
            item,
            uncheck,
        } => cmd_check(ctx, &scope, &unit, &item, !uncheck).await,
        Commands::Complete { scope, unit } => cmd_complete(ctx, &scope, &unit).await,
        Commands::Dashboard { scopes, today } => {
            cmd_dashboard(ctx, &scopes, resolve_today(today)).await
        }
    }
}

fn resolve_today(explicit: Option<NaiveDate>) -> NaiveDate {
    explicit.unwrap_or_else(progress::today)
}

fn backend(ctx: &Context) -> Result<HttpBackend> {
    Ok(HttpBackend::new(&ctx.api_url)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_serve(ctx: &Context, host: String, port: u16) -> Result<()> {
    let config = ApiConfig::new(host, port).with_data_dir(&ctx.data_dir);
    let state = AppState::from_config(config.clone());

    println!("Serving {} on http://{}", ctx.data_dir.display(), config.bind_address());
    yumemaga_api::serve(config, state).await?;
    Ok(())
}

/// A seed file holds one workflow or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Many(Vec<Workflow>),
    One(Box<Workflow>),
}

impl SeedFile {
    fn into_workflows(self) -> Vec<Workflow> {
        match self {
            SeedFile::Many(workflows) => workflows,
            SeedFile::One(workflow) => vec![*workflow],
        }
    }
}

fn cmd_seed(ctx: &Context, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let seed: SeedFile = serde_json::from_str(&content)?;

    let store = WorkflowStore::new(&ctx.data_dir);
    let workflows = seed.into_workflows();
    for workflow in &workflows {
        store.save(workflow)?;
        info!(scope = %workflow.scope_id, units = workflow.units.len(), "seeded scope");
    }

    println!(
        "Seeded {} scope(s) into {}",
        workflows.len(),
        ctx.data_dir.display()
    );
    Ok(())
}

async fn cmd_progress(ctx: &Context, scope: &str, today: NaiveDate) -> Result<()> {
    let workflow = backend(ctx)?.fetch(&ScopeId::from(scope)).await?;
    let report = ScopeReport::build(&workflow, today);

    match ctx.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print!("{}", render_report(&report));
            Ok(())
        }
    }
}

async fn cmd_delays(ctx: &Context, scope: &str, today: NaiveDate) -> Result<()> {
    let workflow = backend(ctx)?.fetch(&ScopeId::from(scope)).await?;
    let delays = progress::delays(&workflow.units, today);

    match ctx.format {
        OutputFormat::Json => print_json(&delays),
        OutputFormat::Table => {
            if delays.is_empty() {
                println!("No late units as of {}.", today);
            } else {
                print!("{}", render_delays(&delays));
            }
            Ok(())
        }
    }
}

async fn cmd_milestones(
    ctx: &Context,
    scope: &str,
    days: Option<i64>,
    today: NaiveDate,
) -> Result<()> {
    let workflow = backend(ctx)?.fetch(&ScopeId::from(scope)).await?;
    let milestones = progress::upcoming(&workflow.units, today, days);

    match ctx.format {
        OutputFormat::Json => print_json(&milestones),
        OutputFormat::Table => {
            if milestones.is_empty() {
                println!("No upcoming milestones.");
            } else {
                print!("{}", render_milestones(&milestones));
            }
            Ok(())
        }
    }
}

async fn cmd_check(ctx: &Context, scope: &str, unit: &str, item: &str, checked: bool) -> Result<()> {
    let mut session = WorkflowSession::open(backend(ctx)?, scope).await?;
    let unit_id = UnitId::from(unit);

    session
        .toggle_checklist(&unit_id, &ChecklistItemId::from(item), checked)
        .await?;

    let updated = session
        .workflow()
        .unit(&unit_id)
        .ok_or_else(|| format!("Unit not found: {}", unit))?;
    match ctx.format {
        OutputFormat::Json => print_json(updated),
        OutputFormat::Table => {
            println!(
                "{} '{}' on {} ({}/{} checked)",
                if checked { "Checked" } else { "Unchecked" },
                item,
                updated.name,
                updated.checked_count(),
                updated.checklist.len()
            );
            Ok(())
        }
    }
}

async fn cmd_complete(ctx: &Context, scope: &str, unit: &str) -> Result<()> {
    let mut session = WorkflowSession::open(backend(ctx)?, scope).await?;
    let unit_id = UnitId::from(unit);

    session.complete(&unit_id).await?;

    let completed = session
        .workflow()
        .unit(&unit_id)
        .ok_or_else(|| format!("Unit not found: {}", unit))?;
    match ctx.format {
        OutputFormat::Json => print_json(completed),
        OutputFormat::Table => {
            println!(
                "Completed {} ({}) on {}",
                completed.name,
                completed.id,
                completed
                    .actual_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("Scope progress: {}%", session.progress().progress_rate);
            Ok(())
        }
    }
}

async fn cmd_dashboard(ctx: &Context, scopes: &[String], today: NaiveDate) -> Result<()> {
    let scopes: Vec<ScopeId> = scopes.iter().map(|s| ScopeId::from(s.as_str())).collect();
    let dashboard = Dashboard::load(&backend(ctx)?, &scopes, today).await;

    match ctx.format {
        OutputFormat::Json => print_json(&dashboard),
        OutputFormat::Table => {
            print!("{}", render_dashboard(&dashboard));
            Ok(())
        }
    }
}

fn summary_line(summary: &ProgressSummary) -> String {
    format!(
        "{:>3}%  {}/{} completed, {} in progress, {} not started, {} delayed",
        summary.progress_rate,
        summary.counts.completed,
        summary.total,
        summary.counts.in_progress,
        summary.counts.not_started,
        summary.counts.delayed
    )
}

fn render_report(report: &ScopeReport) -> String {
    match report {
        ScopeReport::Production(p) => render_production(p),
        ScopeReport::Contract(c) => render_contract(c),
    }
}

fn render_production(report: &ProductionProgress) -> String {
    let mut out = format!("Issue {} {}\n", report.scope_id, report.title);
    out.push_str(&format!("  {}\n", summary_line(&report.summary)));

    for (category, summary) in &report.by_category {
        out.push_str(&format!("  {:<6} {}\n", category, summary_line(summary)));
    }
    if !report.delayed.is_empty() {
        out.push_str(&format!("  Delayed: {}\n", report.delayed.len()));
        for delay in &report.delayed {
            out.push_str(&format!(
                "    {:<8} {:<24} +{}d\n",
                delay.unit_id.as_str(),
                truncate(&delay.name, 24),
                delay.delay_days
            ));
        }
    }
    if let Some(next) = &report.next_milestone {
        out.push_str(&format!(
            "  Next: {} {} ({}, in {}d)\n",
            next.unit_id, next.name, next.date, next.days_until
        ));
    }
    out
}

fn render_contract(report: &ContractReminders) -> String {
    let mut out = format!("Contract {} {}\n", report.scope_id, report.title);
    out.push_str(&format!("  {}\n", summary_line(&report.summary)));

    match &report.next_step {
        Some(step) => out.push_str(&format!(
            "  Next step: {} {} [{}] planned {}\n",
            step.unit_id,
            step.name,
            step.status,
            step.planned_date.as_deref().unwrap_or("-")
        )),
        None => out.push_str("  All steps completed\n"),
    }
    for overdue in &report.overdue {
        out.push_str(&format!(
            "  Overdue: {} {} +{}d\n",
            overdue.unit_id, overdue.name, overdue.delay_days
        ));
    }
    if let Some(payment) = &report.payment_status {
        out.push_str(&format!("  Payment: {}\n", payment));
    }
    out
}

fn render_delays(delays: &[DelayReport]) -> String {
    let mut out = format!(
        "{:<8}  {:<24}  {:<10}  {:>5}  FLAGGED\n",
        "UNIT", "NAME", "PLANNED", "DAYS"
    );
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for delay in delays {
        out.push_str(&format!(
            "{:<8}  {:<24}  {:<10}  {:>5}  {}\n",
            delay.unit_id.as_str(),
            truncate(&delay.name, 24),
            delay.planned,
            delay.delay_days,
            if delay.flagged { "yes" } else { "" }
        ));
    }
    out
}

fn render_milestones(milestones: &[Milestone]) -> String {
    let mut out = format!("{:<8}  {:<24}  {:<10}  IN\n", "UNIT", "NAME", "DATE");
    out.push_str(&"-".repeat(54));
    out.push('\n');
    for m in milestones {
        out.push_str(&format!(
            "{:<8}  {:<24}  {:<10}  {}d\n",
            m.unit_id.as_str(),
            truncate(&m.name, 24),
            m.date,
            m.days_until
        ));
    }
    out
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    for report in &dashboard.reports {
        out.push_str(&render_report(report));
    }
    for failure in &dashboard.failures {
        out.push_str(&format!("{}: unavailable ({})\n", failure.scope_id, failure.error));
    }
    out
}

/// Truncates a string to the given number of characters, adding "..." if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
