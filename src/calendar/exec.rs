use super::aggregate::{aggregate_with_progress, Activity};
use super::grid::assemble;
use super::index::DayOffset;
use super::render::{render, Palette};
use crate::cli::CommonArgs;
use crate::git::GixSource;
use crate::model::{ActivityOutput, DayCount, SCHEMA_VERSION};
use crate::store::{RepoStore, SqliteStore};
use crate::util::{parse_as_of, spinner};
use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use console::style;
use indicatif::ProgressBar;
use std::io::Write;
use tracing::info;

pub fn exec(
    common: &CommonArgs,
    email: &str,
    as_of: Option<&str>,
    json: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let store = SqliteStore::open(common.store_path()?).context("Failed to open repository store")?;
    let repos = store.load().context("Failed to load repository store")?;
    if repos.is_empty() {
        eprintln!("No repositories known yet, run `gitcal scan <folder>` first");
    }

    let now = match as_of {
        Some(input) => parse_as_of(input, Local::now()).context("Failed to resolve --as-of")?,
        None => Local::now(),
    };
    info!(repos = repos.len(), as_of = %now, "aggregating");

    // Keep JSON output free of progress noise
    let pb = if json {
        ProgressBar::hidden()
    } else {
        spinner("Reading history...")
    };
    let activity = aggregate_with_progress(&repos, email, &GixSource, &now, &pb);
    pb.finish_and_clear();

    if json {
        output_json(&activity, email, &now)?;
    } else {
        output_calendar(&activity, &now, no_color)?;
    }

    Ok(())
}

fn output_json(activity: &Activity, email: &str, now: &DateTime<Local>) -> anyhow::Result<()> {
    let today = now.date_naive();
    let days = activity
        .counts
        .iter()
        .rev()
        .map(|(offset, commits)| DayCount {
            date: offset.date(today),
            days_ago: offset.days() as u8,
            commits,
        })
        .collect();

    let output = ActivityOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        as_of: today,
        author_email: email.to_string(),
        repositories_scanned: activity.scanned,
        skipped: activity.skipped.clone(),
        total_commits: activity.counts.total(),
        days,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_calendar(activity: &Activity, now: &DateTime<Local>, no_color: bool) -> anyhow::Result<()> {
    let grid = assemble(&activity.counts, now.date_naive());
    let palette = if no_color { Palette::plain() } else { Palette::ansi() };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&grid, &palette, &mut out).context("Failed to write calendar")?;
    out.flush().context("Failed to write calendar")?;

    if !activity.skipped.is_empty() {
        eprintln!(
            "{} {} repositories skipped:",
            style("warning:").yellow().bold(),
            activity.skipped.len()
        );
        for skipped in &activity.skipped {
            eprintln!("  {} ({})", skipped.path, style(&skipped.reason).dim());
        }
    }
    eprintln!(
        "{} commits in the last {} days",
        style(activity.counts.total()).green().bold(),
        DayOffset::OLDEST.days() + 1
    );
    Ok(())
}
