use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::app::App;
use crate::board::{ScheduleBoard, TodaySlot};
use crate::catalog::{Catalog, StaffRecord, Weekday};
use crate::config::AppConfig;
use crate::schedule::{period_table, DayResolver};
use crate::search::{filter_records, group_by_subject};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Name or reading to filter by (matched as a case-insensitive substring)
    #[arg()]
    pub query: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TodayArgs {
    /// Staff identifier
    pub id: u32,
    /// Weekday to treat as today (defaults to the clock or config override)
    #[arg(long)]
    pub day: Option<Weekday>,
}

#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Time range exactly as written in the catalog, e.g. "9:30 - 10:15"
    pub range: String,
}

pub fn run_tui(app: &mut App) -> Result<()> {
    app.run()
}

pub fn list_staff(config: &AppConfig, args: ListArgs) -> Result<()> {
    let catalog = config.load_catalog()?;
    let query = args.query.join(" ");
    print!("{}", render_directory(&catalog, &query, config));
    Ok(())
}

pub fn show_today(config: &AppConfig, day: DayResolver, args: TodayArgs) -> Result<()> {
    let catalog = config.load_catalog()?;
    let output = run_today(catalog, day, args.id, config)?;
    print!("{output}");
    Ok(())
}

pub fn list_periods() -> Result<()> {
    print!("{}", format_period_table());
    Ok(())
}

pub fn resolve_period(args: PeriodArgs) -> Result<()> {
    println!("{}", format_period(&args.range));
    Ok(())
}

fn run_today(catalog: Catalog, day: DayResolver, id: u32, config: &AppConfig) -> Result<String> {
    let mut board = ScheduleBoard::new(catalog, day);
    board
        .select(id)
        .with_context(|| format!("looking up staff #{id}"))?;
    let Some(record) = board.selected_record() else {
        bail!("staff #{id} not found");
    };
    let rows = board.todays_slots().unwrap_or_default();
    Ok(format_today(record, board.current_day(), &rows, config))
}

fn render_directory(catalog: &Catalog, query: &str, config: &AppConfig) -> String {
    let groups = group_by_subject(filter_records(catalog, query));
    if groups.is_empty() {
        return "No results.\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(&mut out, "{} ({})", group.subject, group.len());
        for record in &group.records {
            let mut headline = format!("  #{:<3} {}", record.id, config.display_name(&record.name));
            if config.display.show_phonetic {
                if let Some(phonetic) = record.phonetic_name.as_deref() {
                    let _ = write!(&mut headline, " ({phonetic})");
                }
            }
            let _ = writeln!(&mut out, "{headline}");
            let _ = writeln!(&mut out, "       {}", record.profile);
        }
        out.push('\n');
    }
    out
}

fn format_today(record: &StaffRecord, day: Weekday, rows: &[TodaySlot<'_>], config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(&mut out, "{} on {}", config.display_name(&record.name), day);
    if rows.is_empty() {
        out.push_str("No sessions today.\n");
        return out;
    }
    for row in rows {
        let _ = writeln!(
            &mut out,
            "  {:<14} {:<10} {}",
            row.slot.time, row.slot.location, row.period
        );
    }
    out
}

fn format_period(range: &str) -> String {
    crate::schedule::resolve_period(range).as_str().to_string()
}

fn format_period_table() -> String {
    let mut out = String::new();
    for (range, label) in period_table() {
        let _ = writeln!(&mut out, "{:<12} {}", label.as_str(), range);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardError;
    use crate::catalog::fixtures::{record, slot};

    type TestResult<T = ()> = Result<T>;

    fn catalog() -> TestResult<Catalog> {
        let mut ada = record(1, "Ada", Some("ada"), "Math");
        ada.schedule = vec![
            slot(Weekday::Tuesday, "9:30 - 10:15", "222"),
            slot(Weekday::Wednesday, "10:25 - 11:10", "101"),
            slot(Weekday::Tuesday, "10:00 - 12:00", "Lab"),
        ];
        let brook = record(2, "Brook", None, "Art");
        Ok(Catalog::from_records(vec![ada, brook])?)
    }

    #[test]
    fn directory_lists_groups_alphabetically() -> TestResult {
        let output = render_directory(&catalog()?, "", &AppConfig::default());
        assert_eq!(
            output,
            "Art (1)\n  #2   Brook\n       profile 2\n\nMath (1)\n  #1   Ada (ada)\n       profile 1\n\n"
        );
        Ok(())
    }

    #[test]
    fn directory_reports_no_results() -> TestResult {
        let output = render_directory(&catalog()?, "zed", &AppConfig::default());
        assert_eq!(output, "No results.\n");
        Ok(())
    }

    #[test]
    fn directory_applies_name_suffix_and_hides_reading() -> TestResult {
        let mut config = AppConfig::default();
        config.display.name_suffix = "先生".into();
        config.display.show_phonetic = false;
        let output = render_directory(&catalog()?, "ADA", &config);
        assert_eq!(output, "Math (1)\n  #1   Ada先生\n       profile 1\n\n");
        Ok(())
    }

    #[test]
    fn today_lists_matching_slots_with_periods() -> TestResult {
        let output = run_today(
            catalog()?,
            DayResolver::fixed(Weekday::Tuesday),
            1,
            &AppConfig::default(),
        )?;
        assert_eq!(
            output,
            "Ada on Tuesday\n  9:30 - 10:15   222        1st period\n  10:00 - 12:00  Lab        unrecognized\n"
        );
        Ok(())
    }

    #[test]
    fn today_without_sessions_says_so() -> TestResult {
        let output = run_today(
            catalog()?,
            DayResolver::fixed(Weekday::Friday),
            2,
            &AppConfig::default(),
        )?;
        assert_eq!(output, "Brook on Friday\nNo sessions today.\n");
        Ok(())
    }

    #[test]
    fn today_rejects_unknown_id() -> TestResult {
        let err = run_today(
            catalog()?,
            DayResolver::fixed(Weekday::Friday),
            42,
            &AppConfig::default(),
        )
        .expect_err("unknown id");
        assert_eq!(
            err.downcast_ref::<BoardError>(),
            Some(&BoardError::UnknownRecord(42))
        );
        Ok(())
    }

    #[test]
    fn period_lookup_uses_the_range_verbatim() {
        assert_eq!(format_period("9:30 - 10:15"), "1st period");
        assert_eq!(format_period(""), "unrecognized");
        assert_eq!(format_period("9:30 - 10:15\n"), "unrecognized");
        assert_eq!(format_period("9:30 - 10:15\r\n"), "unrecognized");
    }

    #[test]
    fn period_table_output() {
        insta::assert_snapshot!(format_period_table(), @r"
        1st period   9:30 - 10:15
        2nd period   10:25 - 11:10
        3rd period   11:20 - 12:05
        4a period    12:15 - 13:00
        4b period    13:00 - 13:45
        5th period   13:55 - 14:40
        6th period   14:50 - 15:35
        7th period   15:45 - 16:30
        8th period   16:40 - 17:25
        9th period   17:35 - 18:20
        10th period  18:30 - 19:15
        ");
    }
}
