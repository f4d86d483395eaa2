// Entry point and console front end for the KPI dashboard.
//
// One run renders the dashboard for the filters given on the command line.
// With `--interactive`, the user keeps adjusting filters at a prompt and every
// change re-renders against the same cached table.
use anyhow::Context;
use clap::Parser;
use kpi_dashboard::aggregate::kpi_bounds;
use kpi_dashboard::filter::{options, FilterSet, ScoreRange, Selection};
use kpi_dashboard::generator::{self, GeneratorParams, DEFAULT_EMPLOYEES, DEFAULT_SEED};
use kpi_dashboard::output;
use kpi_dashboard::report::{self, DashboardView, NO_MATCH_MESSAGE};
use kpi_dashboard::telemetry::DEFAULT_LOG_LEVEL;
use kpi_dashboard::types::{Department, Metric, PerformanceBand, Project, Role, UnknownLabel};
use kpi_dashboard::util::{format_int, format_number};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "kpi-dashboard",
    about = "Employee performance KPI dashboard over a seeded sample dataset",
    version
)]
struct Cli {
    /// Seed for the sample dataset
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Number of employees to generate
    #[arg(long, default_value_t = DEFAULT_EMPLOYEES)]
    employees: usize,
    /// Keep only these departments (repeatable; default: all)
    #[arg(long = "department")]
    departments: Vec<Department>,
    /// Keep only these role levels (repeatable; default: all)
    #[arg(long = "role")]
    roles: Vec<Role>,
    /// Keep only employees on any of these projects (repeatable; default: all)
    #[arg(long = "project")]
    projects: Vec<Project>,
    /// Keep only these performance levels (repeatable; default: all)
    #[arg(long = "level")]
    levels: Vec<PerformanceBand>,
    /// Lowest Overall KPI to keep (default: table minimum)
    #[arg(long)]
    kpi_min: Option<f64>,
    /// Highest Overall KPI to keep (default: table maximum)
    #[arg(long)]
    kpi_max: Option<f64>,
    /// Metric for the top-10 drill-down
    #[arg(long, default_value = "Productivity_Score")]
    metric: Metric,
    /// Write the filtered table as CSV
    #[arg(long)]
    export: Option<PathBuf>,
    /// Write the full dashboard view as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Rows shown in the detail table preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    /// Keep prompting for filter changes after the first render
    #[arg(long)]
    interactive: bool,
}

/// Everything one render depends on besides the cached table.
struct Session {
    params: GeneratorParams,
    filters: FilterSet,
    default_range: ScoreRange,
    metric: Metric,
    preview_rows: usize,
}

impl Session {
    fn view(&self) -> DashboardView {
        let data = generator::dataset(self.params);
        DashboardView::build(&data, &self.filters, self.metric)
    }

    fn reset(&mut self) {
        self.filters = FilterSet {
            kpi_range: self.default_range,
            ..FilterSet::all()
        };
        self.metric = Metric::ProductivityScore;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    kpi_dashboard::startup(&cli.log_level)
        .context("startup checks failed; refusing to start")?;

    let params = GeneratorParams {
        seed: cli.seed,
        employees: cli.employees,
    };
    let default_range = kpi_bounds(&generator::dataset(params).employees);
    let filters = FilterSet {
        departments: Selection::from_choices(cli.departments),
        roles: Selection::from_choices(cli.roles),
        projects: vec![Selection::from_choices(cli.projects)],
        levels: Selection::from_choices(cli.levels),
        kpi_range: ScoreRange::new(
            cli.kpi_min.unwrap_or(default_range.low),
            cli.kpi_max.unwrap_or(default_range.high),
        ),
    };
    let mut session = Session {
        params,
        filters,
        default_range,
        metric: cli.metric,
        preview_rows: cli.preview_rows,
    };

    let view = session.view();
    render(&view, session.preview_rows);
    write_outputs(&view, cli.export.as_deref(), cli.summary.as_deref())?;

    if cli.interactive {
        run_interactive(&mut session)?;
    }
    Ok(())
}

fn write_outputs(
    view: &DashboardView,
    export: Option<&Path>,
    summary: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = export {
        output::write_export(path, &view.table)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!(
            "Filtered data exported to {} ({} rows).\n",
            path.display(),
            format_int(view.table.len())
        );
    }
    if let Some(path) = summary {
        output::write_json(path, view)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Dashboard summary written to {}.\n", path.display());
    }
    Ok(())
}

fn section(title: &str) {
    println!("{}", title.to_uppercase());
    println!("{}", "-".repeat(title.len()));
}

fn render(view: &DashboardView, preview_rows: usize) {
    println!("Employee Performance KPI Dashboard");
    println!("Task Completion & Productivity · Interactive Drill-Down\n");

    section("Key Metrics (Filtered View)");
    let cards = &view.cards;
    println!("Employees:              {}", format_int(cards.employees));
    println!("Avg Overall KPI:        {}", format_number(cards.avg_overall_kpi, 1));
    println!(
        "Avg Completion Rate:    {}%",
        format_number(cards.avg_completion_rate, 1)
    );
    println!(
        "Avg On-Time Rate:       {}%",
        format_number(cards.avg_on_time_rate, 1)
    );
    println!(
        "Avg Productivity Score: {}\n",
        format_number(cards.avg_productivity_score, 1)
    );

    if view.is_empty() {
        println!("{}\n", NO_MATCH_MESSAGE);
        return;
    }

    section("Performance Distribution");
    for bin in &view.kpi_histogram {
        println!(
            "{:>5}-{:<5} {:>3} {}",
            format_number(bin.lower, 1),
            format_number(bin.upper, 1),
            bin.count,
            "#".repeat(bin.count)
        );
    }
    println!();
    for band in &view.band_breakdown {
        let share = band.count as f64 / view.row_count() as f64 * 100.0;
        println!(
            "{:<18} {:>3} ({}%)",
            band.level.label(),
            band.count,
            format_number(share, 1)
        );
    }
    println!();

    section("Department Analysis");
    let departments = report::group_rows(&view.department_summary);
    output::preview_table_rows(&departments, departments.len(), "no departments");
    section("Project Analysis");
    let projects = report::group_rows(&view.project_summary);
    output::preview_table_rows(&projects, projects.len(), "no project members");

    section("Monthly Productivity Trend");
    for department in Department::ALL {
        let line: Vec<String> = view
            .trend
            .iter()
            .filter(|p| p.department == department)
            .map(|p| format!("{} {}", p.month, p.score))
            .collect();
        if !line.is_empty() {
            println!("{:<12} {}", department.label(), line.join("  "));
        }
    }
    println!();

    section(&format!("Drill-Down: Top 10 by {}", view.drill_down_metric.label()));
    let ranked = report::ranking_rows(&view.drill_down);
    output::preview_table_rows(&ranked, ranked.len(), "no rankings");

    section("KPI Dimensions");
    let radar: Vec<String> = view
        .radar
        .iter()
        .map(|d| format!("{} {}", d.dimension, format_number(d.value, 1)))
        .collect();
    println!("{}\n", radar.join(" · "));

    section("Employee Detail Table");
    output::preview_table_rows(&view.table, preview_rows, "no rows");
    if view.table.len() > preview_rows {
        println!(
            "({} more rows; use --export to save the full table)\n",
            format_int(view.table.len() - preview_rows)
        );
    }
}

/// Read a single line after printing the common prompt. `None` on end of input.
fn read_command() -> Option<String> {
    print!("filter> ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  department <{}>", options(&Department::ALL).join("|"));
    println!("  role <{}>", options(&Role::ALL).join("|"));
    println!("  project <{}>", options(&Project::ALL).join("|"));
    println!("  level <{}>", options(&PerformanceBand::ALL).join("|"));
    println!("      (comma-separate several values, or `none` to select nothing)");
    println!("  kpi <low> <high>     Overall KPI range, inclusive");
    println!("  metric <{}>", Metric::ALL.map(|m| m.column()).join("|"));
    println!("  export <path>        write the filtered table as CSV");
    println!("  summary <path>       write the dashboard view as JSON");
    println!("  reset | help | quit\n");
}

/// `All`, `none`, or a comma-separated list of labels.
fn parse_selection<T>(arg: &str) -> Result<Selection<T>, UnknownLabel>
where
    T: FromStr<Err = UnknownLabel> + Ord + Copy,
{
    match arg.trim() {
        a if a.eq_ignore_ascii_case("all") => Ok(Selection::All),
        a if a.eq_ignore_ascii_case("none") => Ok(Selection::only(Vec::new())),
        a => a
            .split(',')
            .map(|part| part.parse::<T>())
            .collect::<Result<Vec<_>, _>>()
            .map(Selection::only),
    }
}

enum Step {
    Render,
    Stay,
    Quit,
}

fn apply_command(session: &mut Session, line: &str) -> anyhow::Result<Step> {
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();
    let step = match command.to_ascii_lowercase().as_str() {
        "" => Step::Stay,
        "quit" | "exit" | "q" => Step::Quit,
        "help" | "?" => {
            print_help();
            Step::Stay
        }
        "reset" => {
            session.reset();
            Step::Render
        }
        "department" | "dept" => {
            session.filters.departments = parse_selection(arg)?;
            Step::Render
        }
        "role" => {
            session.filters.roles = parse_selection(arg)?;
            Step::Render
        }
        "project" => {
            session.filters.projects = vec![parse_selection(arg)?];
            Step::Render
        }
        "level" => {
            session.filters.levels = parse_selection(arg)?;
            Step::Render
        }
        "kpi" => {
            let bounds: Vec<&str> = arg.split_whitespace().collect();
            let [low, high] = bounds.as_slice() else {
                anyhow::bail!("usage: kpi <low> <high>");
            };
            let low: f64 = low.parse().context("kpi low bound must be a number")?;
            let high: f64 = high.parse().context("kpi high bound must be a number")?;
            session.filters.kpi_range = ScoreRange::new(low, high);
            Step::Render
        }
        "metric" => {
            session.metric = arg.parse()?;
            Step::Render
        }
        "export" => {
            write_outputs(&session.view(), Some(Path::new(arg)), None)?;
            Step::Stay
        }
        "summary" => {
            write_outputs(&session.view(), None, Some(Path::new(arg)))?;
            Step::Stay
        }
        other => anyhow::bail!("unknown command '{}' (type `help`)", other),
    };
    Ok(step)
}

fn run_interactive(session: &mut Session) -> anyhow::Result<()> {
    print_help();
    while let Some(line) = read_command() {
        match apply_command(session, &line) {
            Ok(Step::Render) => {
                info!(command = %line, "filters changed");
                println!();
                render(&session.view(), session.preview_rows);
            }
            Ok(Step::Stay) => {}
            Ok(Step::Quit) => break,
            Err(e) => {
                warn!(command = %line, error = %e, "command rejected");
                println!("Error: {:#}\n", e);
            }
        }
    }
    println!("Exiting the program.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let params = GeneratorParams {
            seed: 42,
            employees: 20,
        };
        let default_range = kpi_bounds(&generator::dataset(params).employees);
        let mut session = Session {
            params,
            filters: FilterSet::all(),
            default_range,
            metric: Metric::ProductivityScore,
            preview_rows: 5,
        };
        session.reset();
        session
    }

    #[test]
    fn selections_parse_all_none_and_lists() {
        assert!(parse_selection::<Role>("All").expect("all").is_all());
        assert_eq!(
            parse_selection::<Role>("none").expect("none"),
            Selection::only(Vec::new())
        );
        assert_eq!(
            parse_selection::<PerformanceBand>("good,needs-improvement").expect("list"),
            Selection::only([PerformanceBand::Good, PerformanceBand::NeedsImprovement])
        );
        assert!(parse_selection::<Department>("Finance").is_err());
    }

    #[test]
    fn commands_update_the_session() {
        let mut s = session();
        assert!(matches!(
            apply_command(&mut s, "department Sales,HR").expect("dept"),
            Step::Render
        ));
        assert_eq!(
            s.filters.departments,
            Selection::only([Department::Sales, Department::Hr])
        );
        apply_command(&mut s, "kpi 70 85").expect("kpi");
        assert_eq!(s.filters.kpi_range, ScoreRange::new(70.0, 85.0));
        apply_command(&mut s, "metric completion_rate").expect("metric");
        assert_eq!(s.metric, Metric::CompletionRate);
        assert!(s
            .view()
            .table
            .iter()
            .all(|r| r.department == "Sales" || r.department == "HR"));

        apply_command(&mut s, "reset").expect("reset");
        assert!(s.filters.departments.is_all());
        assert_eq!(s.filters.kpi_range, s.default_range);
        assert_eq!(s.view().row_count(), 20);
    }

    #[test]
    fn every_metric_named_in_help_is_accepted() {
        let mut s = session();
        for metric in Metric::ALL {
            apply_command(&mut s, &format!("metric {}", metric.column())).expect("metric");
            assert_eq!(s.metric, metric);
        }
    }

    #[test]
    fn project_command_replaces_project_clauses() {
        let mut s = session();
        apply_command(&mut s, "project Atlas,Echo").expect("project");
        apply_command(&mut s, "project Beacon").expect("project");
        assert_eq!(s.filters.projects, vec![Selection::only([Project::Beacon])]);
        assert!(s
            .view()
            .table
            .iter()
            .all(|r| generator::dataset(s.params)
                .employees
                .iter()
                .any(|e| e.id == r.id && e.projects.contains(&Project::Beacon))));
    }

    #[test]
    fn bad_commands_are_rejected() {
        let mut s = session();
        assert!(apply_command(&mut s, "kpi 70").is_err());
        assert!(apply_command(&mut s, "role Intern").is_err());
        assert!(apply_command(&mut s, "launch").is_err());
        assert!(matches!(apply_command(&mut s, "quit"), Ok(Step::Quit)));
    }
}
