use crate::error::DashboardError;
use crate::types::EmployeeRow;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

/// Filtered table as CSV text, exactly what `write_export` puts on disk.
///
/// An empty view still yields the header row.
pub fn export_csv(rows: &[EmployeeRow]) -> Result<String, DashboardError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        wtr.write_record(EXPORT_COLUMNS)?;
    }
    for r in rows {
        wtr.serialize(r)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Header of the export file, in column order.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "ID",
    "Name",
    "Department",
    "Role",
    "Tasks_Assigned",
    "Tasks_Completed",
    "Completion_Rate",
    "Productivity_Score",
    "On_Time_Rate",
    "Avg_Task_Quality",
    "Overall_KPI",
    "Performance_Level",
];

pub fn write_export(path: &Path, rows: &[EmployeeRow]) -> Result<(), DashboardError> {
    std::fs::write(path, export_csv(rows)?)?;
    info!(path = %path.display(), rows = rows.len(), "wrote csv export");
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DashboardError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    info!(path = %path.display(), "wrote json summary");
    Ok(())
}

/// Markdown table of the first `max_rows` rows, or `empty_note` when there are none.
pub fn render_table<T>(rows: &[T], max_rows: usize, empty_note: &str) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return format!("({})", empty_note);
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize, empty_note: &str)
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows, max_rows, empty_note));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSet;
    use crate::generator::{generate, GeneratorParams};
    use crate::report::detail_rows;

    fn rows(employees: usize) -> Vec<EmployeeRow> {
        let data = generate(GeneratorParams {
            seed: 42,
            employees,
        });
        detail_rows(&FilterSet::all().apply(&data.employees))
    }

    #[test]
    fn export_has_header_and_one_line_per_row() {
        let text = export_csv(&rows(20)).expect("export");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(EXPORT_COLUMNS.join(",").as_str()));
        assert_eq!(lines.count(), 20);
    }

    #[test]
    fn empty_export_keeps_the_header() {
        let text = export_csv(&[]).expect("export");
        assert_eq!(text.trim_end(), EXPORT_COLUMNS.join(","));
    }

    #[test]
    fn export_round_trips_through_csv_reader() {
        let text = export_csv(&rows(5)).expect("export");
        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let headers = rdr.headers().expect("headers").clone();
        assert_eq!(headers.len(), EXPORT_COLUMNS.len());
        let first = rdr.records().next().expect("a row").expect("valid row");
        assert!(first[0].starts_with('E'));
        assert!(first[10].contains('.'));
    }

    #[test]
    fn export_file_matches_export_text() {
        let table = rows(8);
        let path = std::env::temp_dir().join(format!("kpi_export_{}.csv", std::process::id()));
        write_export(&path, &table).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, export_csv(&table).expect("export"));
    }

    #[test]
    fn render_table_shows_note_when_empty() {
        let empty: Vec<EmployeeRow> = Vec::new();
        assert_eq!(render_table(&empty, 5, "no rows"), "(no rows)");
        let table = render_table(&rows(3), 2, "no rows");
        assert!(table.contains("| ID"));
        assert_eq!(table.lines().count(), 4);
    }
}
