use crate::error::CoreResult;
use crate::ranking::MeritEntry;

pub const MERIT_LIST_COLUMNS: [&str; 9] = [
    "roll_number",
    "student_name",
    "course",
    "cgpa",
    "total_points",
    "marksheet_points",
    "certificate_count",
    "certificates_points",
    "rank",
];

/// Tabular merit list: header row, then one row per entry in list order.
/// The header is written even when the list is empty.
pub fn render_merit_list_csv(merit_list: &[MeritEntry]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(MERIT_LIST_COLUMNS)?;
    for e in merit_list {
        wtr.write_record(&[
            e.identity.clone(),
            e.student_name.clone(),
            e.course.clone(),
            e.cgpa.to_string(),
            e.total_points.to_string(),
            e.marksheet_points.to_string(),
            e.certificate_count.to_string(),
            e.certificates_points.to_string(),
            e.rank.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).to_string())
}
