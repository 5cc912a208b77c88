use crate::ranking::MeritEntry;

/// Human-readable top of the merit list, one line per entry.
pub fn render_top_table(merit_list: &[MeritEntry], limit: usize) -> String {
    let mut out = String::new();
    for e in merit_list.iter().take(limit) {
        out.push_str(&format!(
            "{:>2}. {:<30} | Roll: {:<10} | Points: {}\n",
            e.rank, e.student_name, e.identity, e.total_points
        ));
    }
    out
}
