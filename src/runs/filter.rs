use super::types::Run;

/// Order runs oldest first. Runs saved in the same instant fall back to id
/// order so the listing (and list indices) stay stable.
pub fn sort_chronological(runs: &[Run]) -> Vec<&Run> {
    let mut sorted: Vec<&Run> = runs.iter().collect();
    sorted.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// Find a run by exact id or by its 1-based position in `sorted`.
pub fn select_run<'a>(sorted: &[&'a Run], selector: &str) -> Option<&'a Run> {
    let selector = selector.trim();
    if let Some(run) = sorted.iter().find(|r| r.id == selector) {
        return Some(*run);
    }
    match selector.parse::<usize>() {
        Ok(index) if index >= 1 && index <= sorted.len() => Some(sorted[index - 1]),
        _ => None,
    }
}
