use crate::error::{AppError, AppResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// A line made of just `s<number>` opens that season's block
static SEASON_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[sS](\d+)$").expect("valid season marker regex"));

fn season_marker(line: &str) -> Option<usize> {
    SEASON_MARKER
        .captures(line)
        .and_then(|c| c[1].parse().ok())
}

/// Parse a newline-delimited list of new names.
///
/// With `num_seasons == 0` every non-blank line is a name. Otherwise only the
/// blocks following the markers `s1`..=`s<num_seasons>` count; a block ends at
/// the first blank line or at the next marker, and blocks are joined in
/// season order.
pub fn parse_name_list(
    contents: &str,
    num_seasons: usize,
    invalid_chars: &str,
) -> AppResult<Vec<String>> {
    let names = if num_seasons == 0 {
        contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    } else {
        season_names(contents, num_seasons)?
    };

    for name in &names {
        if let Some(c) = name.chars().find(|c| invalid_chars.contains(*c)) {
            return Err(AppError::Rename(format!(
                "name {:?} contains the invalid file path character {:?}",
                name, c
            )));
        }
    }
    Ok(names)
}

fn season_names(contents: &str, num_seasons: usize) -> AppResult<Vec<String>> {
    let mut seasons: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut current: Option<usize> = None;

    for line in contents.lines().map(str::trim) {
        if line.is_empty() {
            current = None;
            continue;
        }
        if let Some(season) = season_marker(line) {
            current = None;
            if (1..=num_seasons).contains(&season) {
                if seasons.insert(season, Vec::new()).is_some() {
                    return Err(AppError::Rename(format!(
                        "season marker s{} appears twice",
                        season
                    )));
                }
                current = Some(season);
            }
            continue;
        }
        if let Some(season) = current
            && let Some(block) = seasons.get_mut(&season)
        {
            block.push(line.to_string());
        }
    }

    if let Some(missing) = (1..=num_seasons).find(|s| !seasons.contains_key(s)) {
        return Err(AppError::Rename(format!("season marker s{} not found", missing)));
    }
    Ok(seasons.into_values().flatten().collect())
}
