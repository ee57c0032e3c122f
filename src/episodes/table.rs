use crate::error::{AppError, AppResult};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Headings and tables in document order
static HEADING_OR_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, table").expect("valid heading/table selector")
});

static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));

/// Footnote markers such as `[1]`, `[a]` or `[note 2]`
static FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid footnote regex"));

/// Titles of the first table following the first heading that contains `heading`.
///
/// The title column is the first header cell whose text contains "title",
/// compared case-insensitively. Rows made of a single cell (episode
/// summaries) are ignored.
pub fn parse_episode_titles(html: &str, heading: &str) -> AppResult<Vec<String>> {
    let document = Html::parse_document(html);

    let mut found_heading = false;
    let mut table = None;
    for element in document.select(&HEADING_OR_TABLE) {
        if found_heading {
            if element.value().name() == "table" {
                table = Some(element);
                break;
            }
        } else if element.value().name() != "table" && cell_text(element).contains(heading) {
            found_heading = true;
        }
    }

    if !found_heading {
        return Err(AppError::Scrape(format!(
            "no heading contains {:?}",
            heading
        )));
    }
    let table = table.ok_or_else(|| {
        AppError::Scrape(format!("no table follows the heading {:?}", heading))
    })?;

    let rows: Vec<Vec<ElementRef>> = table.select(&ROW).map(cells).collect();
    let header_idx = rows
        .iter()
        .position(|row| !row.is_empty() && row.iter().all(|c| c.value().name() == "th"))
        .ok_or_else(|| AppError::Scrape("table has no header row".to_string()))?;
    let title_column = title_column(&rows[header_idx]).ok_or_else(|| {
        AppError::Scrape(format!(
            "no title column in the table under {:?}",
            heading
        ))
    })?;

    let titles: Vec<String> = rows[header_idx + 1..]
        .iter()
        .filter(|row| row.len() > 1)
        .filter_map(|row| cell_at(row, title_column))
        .map(clean_title)
        .filter(|t| !t.is_empty())
        .collect();

    if titles.is_empty() {
        return Err(AppError::Scrape(format!(
            "the table under {:?} lists no titles",
            heading
        )));
    }
    Ok(titles)
}

/// `th`/`td` children of a row
fn cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "th" | "td"))
        .collect()
}

fn colspan(cell: &ElementRef) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|s| s.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Column position of the first header cell mentioning "title"
fn title_column(header: &[ElementRef]) -> Option<usize> {
    let mut column = 0;
    for cell in header {
        if cell_text(*cell).to_lowercase().contains("title") {
            return Some(column);
        }
        column += colspan(cell);
    }
    None
}

/// Cell covering `column`, honoring colspans
fn cell_at<'a>(row: &[ElementRef<'a>], column: usize) -> Option<ElementRef<'a>> {
    let mut start = 0;
    for cell in row {
        let end = start + colspan(cell);
        if (start..end).contains(&column) {
            return Some(*cell);
        }
        start = end;
    }
    None
}

fn cell_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop footnote markers and the quotes Wikipedia puts around episode titles
fn clean_title(cell: ElementRef) -> String {
    let text = cell_text(cell);
    FOOTNOTE
        .replace_all(&text, "")
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '“' | '”'))
        .trim()
        .to_string()
}
