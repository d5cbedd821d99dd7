//! HTML result parser.
//!
//! Results pages come in three shapes: a pre-formatted fixed-width listing
//! inside `<pre>`, an HTML table, or pipe-delimited text lines. They are tried
//! in that order. Every table on the page is scored by how many of its rows
//! read as results, and the best one wins, so banners and navigation tables
//! are passed over. Tables are read through their header row when one names
//! the columns, and by cell shape otherwise. Parsing happens once into owned
//! cell text; turning cells into rows is lazy so that each bad row is
//! reported on its own.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use storage::models::{AthleteName, Gender};
use storage::time::parse_time;

use crate::error::{ImporterError, Result};

lazy_static! {
    static ref TIME_LIKE: Regex = Regex::new(r"^\d{1,2}(?::\d{2}){1,2}(?:\.\d+)?$").unwrap();
    static ref PLACE: Regex = Regex::new(r"^(\d+)\.?$").unwrap();
    // place  div/tot  bib  name  sex  school  time  [pace]
    static ref PRE_LINE: Regex = Regex::new(
        r"^\s*(\d+)\s+\d+/\d+\s+\d+\s+(.+?)\s+([MF])\s+(.+?)\s+(\d[\d:.]*|DNF|DNS|DQ)(?:\s+\d{1,2}:\d{2}(?:\.\d+)?)?\s*$"
    )
    .unwrap();
    // | place | | school and name | grade | school | time |
    static ref PIPE_LINE: Regex = Regex::new(
        r"\|\s*(\d+)\s*\|[^|]*\|\s*([^|]+?)\s*\|\s*(\d+)\s*\|[^|]*\|\s*(\d{1,2}(?::\d{2}){1,2}(?:\.\d+)?)\s*\|"
    )
    .unwrap();
}

const PLACE_LABELS: &[&str] = &["place", "pl", "pos", "position", "#", "rank", "overall"];
const NAME_LABELS: &[&str] = &["name", "athlete", "runner", "athlete name", "full name"];
const TIME_LABELS: &[&str] = &["time", "finish", "final", "final time", "mark", "result"];
const GENDER_LABELS: &[&str] = &["gender", "sex", "m/f"];
const SCHOOL_LABELS: &[&str] = &["school", "team", "affiliation", "club"];

/// Words that end a school name when it is run together with the athlete's.
const SCHOOL_WORDS: &[&str] = &["high", "school", "middle", "academy", "charter", "classical"];

/// A result row as read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position in the page's row sequence.
    pub position: usize,
    pub name: AthleteName,
    pub school: Option<String>,
    pub gender_hint: Option<Gender>,
    pub time_text: String,
    pub time_seconds: Decimal,
    pub place: Option<i32>,
}

/// A row that could not be turned into a [`RawRow`].
#[derive(Debug)]
pub struct SkippedRow {
    pub position: usize,
    pub text: String,
    pub reason: ImporterError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} [{}]: {}", self.position, self.text, self.reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Preformatted,
    Table,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    place: Option<String>,
    name: String,
    school: Option<String>,
    gender: Option<String>,
    time: String,
}

impl Candidate {
    fn describe(&self) -> String {
        format!("{} {}", self.name, self.time)
    }

    /// Whether the row has a valid time and a splittable name.
    fn is_readable(&self) -> bool {
        parse_time(&self.time).is_ok() && AthleteName::parse(&self.name).is_some()
    }

    fn has_place(&self) -> bool {
        self.place.as_deref().and_then(parse_place).is_some()
    }

    fn to_row(&self, position: usize) -> std::result::Result<RawRow, SkippedRow> {
        let skip = |reason| SkippedRow {
            position,
            text: self.describe(),
            reason,
        };

        let time_seconds = parse_time(&self.time).map_err(|e| skip(ImporterError::Format(e)))?;
        let name = AthleteName::parse(&self.name).ok_or_else(|| {
            skip(ImporterError::Parse(format!(
                "cannot split '{}' into first and last name",
                self.name
            )))
        })?;

        Ok(RawRow {
            position,
            name,
            school: self.school.clone().filter(|s| !s.is_empty()),
            gender_hint: self
                .gender
                .as_deref()
                .and_then(|g| g.parse::<Gender>().ok())
                .filter(Gender::is_athlete_gender),
            time_text: self.time.clone(),
            time_seconds,
            place: self.place.as_deref().and_then(parse_place),
        })
    }
}

/// One line or table row inside the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Row(Candidate),
    /// A line in the results area that does not fit the layout.
    Unmatched(String),
}

impl Entry {
    fn to_row(&self, position: usize) -> std::result::Result<RawRow, SkippedRow> {
        match self {
            Self::Row(candidate) => candidate.to_row(position),
            Self::Unmatched(line) => Err(SkippedRow {
                position,
                text: line.clone(),
                reason: ImporterError::Parse("line does not match the results layout".to_string()),
            }),
        }
    }
}

/// The result rows found on one page.
#[derive(Debug, Clone)]
pub struct ResultPage {
    layout: Layout,
    entries: Vec<Entry>,
}

impl ResultPage {
    /// Locates the results on a page.
    ///
    /// Fails with [`ImporterError::Parse`] when the page has no usable
    /// pre-formatted listing, no table with readable result rows and no
    /// pipe-delimited result lines.
    pub fn from_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);

        if let Some(page) = Self::from_preformatted(&document)? {
            tracing::debug!("Found {} pre-formatted result lines", page.len());
            return Ok(page);
        }

        if let Some(page) = Self::from_tables(&document)? {
            tracing::debug!("Found {} result table rows", page.len());
            return Ok(page);
        }

        if let Some(page) = Self::from_text(&document) {
            tracing::debug!("Found {} pipe-delimited result lines", page.len());
            return Ok(page);
        }

        Err(ImporterError::Parse("no results table found".to_string()))
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in page order; rows with a bad time or name come back as
    /// [`SkippedRow`] without stopping the sequence.
    pub fn rows(&self) -> impl Iterator<Item = std::result::Result<RawRow, SkippedRow>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_row(i + 1))
    }

    fn from_preformatted(document: &Html) -> Result<Option<Self>> {
        let pre = selector("pre")?;
        let Some(block) = document.select(&pre).next() else {
            return Ok(None);
        };

        let text: String = block.text().collect();
        let mut in_results = false;
        let mut entries = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.contains("====") {
                in_results = true;
                continue;
            }
            if !in_results {
                continue;
            }

            let entry = match PRE_LINE.captures(line) {
                Some(caps) => Entry::Row(Candidate {
                    place: Some(caps[1].to_string()),
                    name: caps[2].trim().to_string(),
                    school: Some(caps[4].trim().to_string()),
                    gender: Some(caps[3].to_string()),
                    time: caps[5].to_string(),
                }),
                None => Entry::Unmatched(trimmed.to_string()),
            };
            entries.push(entry);
        }

        if !entries.iter().any(|e| matches!(e, Entry::Row(_))) {
            return Ok(None);
        }

        Ok(Some(Self {
            layout: Layout::Preformatted,
            entries,
        }))
    }

    fn from_tables(document: &Html) -> Result<Option<Self>> {
        let table = selector("table")?;
        let tr = selector("tr")?;
        let cell = selector("td, th")?;

        // max_by_key keeps the last of equal scores, so ties go to the later table.
        let best = document
            .select(&table)
            .map(|t| TableScan::new(&table_cells(t, &tr, &cell)))
            .filter(|scan| scan.score > 0)
            .max_by_key(|scan| scan.score);

        Ok(best.map(|scan| Self {
            layout: Layout::Table,
            entries: scan.candidates.into_iter().map(Entry::Row).collect(),
        }))
    }

    fn from_text(document: &Html) -> Option<Self> {
        let text = document.root_element().text().collect::<Vec<_>>().join("\n");
        let mut heading_gender: Option<&str> = None;
        let mut entries = Vec::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let Some(caps) = PIPE_LINE.captures(line) else {
                if let Some(gender) = heading_gender_of(line) {
                    heading_gender = Some(gender);
                }
                continue;
            };

            let (school, name) = split_school(&caps[2]);
            entries.push(Entry::Row(Candidate {
                place: Some(caps[1].to_string()),
                name,
                school,
                gender: heading_gender.map(str::to_string),
                time: caps[4].to_string(),
            }));
        }

        if entries.is_empty() {
            return None;
        }

        Some(Self {
            layout: Layout::Text,
            entries,
        })
    }
}

/// Candidate rows of one table and how strongly they read as results.
struct TableScan {
    candidates: Vec<Candidate>,
    score: usize,
}

impl TableScan {
    fn new(rows: &[Vec<String>]) -> Self {
        let (candidates, has_header) = candidates_from_cells(rows);

        let readable = candidates.iter().filter(|c| c.is_readable()).count();
        let score = if readable == 0 {
            0
        } else {
            let placed = candidates
                .iter()
                .filter(|c| c.is_readable() && c.has_place())
                .count();
            readable * 2 + placed + if has_header { 2 } else { 0 }
        };

        Self { candidates, score }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ImporterError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// Cell text of the rows that belong to `table` itself, not to a nested table.
fn table_cells(table: ElementRef<'_>, tr: &Selector, cell: &Selector) -> Vec<Vec<String>> {
    table
        .select(tr)
        .filter(|row| owning_table(*row) == Some(table))
        .map(|row| {
            row.select(cell)
                .filter(|c| owning_table(*c) == Some(table))
                .map(cell_text)
                .collect()
        })
        .collect()
}

fn owning_table(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "table")
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_place(text: &str) -> Option<i32> {
    PLACE
        .captures(text.trim())
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .filter(|place| *place > 0)
}

fn is_gender_token(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "m" | "f" | "male" | "female"
    )
}

fn heading_gender_of(line: &str) -> Option<&'static str> {
    let lower = line.to_lowercase();
    if ["girls", "women", "female"].iter().any(|w| lower.contains(w)) {
        Some("female")
    } else if ["boys", "men", "male"].iter().any(|w| lower.contains(w)) {
        Some("male")
    } else {
        None
    }
}

/// Splits "Fossil Ridge High School Joey Benson" after the last school word.
/// Without one, the last two words are the name and the school is unknown.
fn split_school(text: &str) -> (Option<String>, String) {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last_school_word = words
        .iter()
        .rposition(|w| SCHOOL_WORDS.contains(&w.to_lowercase().as_str()));

    match last_school_word {
        Some(i) if i + 2 < words.len() => {
            (Some(words[..=i].join(" ")), words[i + 1..].join(" "))
        }
        _ if words.len() >= 2 => (None, words[words.len() - 2..].join(" ")),
        _ => (None, words.join(" ")),
    }
}

fn label_index(cells: &[String], labels: &[&str]) -> Option<usize> {
    cells
        .iter()
        .position(|c| labels.contains(&c.to_lowercase().trim_end_matches(':')))
}

fn is_header(cells: &[String]) -> bool {
    !cells.iter().any(|c| TIME_LIKE.is_match(c))
        && (label_index(cells, NAME_LABELS).is_some()
            || label_index(cells, TIME_LABELS).is_some())
}

/// Column positions taken from a header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    place: Option<usize>,
    name: usize,
    time: usize,
    gender: Option<usize>,
    school: Option<usize>,
}

impl Columns {
    fn from_header(cells: &[String]) -> Option<Self> {
        Some(Self {
            place: label_index(cells, PLACE_LABELS),
            name: label_index(cells, NAME_LABELS)?,
            time: label_index(cells, TIME_LABELS)?,
            gender: label_index(cells, GENDER_LABELS),
            school: label_index(cells, SCHOOL_LABELS),
        })
    }

    fn extract(&self, cells: &[String]) -> Option<Candidate> {
        let name = cells.get(self.name).filter(|n| !n.is_empty())?;
        let time = cells.get(self.time)?;

        Some(Candidate {
            place: self.place.and_then(|i| cells.get(i)).cloned(),
            name: name.clone(),
            school: self.school.and_then(|i| cells.get(i)).cloned(),
            gender: self.gender.and_then(|i| cells.get(i)).cloned(),
            time: time.clone(),
        })
    }
}

/// First integer cell is the place, first time-like cell the time, and the
/// first other cell with letters the name.
fn positional(cells: &[String]) -> Option<Candidate> {
    if cells.iter().filter(|c| !c.is_empty()).count() < 2 {
        return None;
    }

    let time_idx = cells.iter().position(|c| TIME_LIKE.is_match(c));
    let (name_idx, name) = cells.iter().enumerate().find(|(i, c)| {
        Some(*i) != time_idx && c.chars().any(char::is_alphabetic) && !is_gender_token(c)
    })?;

    let time = match time_idx {
        Some(i) => cells[i].clone(),
        None => {
            let (last_idx, last) = cells
                .iter()
                .enumerate()
                .rev()
                .find(|(_, c)| !c.is_empty())?;
            if last_idx == name_idx {
                return None;
            }
            last.clone()
        }
    };

    Some(Candidate {
        place: cells.iter().find(|c| PLACE.is_match(c)).cloned(),
        name: name.clone(),
        school: None,
        gender: cells.iter().find(|c| is_gender_token(c)).cloned(),
        time,
    })
}

/// Candidate rows of a table, and whether a header row named its columns.
fn candidates_from_cells(rows: &[Vec<String>]) -> (Vec<Candidate>, bool) {
    let mut columns: Option<Columns> = None;
    let mut candidates = Vec::new();

    for cells in rows {
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        if is_header(cells) {
            if columns.is_none() {
                columns = Columns::from_header(cells);
            }
            continue;
        }

        let candidate = match &columns {
            Some(cols) => cols.extract(cells),
            None => positional(cells),
        };
        candidates.extend(candidate);
    }

    (candidates, columns.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ok_rows(page: &ResultPage) -> Vec<RawRow> {
        page.rows().filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn test_header_mapped_table() {
        let html = r#"
            <html><body>
            <table class="nav"><tr><td>Home</td><td>Meets</td></tr></table>
            <table>
              <tr><th>Place</th><th>Grade</th><th>Athlete</th><th>Team</th><th>Time</th></tr>
              <tr><td>1</td><td>11</td><td>Doe, Alex</td><td>Rocky</td><td>17:59.10</td></tr>
              <tr><td>3</td><td>12</td><td>Smith, Jane</td><td>Fort Collins</td><td>18:32.45</td></tr>
            </table>
            </body></html>"#;

        let page = ResultPage::from_html(html).unwrap();
        assert_eq!(page.layout(), Layout::Table);

        let rows = ok_rows(&page);
        assert_eq!(rows.len(), 2);
        let jane = &rows[1];
        assert_eq!(jane.name.first_name(), "Jane");
        assert_eq!(jane.name.last_name(), "Smith");
        assert_eq!(jane.school.as_deref(), Some("Fort Collins"));
        assert_eq!(jane.time_seconds, Decimal::from_str("1112.45").unwrap());
        assert_eq!(jane.place, Some(3));
        assert_eq!(jane.position, 2);
    }

    #[test]
    fn test_positional_table_without_header() {
        let html = r#"
            <table>
              <tr><td>1.</td><td>Jane Smith</td><td>F</td><td>18:32.45</td><td>5:58</td></tr>
              <tr><td>2.</td><td>Ana Cruz</td><td>F</td><td>18:40.00</td><td>6:01</td></tr>
            </table>"#;

        let page = ResultPage::from_html(html).unwrap();
        let rows = ok_rows(&page);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].place, Some(1));
        assert_eq!(rows[0].gender_hint, Some(Gender::Female));
        assert_eq!(rows[0].time_text, "18:32.45");
        assert_eq!(rows[0].school, None);
        assert_eq!(rows[1].name.last_name(), "Cruz");
    }

    #[test]
    fn test_clock_banner_table_is_passed_over() {
        let html = r#"
            <table><tr><td>Last updated</td><td>10:30</td></tr></table>
            <table>
              <tr><td>1</td><td>Jane Smith</td><td>18:32.45</td></tr>
            </table>"#;

        let page = ResultPage::from_html(html).unwrap();
        let rows = ok_rows(&page);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.last_name(), "Smith");
        assert_eq!(rows[0].place, Some(1));
    }

    #[test]
    fn test_equal_scores_prefer_the_later_table() {
        let html = r#"
            <table><tr><td>Last updated</td><td>10:30</td></tr></table>
            <table><tr><td>Jane Smith</td><td>18:32.45</td></tr></table>"#;

        let rows = ok_rows(&ResultPage::from_html(html).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.first_name(), "Jane");
    }

    #[test]
    fn test_nested_layout_table_does_not_swallow_results() {
        let html = r#"
            <table><tr><td>
              <table>
                <tr><th>Pl</th><th>Name</th><th>Time</th></tr>
                <tr><td>1</td><td>Jane Smith</td><td>18:32.45</td></tr>
                <tr><td>2</td><td>Ana Cruz</td><td>18:40.00</td></tr>
              </table>
            </td></tr></table>"#;

        let page = ResultPage::from_html(html).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(ok_rows(&page).len(), 2);
    }

    #[test]
    fn test_tables_without_readable_rows_are_parse_error() {
        let html = r#"
            <table><tr><td>Home</td><td>Meets</td></tr></table>
            <table><tr><td>Kickoff</td><td>7:30</td></tr></table>"#;

        let err = ResultPage::from_html(html).unwrap_err();
        assert!(matches!(err, ImporterError::Parse(_)));
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let html = r#"
            <table>
              <tr><th>Pl</th><th>Name</th><th>Time</th></tr>
              <tr><td>1</td><td>Jane Smith</td><td>18:32.45</td></tr>
              <tr><td></td><td>Sam Lee</td><td>DNF</td></tr>
              <tr><td>2</td><td>Cher</td><td>19:01.00</td></tr>
              <tr><td>3</td><td>Ana Cruz</td><td>19:75.00</td></tr>
              <tr><td>4</td><td>Mia Park</td><td>19:30.00</td></tr>
            </table>"#;

        let page = ResultPage::from_html(html).unwrap();
        let results: Vec<_> = page.rows().collect();
        assert_eq!(results.len(), 5);

        let skipped: Vec<&SkippedRow> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(skipped.len(), 3);
        assert!(matches!(skipped[0].reason, ImporterError::Format(_)));
        assert_eq!(skipped[0].position, 2);
        assert!(matches!(skipped[1].reason, ImporterError::Parse(_)));
        assert!(matches!(skipped[2].reason, ImporterError::Format(_)));

        let last = results[4].as_ref().unwrap();
        assert_eq!(last.name.first_name(), "Mia");
        assert_eq!(last.place, Some(4));
    }

    #[test]
    fn test_preformatted_listing() {
        let html = "<html><body><pre>
Girls 5K Varsity
Place Div/Tot  Bib  Name                          Sex School                      Time   Pace
===== ======= ==== ============================= === =========================== ====== =====
    1   1/124 3392 Jane Smith                      F Fort Collins High School     18:32.45  5:58
    2   2/124 3310 Mary Kate Olsen                 F Rocky Mountain High School   18:40.00  6:01
    3   3/124 3311 Ana Cruz                        F Fossil Ridge High School     18:52.10
</pre></body></html>";

        let page = ResultPage::from_html(html).unwrap();
        assert_eq!(page.layout(), Layout::Preformatted);

        let rows = ok_rows(&page);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].place, Some(1));
        assert_eq!(rows[0].gender_hint, Some(Gender::Female));
        assert_eq!(rows[0].school.as_deref(), Some("Fort Collins High School"));
        assert_eq!(rows[1].name.first_name(), "Mary Kate");
        assert_eq!(rows[1].name.last_name(), "Olsen");
        assert_eq!(rows[2].time_text, "18:52.10");
    }

    #[test]
    fn test_preformatted_unreadable_lines_are_skipped() {
        let html = "<pre>
Place Div/Tot  Bib  Name            Sex School                    Time     Pace
===== ======= ==== =============== === ========================= ======== =====
    1   1/124 3392 Jane Smith        F Fort Collins High School  18:32.45  5:58
   --   --/124 3400 Sam Lee          F Poudre High School        DNF
    2   2/124 3310 Ana Cruz          F Fossil Ridge High School  18:40.00  6:01
</pre>";

        let page = ResultPage::from_html(html).unwrap();
        let results: Vec<_> = page.rows().collect();
        assert_eq!(results.len(), 3);

        let skipped = results[1].as_ref().unwrap_err();
        assert_eq!(skipped.position, 2);
        assert!(skipped.text.contains("Sam Lee"));
        assert!(matches!(skipped.reason, ImporterError::Parse(_)));
        assert_eq!(results[2].as_ref().unwrap().name.last_name(), "Cruz");
    }

    #[test]
    fn test_pipe_delimited_text_fallback() {
        let html = "<html><body>
<h2>Boys Varsity 5K</h2>
<p>| Pl | | Athlete | Yr | Team | Time | Score |</p>
<p>| 1 |   | Fossil Ridge High School Joey Benson | 9 | Fossil Ridge High School | 18:21.00 | 1 |</p>
<p>| 2 |   | Sam Ortiz | 11 | Poudre | 18:30.50 | 2 |</p>
</body></html>";

        let page = ResultPage::from_html(html).unwrap();
        assert_eq!(page.layout(), Layout::Text);

        let rows = ok_rows(&page);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.first_name(), "Joey");
        assert_eq!(rows[0].name.last_name(), "Benson");
        assert_eq!(rows[0].school.as_deref(), Some("Fossil Ridge High School"));
        assert_eq!(rows[0].place, Some(1));
        assert_eq!(rows[0].gender_hint, Some(Gender::Male));
        assert_eq!(rows[0].time_seconds, Decimal::from_str("1101.00").unwrap());
        assert_eq!(rows[1].school, None);
        assert_eq!(rows[1].name.last_name(), "Ortiz");
    }

    #[test]
    fn test_split_school() {
        assert_eq!(
            split_school("Rocky Mountain High School Mary Kate Olsen"),
            (
                Some("Rocky Mountain High School".to_string()),
                "Mary Kate Olsen".to_string()
            )
        );
        assert_eq!(
            split_school("Poudre Alex Doe"),
            (None, "Alex Doe".to_string())
        );
        assert_eq!(split_school("Cher"), (None, "Cher".to_string()));
    }

    #[test]
    fn test_page_without_results_is_parse_error() {
        let err = ResultPage::from_html("<html><body><p>Results coming soon</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, ImporterError::Parse(_)));
        assert!(err.is_race_level());
    }
}
