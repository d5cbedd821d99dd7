//! CSV rendering of result exports.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::distance::calculate_pace;
use crate::dto::report::ExportRow;
use crate::time::format_seconds;

pub const RESULTS_HEADER: [&str; 10] = [
    "First Name",
    "Last Name",
    "Gender",
    "Meet",
    "Meet Date",
    "Race Class",
    "Distance",
    "Time",
    "Pace",
    "Place",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// One line per result, in the order the rows are given.
pub fn write_results_csv<W: Write>(w: &mut W, rows: &[ExportRow]) -> io::Result<()> {
    write_row(w, &RESULTS_HEADER)?;
    for row in rows {
        write_row(
            w,
            &[
                row.first_name.clone(),
                row.last_name.clone(),
                row.gender.clone(),
                row.meet_name.clone(),
                row.meet_date.to_string(),
                row.race_class.clone(),
                row.distance.clone(),
                format_seconds(row.time_seconds),
                calculate_pace(row.time_seconds, &row.distance).unwrap_or_default(),
                row.place.map(|p| p.to_string()).unwrap_or_default(),
            ],
        )?;
    }
    Ok(())
}

/// One line per athlete with a Time and Pace column pair per meet.
///
/// Meets are ordered by date then name, athletes by last then first name.
/// When an athlete ran more than one race at a meet the fastest one is used;
/// meets the athlete skipped stay empty.
pub fn write_meet_matrix_csv<W: Write>(w: &mut W, rows: &[ExportRow]) -> io::Result<()> {
    let mut meets: BTreeMap<(NaiveDate, String, Uuid), ()> = BTreeMap::new();
    let mut athletes: BTreeMap<(String, String, Uuid), String> = BTreeMap::new();
    let mut best: HashMap<(Uuid, Uuid), &ExportRow> = HashMap::new();

    for row in rows {
        meets.insert((row.meet_date, row.meet_name.clone(), row.meet_id), ());
        athletes.insert(
            (row.last_name.clone(), row.first_name.clone(), row.athlete_id),
            row.gender.clone(),
        );
        best.entry((row.athlete_id, row.meet_id))
            .and_modify(|current| {
                if row.time_seconds < current.time_seconds {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    let mut header = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "Gender".to_string(),
    ];
    for (date, name, _) in meets.keys() {
        header.push(format!("{} ({}) Time", name, date));
        header.push(format!("{} ({}) Pace", name, date));
    }
    write_row(w, &header)?;

    for ((last, first, athlete_id), gender) in &athletes {
        let mut line = vec![first.clone(), last.clone(), gender.clone()];
        for (_, _, meet_id) in meets.keys() {
            match best.get(&(*athlete_id, *meet_id)) {
                Some(result) => {
                    line.push(format_seconds(result.time_seconds));
                    line.push(
                        calculate_pace(result.time_seconds, &result.distance).unwrap_or_default(),
                    );
                }
                None => {
                    line.push(String::new());
                    line.push(String::new());
                }
            }
        }
        write_row(w, &line)?;
    }
    Ok(())
}
