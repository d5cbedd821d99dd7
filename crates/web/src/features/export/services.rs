use storage::{
    Store,
    export::{write_meet_matrix_csv, write_results_csv},
};

use crate::error::WebResult;

/// One CSV line per result
pub async fn results_csv(store: &dyn Store) -> WebResult<Vec<u8>> {
    let rows = store.export_rows().await?;
    let mut out = Vec::new();
    write_results_csv(&mut out, &rows)?;
    Ok(out)
}

/// One CSV line per athlete, one Time and Pace column pair per meet
pub async fn meet_matrix_csv(store: &dyn Store) -> WebResult<Vec<u8>> {
    let rows = store.export_rows().await?;
    let mut out = Vec::new();
    write_meet_matrix_csv(&mut out, &rows)?;
    Ok(out)
}
