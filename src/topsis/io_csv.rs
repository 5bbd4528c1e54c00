// Primitives for reading and writing CSV tables.

use std::io::Read;

use crate::topsis::*;

pub fn read_csv_table(path: &str) -> TopsisResult<ParsedTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    read_table(rdr, path)
}

pub fn read_table<R: Read>(mut rdr: csv::Reader<R>, path: &str) -> TopsisResult<ParsedTable> {
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_table: headers: {:?}", headers);

    let mut rows: Vec<ParsedRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header row is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_table: {:?} {:?}", lineno, line);
        let id = line
            .get(0)
            .map(|s| s.to_string())
            .context(LineTooShortSnafu {
                lineno,
                expected: headers.len(),
                found: 0usize,
            })?;
        let cells: Vec<String> = line.iter().skip(1).map(|s| s.to_string()).collect();
        rows.push(ParsedRow { lineno, id, cells });
    }
    Ok(ParsedTable { headers, rows })
}

/// Renders the table as CSV text, header row first.
pub fn render_csv_table(table: &ParsedTable) -> TopsisResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(&table.headers).context(WritingCsvSnafu {})?;
    for row in table.rows.iter() {
        let mut record: Vec<&str> = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.id.as_str());
        record.extend(row.cells.iter().map(|s| s.as_str()));
        wtr.write_record(&record).context(WritingCsvSnafu {})?;
    }
    let bytes = match wtr.into_inner() {
        Ok(bytes) => bytes,
        Err(e) => whatever!("Could not flush the output table: {}", e),
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => whatever!("The rendered table is not valid UTF-8: {}", e),
    }
}
