// Reading tables from Excel workbooks.

use calamine::{open_workbook, Reader, Xlsx};

use crate::topsis::*;

pub fn read_xlsx_table(path: &str, worksheet_name: Option<&str>) -> TopsisResult<ParsedTable> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    }
    .context(EmptyExcelSnafu { path })?
    .context(OpeningExcelSnafu { path })?;

    let mut rows_iter = wrange.rows();
    let header_row = rows_iter.next().context(EmptyExcelSnafu { path })?;
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();
    debug!("read_xlsx_table: headers: {:?}", headers);

    let mut rows: Vec<ParsedRow> = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        // The header row is line 1.
        let lineno = idx + 2;
        debug!("read_xlsx_table: {:?} {:?}", lineno, row);
        let mut cells: Vec<String> = Vec::with_capacity(row.len());
        for (j, cell) in row.iter().enumerate() {
            let text = match cell {
                calamine::DataType::String(s) => s.trim().to_string(),
                calamine::DataType::Float(x) => format!("{}", x),
                calamine::DataType::Int(i) => format!("{}", i),
                calamine::DataType::Empty => String::new(),
                other => {
                    return ExcelWrongCellTypeSnafu {
                        lineno,
                        column: headers.get(j).cloned().unwrap_or_else(|| j.to_string()),
                        content: format!("{:?}", other),
                    }
                    .fail()
                }
            };
            cells.push(text);
        }
        ensure!(
            !cells.is_empty(),
            LineTooShortSnafu {
                lineno,
                expected: headers.len(),
                found: 0usize,
            }
        );
        let id = cells.remove(0);
        rows.push(ParsedRow { lineno, id, cells });
    }
    Ok(ParsedTable { headers, rows })
}

fn cell_text(cell: &calamine::DataType) -> String {
    match cell {
        calamine::DataType::String(s) => s.trim().to_string(),
        calamine::DataType::Float(x) => format!("{}", x),
        calamine::DataType::Int(i) => format!("{}", i),
        _ => String::new(),
    }
}
