use crate::error::{Result, ScatterError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// One raw row; cells are positionally aligned to [`Table::columns`].
pub type Row = Vec<String>;

/// Column metadata as supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub index: usize,
    /// Aggregation label chosen in the host ("sum", "count", ...)
    #[serde(rename = "aggr", default)]
    pub aggregation: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from bare header names, indexing columns in order
    pub fn from_headers(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(index, name)| ColumnMeta {
                name,
                index,
                aggregation: String::new(),
            })
            .collect();
        Self { columns, rows }
    }

    /// Look up a column position by display name (exact match first, then
    /// case-insensitive)
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
            .map(|c| c.index)
            .ok_or_else(|| ScatterError::UnknownColumn(name.to_string()))
    }

    pub fn column(&self, index: usize) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.index == index)
    }

    /// Parse the host's table payload:
    /// `{ "columns": [{"name", "index", "aggr"}], "rows": [[...]], "comment": "" }`
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ScatterError::InvalidTable("table data must be a JSON object".into()))?;

        let columns: Vec<ColumnMeta> = match obj.get("columns") {
            Some(cols) => serde_json::from_value(cols.clone())?,
            None => return Err(ScatterError::InvalidTable("missing 'columns'".into())),
        };

        let raw_rows = obj
            .get("rows")
            .and_then(Value::as_array)
            .ok_or_else(|| ScatterError::InvalidTable("missing 'rows' array".into()))?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (i, raw) in raw_rows.iter().enumerate() {
            let cells = raw
                .as_array()
                .ok_or_else(|| ScatterError::InvalidTable(format!("row {} is not an array", i)))?;

            let mut row = Vec::with_capacity(cells.len());
            for cell in cells {
                let text = match cell {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => String::new(),
                    _ => {
                        return Err(ScatterError::InvalidTable(format!(
                            "unsupported cell value in row {}",
                            i
                        )))
                    }
                };
                row.push(text);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Read delimited text (CSV, TSV, ...) whose first record is the header
    pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(ScatterError::InvalidTable("no header row".into()));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::from_headers(headers, rows))
    }
}
