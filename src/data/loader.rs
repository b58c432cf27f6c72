use std::path::Path;

use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    CoercionReport, Numeric, Outcome, PatientRecord, PatientTable, REQUIRED_COLUMNS,
};
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the patient table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`           – comma-delimited with a header row
/// * `.tsv` / `.tab`  – tab-delimited with a header row
/// * `.json`          – `[{ "id": 9046, "gender": "Male", ... }, ...]`
/// * `.parquet`       – flat columns, numeric columns may be text
pub fn load_file(path: &Path) -> Result<PatientTable> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} patients from {} with columns {:?}",
        table.len(),
        path.display(),
        table.columns
    );
    log::info!(
        "Observed genders {:?}, smoking statuses {:?}, ages {:?}",
        table.genders,
        table.smoking_statuses,
        table.age_bounds
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the required columns within the source header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    gender: usize,
    age: usize,
    avg_glucose_level: usize,
    bmi: usize,
    smoking_status: usize,
    stroke: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&c| find(c).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnIndex {
            id: at("id"),
            gender: at("gender"),
            age: at("age"),
            avg_glucose_level: at("avg_glucose_level"),
            bmi: at("bmi"),
            smoking_status: at("smoking_status"),
            stroke: at("stroke"),
        })
    }
}

/// Turns rows of display text into typed records, noting every coercion.
struct RecordAssembler {
    columns: Vec<String>,
    index: ColumnIndex,
    records: Vec<PatientRecord>,
    report: CoercionReport,
}

impl RecordAssembler {
    fn new(columns: Vec<String>) -> Result<Self> {
        let index = ColumnIndex::locate(&columns)?;
        Ok(RecordAssembler {
            columns,
            index,
            records: Vec::new(),
            report: CoercionReport::default(),
        })
    }

    fn push(&mut self, row_no: usize, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());

        let ix = self.index;
        let age = self.numeric(row_no, "age", &cells[ix.age]);
        let avg_glucose_level =
            self.numeric(row_no, "avg_glucose_level", &cells[ix.avg_glucose_level]);
        let bmi = self.numeric(row_no, "bmi", &cells[ix.bmi]);

        let stroke = Outcome::parse(&cells[ix.stroke]);
        if stroke.is_none() {
            log::debug!(
                "row {row_no}: stroke value {:?} is not 0/1, outcome unknown",
                cells[ix.stroke]
            );
            self.report.record("stroke", &cells[ix.stroke]);
        }

        self.records.push(PatientRecord {
            id: cells[ix.id].clone(),
            gender: cells[ix.gender].clone(),
            age,
            avg_glucose_level,
            bmi,
            smoking_status: cells[ix.smoking_status].clone(),
            stroke,
            cells,
        });
    }

    fn numeric(&mut self, row_no: usize, column: &str, raw: &str) -> Numeric {
        let value = Numeric::parse(raw);
        if value.is_missing() {
            log::debug!("row {row_no}: {column} value {raw:?} is not numeric, treating as missing");
            self.report.record(column, raw);
        }
        value
    }

    fn finish(self) -> PatientTable {
        for (column, c) in &self.report.columns {
            log::warn!(
                "{column}: {} value(s) could not be read and are treated as missing (e.g. {:?})",
                c.missing,
                c.samples
            );
        }
        PatientTable::from_records(self.columns, self.records, self.report)
    }
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row with column names, one patient per line. Short rows are padded
/// with empty cells, which the numeric columns then treat as missing.
fn load_delimited(path: &Path, delimiter: u8) -> Result<PatientTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    // Undecodable bytes become U+FFFD; numeric cells holding them fall out
    // as missing instead of aborting the load.
    let decode = |cell: &[u8]| String::from_utf8_lossy(cell).into_owned();

    let headers: Vec<String> = reader.byte_headers()?.iter().map(decode).collect();
    let mut assembler = RecordAssembler::new(headers)?;

    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result?;
        assembler.push(row_no, record.iter().map(decode).collect());
    }

    Ok(assembler.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Column order is the order keys are first seen.
fn load_json(path: &Path) -> Result<PatientTable> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut columns: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut assembler = RecordAssembler::new(columns.clone())?;
    for (row_no, row) in rows.iter().enumerate() {
        let cells = columns
            .iter()
            .map(|col| row.get(col).map(json_cell_text).unwrap_or_default())
            .collect();
        assembler.push(row_no, cells);
    }

    Ok(assembler.finish())
}

fn json_cell_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per source column.
///
/// Numeric columns may be stored as text (e.g. a `bmi` column holding
/// `"N/A"`), integers or floats; nulls become empty cells.
fn load_parquet(path: &Path) -> Result<PatientTable> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let mut assembler = RecordAssembler::new(columns)?;
    let reader = builder.build()?;

    let mut row_no = 0;
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        Ok(String::new())
                    } else {
                        array_value_to_string(col.as_ref(), row)
                    }
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            assembler.push(row_no, cells);
            row_no += 1;
        }
    }

    Ok(assembler.finish())
}
