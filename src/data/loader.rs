use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{
    CellValue, Dataset, Record, COL_CATEGORY, COL_CHANGE, COL_DISTRICT, COL_INDICATOR,
    COL_NFHS4, COL_NFHS5, COL_STATE, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row naming the survey columns
/// * `.json`         – `[{ "State": ..., "NFHS 4": ..., ... }, ...]`
/// * `.parquet`      – flat table with the same column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn require_columns(available: &[&str]) -> Result<()> {
    for col in REQUIRED_COLUMNS {
        if !available.iter().any(|h| h.trim() == col) {
            bail!("missing required column '{col}'");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row, matched to the header by name. Numeric columns are taken as
/// raw text and typed afterwards so mixed-type columns never fail the load.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "District Name", default)]
    district: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Indicator", default)]
    indicator: String,
    #[serde(rename = "NFHS 4", default)]
    nfhs4: String,
    #[serde(rename = "NFHS 5", default)]
    nfhs5: String,
    #[serde(rename = "Change", default)]
    change: String,
}

impl From<CsvRow> for Record {
    fn from(row: CsvRow) -> Self {
        Record {
            state: row.state,
            district: row.district,
            category: row.category,
            indicator: row.indicator,
            nfhs4: CellValue::infer(row.nfhs4.trim()),
            nfhs5: CellValue::infer(row.nfhs5.trim()),
            change: CellValue::infer(row.change.trim()),
        }
    }
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?;
    require_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(Record::from(row));
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "State": "Bihar", "District Name": "Patna", "Category": "Nutrition",
///     "Indicator": "Stunting", "NFHS 4": 48.3, "NFHS 5": 42.9, "Change": -5.4 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    if rows.is_empty() {
        bail!("JSON array has no records, so no columns");
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        require_columns(&obj.keys().map(String::as_str).collect::<Vec<_>>())
            .with_context(|| format!("Row {i}"))?;
        let cell = |col: &str| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null);

        records.push(Record {
            state: cell(COL_STATE).into_text(),
            district: cell(COL_DISTRICT).into_text(),
            category: cell(COL_CATEGORY).into_text(),
            indicator: cell(COL_INDICATOR).into_text(),
            nfhs4: cell(COL_NFHS4),
            nfhs5: cell(COL_NFHS5),
            change: cell(COL_CHANGE),
        });
    }

    Ok(Dataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the survey table.
///
/// Key columns are cast to Utf8 whatever their stored type (plain, large,
/// view or dictionary-encoded strings, numbers). Value columns keep integers
/// as integers, other numerics become Float64, and anything else is cast to
/// Utf8 so it is coerced later like a CSV cell. A column arrow cannot cast
/// fails the load. Other columns are skipped.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let names: Vec<&str> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    require_columns(&names)?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let state = text_column(&batch, COL_STATE)?;
        let district = text_column(&batch, COL_DISTRICT)?;
        let category = text_column(&batch, COL_CATEGORY)?;
        let indicator = text_column(&batch, COL_INDICATOR)?;
        let nfhs4 = value_column(&batch, COL_NFHS4)?;
        let nfhs5 = value_column(&batch, COL_NFHS5)?;
        let change = value_column(&batch, COL_CHANGE)?;

        for row in 0..batch.num_rows() {
            records.push(Record {
                state: text_at(&state, row),
                district: text_at(&district, row),
                category: text_at(&category, row),
                indicator: text_at(&indicator, row),
                nfhs4: nfhs4.cell(row),
                nfhs5: nfhs5.cell(row),
                change: change.cell(row),
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// A value column normalised to one of three concrete arrays.
enum ValueColumn {
    Integer(Int64Array),
    Float(Float64Array),
    Text(StringArray),
}

impl ValueColumn {
    fn cell(&self, row: usize) -> CellValue {
        match self {
            ValueColumn::Integer(arr) if arr.is_valid(row) => CellValue::Integer(arr.value(row)),
            ValueColumn::Float(arr) if arr.is_valid(row) => CellValue::Float(arr.value(row)),
            ValueColumn::Text(arr) if arr.is_valid(row) => CellValue::infer(arr.value(row).trim()),
            _ => CellValue::Null,
        }
    }
}

fn named_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet batch missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Cast `name` to `to`, failing on types arrow cannot convert.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = named_column(batch, name)?;
    cast(col, to).with_context(|| {
        format!("column '{name}' of type {} cannot be read as {to}", col.data_type())
    })
}

fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let converted = cast_column(batch, name, &DataType::Utf8)?;
    converted
        .as_string_opt::<i32>()
        .cloned()
        .with_context(|| format!("column '{name}' did not cast to Utf8"))
}

fn value_column(batch: &RecordBatch, name: &str) -> Result<ValueColumn> {
    let stored = named_column(batch, name)?.data_type().clone();
    if stored.is_integer() {
        let converted = cast_column(batch, name, &DataType::Int64)?;
        let arr = converted
            .as_primitive_opt::<Int64Type>()
            .cloned()
            .with_context(|| format!("column '{name}' did not cast to Int64"))?;
        Ok(ValueColumn::Integer(arr))
    } else if stored.is_numeric() {
        let converted = cast_column(batch, name, &DataType::Float64)?;
        let arr = converted
            .as_primitive_opt::<Float64Type>()
            .cloned()
            .with_context(|| format!("column '{name}' did not cast to Float64"))?;
        Ok(ValueColumn::Float(arr))
    } else {
        Ok(ValueColumn::Text(text_column(batch, name)?))
    }
}

fn text_at(col: &StringArray, row: usize) -> String {
    if col.is_valid(row) {
        col.value(row).to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    use arrow::array::{DictionaryArray, Float32Array, Int16Array};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    const HEADER: &str = "State,District Name,Category,Indicator,NFHS 4,NFHS 5,Change";

    #[test]
    fn csv_reads_rows_in_order_and_ignores_extra_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("India_Change.csv");
        fs::write(
            &path,
            format!(
                "{HEADER},Source\n\
                 Bihar,Patna,Nutrition,Stunting,48.3,42.9,-5.4,survey\n\
                 Bihar,Gaya,Nutrition,Wasting,20,NA,,survey\n"
            ),
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.district, "Patna");
        assert_eq!(first.nfhs4, CellValue::Float(48.3));
        assert_eq!(first.change, CellValue::Float(-5.4));

        let second = &ds.records()[1];
        assert_eq!(second.nfhs4, CellValue::Integer(20));
        assert_eq!(second.nfhs5, CellValue::Text("NA".into()));
        assert_eq!(second.change, CellValue::Null);
    }

    #[test]
    fn csv_tolerates_short_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, format!("{HEADER}\nKerala,Wayanad,Health,Anaemia,30.1\n")).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].nfhs5, CellValue::Null);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "State,District Name,Category,Indicator,NFHS 4,NFHS 5\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("'Change'"));
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        fs::write(
            &path,
            format!("{}\nGoa\tNorth Goa\tHealth\tAnaemia\t1\t2\t1\n", HEADER.replace(',', "\t")),
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].district, "North Goa");
    }

    #[test]
    fn json_keeps_numeric_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[{"State":"Bihar","District Name":"Patna","Category":"Nutrition",
                 "Indicator":"Stunting","NFHS 4":48.3,"NFHS 5":"42.9","Change":null}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.nfhs4, CellValue::Float(48.3));
        assert_eq!(rec.nfhs5, CellValue::Text("42.9".into()));
        assert_eq!(rec.change, CellValue::Null);
    }

    #[test]
    fn json_empty_array_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();

        assert!(load_file(&path).is_err());
    }

    #[test]
    fn json_later_row_missing_column_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.json");
        fs::write(
            &path,
            r#"[{"State":"Bihar","District Name":"Patna","Category":"Nutrition",
                 "Indicator":"Stunting","NFHS 4":48.3,"NFHS 5":42.9,"Change":-5.4},
                {"State":"Bihar","District Name":"Gaya","Category":"Nutrition",
                 "NFHS 4":20.0,"NFHS 5":18.0,"Change":-2.0}]"#,
        )
        .unwrap();

        let err = load_file(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "{msg}");
        assert!(msg.contains("'Indicator'"), "{msg}");
    }

    fn write_parquet(path: &Path, schema: Arc<Schema>, columns: Vec<ArrayRef>) {
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let file = fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn parquet_casts_dictionary_keys_and_narrow_numbers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.parquet");

        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_STATE, dict, true),
            text(COL_DISTRICT),
            text(COL_CATEGORY),
            text(COL_INDICATOR),
            Field::new(COL_NFHS4, DataType::Int16, true),
            Field::new(COL_NFHS5, DataType::Float32, true),
            text(COL_CHANGE),
        ]));
        let states: DictionaryArray<Int32Type> = vec!["Bihar", "Bihar"].into_iter().collect();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(states),
            Arc::new(StringArray::from(vec!["Patna", "Gaya"])),
            Arc::new(StringArray::from(vec!["Nutrition", "Nutrition"])),
            Arc::new(StringArray::from(vec!["Stunting", "Wasting"])),
            Arc::new(Int16Array::from(vec![48, 20])),
            Arc::new(Float32Array::from(vec![42.5, 17.0])),
            Arc::new(StringArray::from(vec!["-5.5", "NA"])),
        ];
        write_parquet(&path, schema, columns);

        let ds = load_file(&path).unwrap();
        let first = &ds.records()[0];
        assert_eq!(first.state, "Bihar");
        assert_eq!(first.nfhs4, CellValue::Integer(48));
        assert_eq!(first.nfhs5, CellValue::Float(42.5));
        assert_eq!(first.change, CellValue::Float(-5.5));
        assert_eq!(ds.records()[1].state, "Bihar");
        assert_eq!(ds.records()[1].change, CellValue::Text("NA".into()));
    }

    #[test]
    fn parquet_reads_mixed_column_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.parquet");

        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let schema = Arc::new(Schema::new(vec![
            text(COL_STATE),
            text(COL_DISTRICT),
            text(COL_CATEGORY),
            text(COL_INDICATOR),
            Field::new(COL_NFHS4, DataType::Float64, true),
            Field::new(COL_NFHS5, DataType::Int64, true),
            Field::new(COL_CHANGE, DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Bihar", "Bihar"])),
            Arc::new(StringArray::from(vec!["Patna", "Gaya"])),
            Arc::new(StringArray::from(vec!["Nutrition", "Nutrition"])),
            Arc::new(StringArray::from(vec!["Stunting", "Wasting"])),
            Arc::new(Float64Array::from(vec![Some(48.3), Some(20.0)])),
            Arc::new(Int64Array::from(vec![Some(43), None])),
            Arc::new(Float64Array::from(vec![Some(-5.3), None])),
        ];
        write_parquet(&path, schema, columns);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].nfhs5, CellValue::Integer(43));
        assert_eq!(ds.records()[1].nfhs5, CellValue::Null);
        assert_eq!(ds.records()[1].indicator, "Wasting");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("survey.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
