use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "District Name")]
    district: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Indicator")]
    indicator: String,
    #[serde(rename = "NFHS 4")]
    nfhs4: f64,
    #[serde(rename = "NFHS 5")]
    nfhs5: f64,
    #[serde(rename = "Change")]
    change: f64,
}

const DISTRICTS: [(&str, &[&str]); 4] = [
    ("Bihar", &["Gaya", "Muzaffarpur", "Patna"]),
    ("Kerala", &["Ernakulam", "Wayanad"]),
    ("Maharashtra", &["Aurangabad", "Nagpur", "Pune"]),
    ("Odisha", &["Cuttack", "Khordha"]),
];

const INDICATORS: [(&str, &[&str]); 3] = [
    (
        "Nutrition",
        &["Stunting", "Wasting", "Underweight", "Severely wasted", "Overweight"],
    ),
    (
        "Health",
        &["Anaemia among women", "Anaemia among children", "Full immunization"],
    ),
    (
        "Sanitation",
        &["Improved drinking water", "Improved sanitation", "Clean cooking fuel"],
    ),
];

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for (state, districts) in DISTRICTS {
        for district in districts {
            for (category, indicators) in INDICATORS {
                for indicator in indicators {
                    let nfhs4 = round1(rng.uniform(5.0, 90.0));
                    let nfhs5 = round1((nfhs4 + rng.uniform(-12.0, 12.0)).clamp(0.0, 100.0));
                    rows.push(SampleRow {
                        state: state.to_string(),
                        district: district.to_string(),
                        category: category.to_string(),
                        indicator: indicator.to_string(),
                        nfhs4,
                        nfhs5,
                        change: round1(nfhs5 - nfhs4),
                    });
                }
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let text = |f: fn(&SampleRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&SampleRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("State", DataType::Utf8, false),
        Field::new("District Name", DataType::Utf8, false),
        Field::new("Category", DataType::Utf8, false),
        Field::new("Indicator", DataType::Utf8, false),
        Field::new("NFHS 4", DataType::Float64, false),
        Field::new("NFHS 5", DataType::Float64, false),
        Field::new("Change", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| &r.state),
            text(|r| &r.district),
            text(|r| &r.category),
            text(|r| &r.indicator),
            number(|r| r.nfhs4),
            number(|r| r.nfhs5),
            number(|r| r.change),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "India_Change.csv".to_string());
    let output_path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(output_path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(output_path, &rows)?,
        other => bail!("Unsupported output extension: {other:?}"),
    }

    println!("Wrote {} rows to {output}", rows.len());
    Ok(())
}
