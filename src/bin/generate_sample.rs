//! Writes `sample_projects.csv` and `sample_projects.parquet` with the same
//! synthetic projects/publications, for trying out the dashboard.
//!
//! Usage: `generate_sample [OUT_DIR]`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

const TOPICS: [&str; 8] = [
    "Pulsar timing",
    "Solar wind turbulence",
    "Exoplanet transits",
    "Qubit decoherence",
    "Cosmic ray showers",
    "Neural nets for spectra",
    "Dark matter halos",
    "Gravitational lensing",
];
const KINDS: [&str; 3] = ["Publication", "Project", "Poster"];
const FIRST_YEAR: i32 = 2019;
const ROWS: usize = 24;

/// Minimal deterministic PRNG (xorshift64*).
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Entry {
    title: String,
    kind: &'static str,
    year: i64,
    citations: f64,
    submitted: NaiveDate,
}

fn generate(rng: &mut SimpleRng) -> Result<Vec<Entry>> {
    (0..ROWS)
        .map(|i| {
            let year = FIRST_YEAR + rng.below(6) as i32;
            let submitted = NaiveDate::from_yo_opt(year, 1 + rng.below(365) as u32)
                .with_context(|| format!("invalid day of year in {year}"))?;
            Ok(Entry {
                title: format!("{} #{}", TOPICS[i % TOPICS.len()], i / TOPICS.len() + 1),
                kind: KINDS[rng.below(KINDS.len() as u64) as usize],
                year: submitted.year() as i64,
                citations: (rng.below(400) as f64) / 4.0,
                submitted,
            })
        })
        .collect()
}

fn write_csv(path: &Path, entries: &[Entry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["Title", "Type", "Year", "Citations", "Submitted"])?;
    for e in entries {
        writer.write_record([
            e.title.clone(),
            e.kind.to_string(),
            e.year.to_string(),
            e.citations.to_string(),
            e.submitted.format("%Y-%m-%d").to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, entries: &[Entry]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("Title", DataType::Utf8, false),
        Field::new("Type", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Citations", DataType::Float64, false),
        Field::new("Submitted", DataType::Date32, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(entries.iter().map(|e| e.title.as_str()))),
            Arc::new(StringArray::from_iter_values(entries.iter().map(|e| e.kind))),
            Arc::new(Int64Array::from_iter_values(entries.iter().map(|e| e.year))),
            Arc::new(Float64Array::from_iter_values(entries.iter().map(|e| e.citations))),
            Arc::new(Date32Array::from_iter_values(
                entries
                    .iter()
                    .map(|e| (e.submitted - epoch).num_days() as i32),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let entries = generate(&mut SimpleRng(42))?;

    let csv_path = out_dir.join("sample_projects.csv");
    write_csv(&csv_path, &entries)?;
    let parquet_path = out_dir.join("sample_projects.parquet");
    write_parquet(&parquet_path, &entries)?;

    println!(
        "Wrote {} entries to {} and {}",
        entries.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
