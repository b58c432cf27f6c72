use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const N_PATIENTS: usize = 2000;
const CSV_PATH: &str = "sample_stroke_data.csv";
const PARQUET_PATH: &str = "sample_stroke_data.parquet";

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick from `(item, weight)` pairs.
    fn pick<'a>(&mut self, weighted: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for (item, w) in weighted {
            if roll < *w {
                return *item;
            }
            roll -= w;
        }
        weighted[weighted.len() - 1].0
    }
}

struct Patient {
    id: i64,
    gender: &'static str,
    age: f64,
    hypertension: i64,
    heart_disease: i64,
    ever_married: &'static str,
    work_type: &'static str,
    residence_type: &'static str,
    avg_glucose_level: f64,
    /// Text, because the public dataset spells missing BMI as `N/A`.
    bmi: String,
    smoking_status: &'static str,
    stroke: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Patient> {
    (0..N_PATIENTS)
        .map(|i| {
            let gender = rng.pick(&[("Female", 0.58), ("Male", 0.41), ("Other", 0.01)]);
            // Infants have fractional ages in the source data.
            let age = if rng.chance(0.05) {
                ((rng.next_f64() * 1.9 + 0.08) * 100.0).round() / 100.0
            } else {
                rng.gauss(45.0, 20.0).clamp(2.0, 82.0).round()
            };
            let hypertension = i64::from(rng.chance(age / 600.0));
            let heart_disease = i64::from(rng.chance(age / 1200.0));
            let ever_married = if age > 25.0 && rng.chance(0.8) { "Yes" } else { "No" };
            let work_type = if age < 16.0 {
                "children"
            } else {
                rng.pick(&[
                    ("Private", 0.57),
                    ("Self-employed", 0.16),
                    ("Govt_job", 0.13),
                    ("Never_worked", 0.01),
                ])
            };
            let residence_type = rng.pick(&[("Urban", 0.5), ("Rural", 0.5)]);
            let avg_glucose_level =
                (rng.gauss(106.0, 45.0).clamp(55.0, 272.0) * 100.0).round() / 100.0;
            let bmi = if rng.chance(0.04) {
                "N/A".to_string()
            } else {
                format!("{:.1}", rng.gauss(28.9, 7.8).clamp(10.3, 97.6))
            };
            let smoking_status = if age < 12.0 {
                "Unknown"
            } else {
                rng.pick(&[
                    ("never smoked", 0.37),
                    ("Unknown", 0.30),
                    ("formerly smoked", 0.17),
                    ("smokes", 0.16),
                ])
            };
            let risk = 0.002
                + 0.0009 * (age - 40.0).max(0.0)
                + 0.0004 * (avg_glucose_level - 120.0).max(0.0)
                + 0.03 * hypertension as f64
                + 0.04 * heart_disease as f64;
            let stroke = i64::from(rng.chance(risk));

            Patient {
                id: 10_000 + (i as i64) * 7,
                gender,
                age,
                hypertension,
                heart_disease,
                ever_married,
                work_type,
                residence_type,
                avg_glucose_level,
                bmi,
                smoking_status,
                stroke,
            }
        })
        .collect()
}

const HEADER: [&str; 12] = [
    "id",
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "ever_married",
    "work_type",
    "Residence_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
    "stroke",
];

fn write_csv(patients: &[Patient]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    writer.write_record(HEADER)?;
    for p in patients {
        writer.write_record([
            p.id.to_string(),
            p.gender.to_string(),
            p.age.to_string(),
            p.hypertension.to_string(),
            p.heart_disease.to_string(),
            p.ever_married.to_string(),
            p.work_type.to_string(),
            p.residence_type.to_string(),
            p.avg_glucose_level.to_string(),
            p.bmi.clone(),
            p.smoking_status.to_string(),
            p.stroke.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn to_batch(patients: &[Patient]) -> Result<RecordBatch> {
    let text = |f: fn(&Patient) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(patients.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Patient) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(patients.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Patient) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(patients.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("gender", DataType::Utf8, false),
        Field::new("age", DataType::Float64, false),
        Field::new("hypertension", DataType::Int64, false),
        Field::new("heart_disease", DataType::Int64, false),
        Field::new("ever_married", DataType::Utf8, false),
        Field::new("work_type", DataType::Utf8, false),
        Field::new("Residence_type", DataType::Utf8, false),
        Field::new("avg_glucose_level", DataType::Float64, false),
        Field::new("bmi", DataType::Utf8, false),
        Field::new("smoking_status", DataType::Utf8, false),
        Field::new("stroke", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            int(|p| p.id),
            text(|p| p.gender),
            float(|p| p.age),
            int(|p| p.hypertension),
            int(|p| p.heart_disease),
            text(|p| p.ever_married),
            text(|p| p.work_type),
            text(|p| p.residence_type),
            float(|p| p.avg_glucose_level),
            text(|p| p.bmi.as_str()),
            text(|p| p.smoking_status),
            int(|p| p.stroke),
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

fn write_parquet(batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let patients = generate(&mut rng);

    write_csv(&patients)?;
    let batch = to_batch(&patients)?;
    write_parquet(&batch)?;

    let strokes = patients.iter().filter(|p| p.stroke == 1).count();
    let missing_bmi = patients.iter().filter(|p| p.bmi == "N/A").count();
    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!(
        "Wrote {} patients ({strokes} strokes, {missing_bmi} without BMI) to {CSV_PATH} and {PARQUET_PATH}",
        patients.len()
    );
    Ok(())
}
