use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

/// Daily screen time above this many hours exceeds the recommendation.
const RECOMMENDED_LIMIT_HRS: f64 = 2.0;

/// Every n-th row has no reported screen time.
const MISSING_EVERY: usize = 37;

const GENDERS: [&str; 2] = ["Male", "Female"];
const DEVICES: [&str; 4] = ["Smartphone", "TV", "Laptop", "Tablet"];
const SETTINGS: [&str; 2] = ["Urban", "Rural"];

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

    fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }
}

/// One synthetic survey response.
struct Child {
    age: i64,
    gender: &'static str,
    screen_time: Option<f64>,
    device: &'static str,
    exceeded_limit: bool,
    educational_ratio: f64,
    sleep_hours: f64,
    setting: &'static str,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Child> {
    (0..rows)
        .map(|i| {
            let age = 8 + (rng.next_u64() % 11) as i64;
            let hours = round2((1.5 + 0.3 * (age - 8) as f64 + rng.gauss(0.0, 0.8)).max(0.3));
            let sleep_hours = round2((10.0 - 0.35 * hours + rng.gauss(0.0, 0.5)).clamp(5.0, 11.0));
            let educational_ratio = round2((0.6 - 0.03 * (age - 8) as f64 + rng.gauss(0.0, 0.1)).max(0.05));
            Child {
                age,
                gender: rng.pick(&GENDERS),
                screen_time: (i % MISSING_EVERY != MISSING_EVERY - 1).then_some(hours),
                device: rng.pick(&DEVICES),
                exceeded_limit: hours > RECOMMENDED_LIMIT_HRS,
                educational_ratio,
                sleep_hours,
                setting: rng.pick(&SETTINGS),
            }
        })
        .collect()
}

const HEADER: [&str; 8] = [
    "Age",
    "Gender",
    "Avg_Daily_Screen_Time",
    "Primary_Device",
    "Exceeded_Recommended_Limit",
    "Educational_to_Recreational_Ratio",
    "Sleep_Hours",
    "Urban_or_Rural",
];

fn write_csv(path: &Path, children: &[Child]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for c in children {
        writer.write_record([
            c.age.to_string(),
            c.gender.to_string(),
            c.screen_time.map(|v| v.to_string()).unwrap_or_default(),
            c.device.to_string(),
            if c.exceeded_limit { "True" } else { "False" }.to_string(),
            c.educational_ratio.to_string(),
            c.sleep_hours.to_string(),
            c.setting.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_batch(children: &[Child]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADER[0], DataType::Int64, false),
        Field::new(HEADER[1], DataType::Utf8, false),
        Field::new(HEADER[2], DataType::Float64, true),
        Field::new(HEADER[3], DataType::Utf8, false),
        Field::new(HEADER[4], DataType::Boolean, false),
        Field::new(HEADER[5], DataType::Float64, false),
        Field::new(HEADER[6], DataType::Float64, false),
        Field::new(HEADER[7], DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(children.iter().map(|c| c.age))),
            Arc::new(StringArray::from_iter_values(children.iter().map(|c| c.gender))),
            Arc::new(Float64Array::from_iter(children.iter().map(|c| c.screen_time))),
            Arc::new(StringArray::from_iter_values(children.iter().map(|c| c.device))),
            Arc::new(BooleanArray::from(
                children.iter().map(|c| c.exceeded_limit).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from_iter_values(
                children.iter().map(|c| c.educational_ratio),
            )),
            Arc::new(Float64Array::from_iter_values(children.iter().map(|c| c.sleep_hours))),
            Arc::new(StringArray::from_iter_values(children.iter().map(|c| c.setting))),
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Usage: `generate_sample [rows] [out-dir]`
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 500,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let mut rng = SimpleRng::new(2025);
    let children = generate(rows, &mut rng);

    let csv_path = out_dir.join("screentime_sample.csv");
    write_csv(&csv_path, &children)?;
    log::info!("Wrote {rows} records to {}", csv_path.display());

    let batch = to_batch(&children)?;
    let parquet_path = out_dir.join("screentime_sample.parquet");
    write_parquet(&parquet_path, &batch)?;
    log::info!("Wrote {rows} records to {}", parquet_path.display());

    let preview = batch.slice(0, rows.min(5));
    println!("{}", pretty_format_batches(&[preview]).context("formatting preview")?);
    Ok(())
}
