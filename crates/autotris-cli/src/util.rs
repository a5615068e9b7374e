use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use autotris_search::HeuristicWeights;
use serde::Serialize;

/// Writes `value` as pretty JSON to `output_path`, or to stdout when no path
/// is given.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value, &path.display().to_string())
        }
        None => write_json(io::stdout().lock(), value, "stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T, target: &str) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write JSON to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads heuristic weights from a JSON file, or returns the defaults when no
/// path is given.
///
/// Fields missing from the file keep their default values.
pub fn read_weights_file<P>(path: Option<P>) -> anyhow::Result<HeuristicWeights>
where
    P: AsRef<Path>,
{
    let Some(path) = path else {
        return Ok(HeuristicWeights::default());
    };
    let weights: HeuristicWeights = read_json_file("weights", &path)?;
    log::info!("loaded weights from {}: {weights:?}", path.as_ref().display());
    Ok(weights)
}
