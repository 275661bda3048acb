use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yolopost::lowlevel::TensorView;
use yolopost::{
    BoundingBox, Detector, DetectorConfig, LabelTable, Outcome, TensorGeometry, Thresholds,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "yolopost CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    /// Model input shape, rank 4.
    input_shape: Vec<usize>,
    /// Model output shape, rank 3.
    output_shape: Vec<usize>,
    /// Raw little-endian f32 dump of the output tensor.
    buffer_path: String,
    /// Label file, one class per line. Takes precedence over `labels`.
    labels_path: Option<String>,
    labels: Vec<String>,
    confidence_threshold: f32,
    iou_threshold: f32,
    parallel: bool,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            input_shape: Vec::new(),
            output_shape: Vec::new(),
            buffer_path: String::new(),
            labels_path: None,
            labels: Vec::new(),
            confidence_threshold: thresholds.confidence,
            iou_threshold: thresholds.iou,
            parallel: false,
            output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    class_index: usize,
    class_name: String,
    confidence: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl From<&BoundingBox> for DetectionRecord {
    fn from(value: &BoundingBox) -> Self {
        Self {
            class_index: value.class_index(),
            class_name: value.class_name().to_owned(),
            confidence: value.confidence(),
            x1: value.x1(),
            y1: value.y1(),
            x2: value.x2(),
            y2: value.y2(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detections: Vec<DetectionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_us: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    empty: bool,
}

impl From<&Outcome> for Output {
    fn from(value: &Outcome) -> Self {
        Self {
            detections: value.boxes().iter().map(DetectionRecord::from).collect(),
            elapsed_us: value.elapsed().map(|d| d.as_micros() as u64),
            empty: value.is_empty(),
        }
    }
}

fn decode_f32_le(bytes: &[u8]) -> Result<Vec<f32>, String> {
    if bytes.len() % 4 != 0 {
        return Err(format!("length {} is not a multiple of 4", bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Reads a raw output dump and checks it covers the whole tensor.
///
/// The per-frame path treats a short buffer as an empty frame; here a
/// mismatched dump is a setup mistake and is reported.
fn load_buffer(
    path: &str,
    geometry: &TensorGeometry,
) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let buffer = decode_f32_le(&bytes).map_err(|reason| format!("{path}: {reason}"))?;
    TensorView::new(&buffer, geometry).map_err(|err| format!("{path}: {err}"))?;
    Ok(buffer)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolopost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.buffer_path.is_empty() {
        return Err("buffer_path must be set in the config".into());
    }

    let geometry = TensorGeometry::from_shapes(&config.input_shape, &config.output_shape)?;
    let labels = match &config.labels_path {
        Some(path) => LabelTable::from_path(path)?,
        None => LabelTable::new(config.labels),
    };
    if labels.is_empty() {
        return Err("no labels: set labels_path or labels in the config".into());
    }
    if labels.len() != geometry.num_classes() {
        tracing::warn!(
            labels = labels.len(),
            classes = geometry.num_classes(),
            "label count differs from model class count"
        );
    }

    let detector = Detector::new(DetectorConfig {
        geometry,
        labels,
        thresholds: Thresholds::new(config.confidence_threshold, config.iou_threshold)?,
        parallel: config.parallel,
    })?;

    let buffer = load_buffer(&config.buffer_path, &geometry)?;
    tracing::info!(
        values = buffer.len(),
        channels = geometry.num_channel,
        candidates = geometry.num_elements,
        "loaded output tensor"
    );

    let outcome = detector.detect(&buffer);
    let json = serde_json::to_string_pretty(&Output::from(&outcome))?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_f32_le, load_buffer, Output};
    use yolopost::{detect, LabelTable, Outcome, TensorGeometry, Thresholds};

    fn write_dump(name: &str, values: &[f32]) -> String {
        let file = format!("yolopost-cli-{}-{name}.bin", std::process::id());
        let path = std::env::temp_dir().join(file);
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        std::fs::write(&path, bytes).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn ragged_byte_count_is_rejected() {
        assert!(decode_f32_le(&[0, 0, 128, 63]).is_ok());
        assert!(decode_f32_le(&[0, 0, 128]).is_err());
    }

    #[test]
    fn truncated_dump_is_an_error() {
        let geometry = TensorGeometry::new(640, 640, 5, 4);
        let path = write_dump("truncated", &[0.5; 12]);
        let err = load_buffer(&path, &geometry).unwrap_err();
        assert!(err.to_string().contains("buffer too small"), "{err}");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn full_dump_loads() {
        let geometry = TensorGeometry::new(640, 640, 5, 4);
        let path = write_dump("full", &[0.5; 20]);
        assert_eq!(load_buffer(&path, &geometry).unwrap().len(), 20);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn output_shape_depends_on_outcome() {
        let empty = serde_json::to_value(Output::from(&Outcome::Empty)).unwrap();
        assert_eq!(empty, serde_json::json!({ "detections": [], "empty": true }));

        let geometry = TensorGeometry::new(640, 640, 5, 1);
        let buffer = [0.5, 0.5, 0.2, 0.2, 0.9];
        let outcome = detect(
            &buffer,
            &geometry,
            &LabelTable::parse("person"),
            &Thresholds::default(),
        );
        let value = serde_json::to_value(Output::from(&outcome)).unwrap();
        assert!(value.get("empty").is_none());
        assert!(value["elapsed_us"].is_u64());
        assert_eq!(value["detections"][0]["class_name"], "person");
    }
}
