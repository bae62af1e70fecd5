use crate::edges::EdgeOptions;
use crate::hough::HoughOptions;
use crate::pipeline::PipelineParams;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One variation rendered by `lane_tune`; unset fields keep the base values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SweepEntry {
    pub label: Option<String>,
    pub kernel_size: Option<u32>,
    pub low_threshold: Option<f32>,
    pub high_threshold: Option<f32>,
    pub rho: Option<f32>,
    pub theta_deg: Option<f32>,
    pub threshold: Option<u32>,
    pub min_line_length: Option<u32>,
    pub max_line_gap: Option<u32>,
}

impl SweepEntry {
    pub fn apply(&self, base: &PipelineParams) -> PipelineParams {
        let mut params = base.clone();
        let EdgeOptions {
            kernel_size,
            low_threshold,
            high_threshold,
        } = &mut params.edge;
        set(kernel_size, self.kernel_size);
        set(low_threshold, self.low_threshold);
        set(high_threshold, self.high_threshold);
        let HoughOptions {
            rho,
            theta_deg,
            threshold,
            min_line_length,
            max_line_gap,
            ..
        } = &mut params.hough;
        set(rho, self.rho);
        set(theta_deg, self.theta_deg);
        set(threshold, self.threshold);
        set(min_line_length, self.min_line_length);
        set(max_line_gap, self.max_line_gap);
        params
    }

    /// Label for file names: explicit, or `sweep<index>`.
    pub fn label_or(&self, index: usize) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("sweep{index}"))
    }
}

fn set<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn tuning_params() -> PipelineParams {
    PipelineParams::tuning()
}

/// Layer a partial `params` object over [`PipelineParams::tuning`]: fields the
/// file leaves out keep their tuning-preset values at every nesting level.
fn params_over_tuning<'de, D>(deserializer: D) -> Result<PipelineParams, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(PipelineParams::tuning()).map_err(D::Error::custom)?;
    merge_json(&mut merged, overrides);
    serde_json::from_value(merged).map_err(D::Error::custom)
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Configuration of `lane_tune`.
#[derive(Debug, Deserialize)]
pub struct TuneToolConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Partial overrides of the tuning preset.
    #[serde(default = "tuning_params", deserialize_with = "params_over_tuning")]
    pub params: PipelineParams,
    #[serde(default)]
    pub sweep: Vec<SweepEntry>,
}

pub fn load_config(path: &Path) -> Result<TuneToolConfig, String> {
    super::load_json(path)
}
