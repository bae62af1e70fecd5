use crate::batch::BatchOptions;
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of `lane_batch`.
#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub params: PipelineParams,
    #[serde(default)]
    pub options: BatchOptions,
    /// Where to write the JSON summary, if anywhere.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<BatchToolConfig, String> {
    super::load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_still_image_params() {
        let cfg: BatchToolConfig = serde_json::from_str(
            r#"{ "input_dir": "test_images", "output_dir": "test_images_output/" }"#,
        )
        .unwrap();
        assert_eq!(cfg.params, PipelineParams::still_images());
        assert!(!cfg.options.parallel);
        assert!(cfg.report_json.is_none());
    }
}
