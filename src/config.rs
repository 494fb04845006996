use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use relief_field::ScaleFactors;
use serde::Deserialize;

/// Validated description of one conversion run. Built from CLI flags
/// (optionally seeded from a TOML file) and checked before the pipeline
/// starts.
#[derive(Clone, Debug)]
pub struct MeshJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scale: ScaleFactors,
    pub subsample: u32,
    pub workers: usize,
    pub audit: bool,
}

impl MeshJob {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.input.as_os_str().is_empty(), "input path is empty");
        ensure!(!self.output.as_os_str().is_empty(), "output path is empty");
        ensure!(
            self.subsample >= 1,
            "subsample must be at least 1, got {}",
            self.subsample
        );
        let s = self.scale;
        ensure!(
            s.x.is_finite() && s.y.is_finite() && s.z.is_finite(),
            "scale factors must be finite, got ({}, {}, {})",
            s.x,
            s.y,
            s.z
        );
        ensure!(
            s.x != 0.0 && s.y != 0.0,
            "x and y scale must be non-zero (negative values mirror the model)"
        );
        ensure!(s.z >= 0.0, "z scale must be non-negative, got {}", s.z);
        Ok(())
    }
}

/// Optional defaults from a TOML file; CLI flags win over these.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scale: Option<[f32; 3]>,
    pub subsample: Option<u32>,
    pub threads: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {path:?}"))?;
        toml::from_str(&text).with_context(|| format!("parsing config {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> MeshJob {
        MeshJob {
            input: PathBuf::from("in.tif"),
            output: PathBuf::from("out.stl"),
            scale: ScaleFactors::ONE,
            subsample: 1,
            workers: 2,
            audit: false,
        }
    }

    #[test]
    fn valid_job_passes() {
        job().validate().unwrap();
    }

    #[test]
    fn zero_subsample_is_rejected() {
        let mut j = job();
        j.subsample = 0;
        assert!(j.validate().is_err());
    }

    #[test]
    fn non_finite_scale_is_rejected() {
        let mut j = job();
        j.scale = ScaleFactors::new(f32::NAN, 1.0, 1.0);
        assert!(j.validate().is_err());
        j.scale = ScaleFactors::new(1.0, f32::INFINITY, 1.0);
        assert!(j.validate().is_err());
    }

    #[test]
    fn zero_xy_scale_is_rejected_but_zero_z_allowed() {
        let mut j = job();
        j.scale = ScaleFactors::new(0.0, 1.0, 1.0);
        assert!(j.validate().is_err());
        j.scale = ScaleFactors::new(1.0, 1.0, 0.0);
        j.validate().unwrap();
    }

    #[test]
    fn negative_z_scale_is_rejected() {
        let mut j = job();
        j.scale = ScaleFactors::new(1.0, 1.0, -1.0);
        assert!(j.validate().is_err());
    }

    #[test]
    fn empty_paths_are_rejected() {
        let mut j = job();
        j.input = PathBuf::new();
        assert!(j.validate().is_err());
    }

    #[test]
    fn file_config_parses_toml() {
        let cfg: FileConfig = toml::from_str(
            r#"
            scale = [-0.4, 0.4, 1.0]
            subsample = 2
            threads = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scale, Some([-0.4, 0.4, 1.0]));
        assert_eq!(cfg.subsample, Some(2));
        assert_eq!(cfg.threads, Some(4));
    }
}
