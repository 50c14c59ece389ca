use crate::error::{Error, Result};
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config of the `track_finder` tool.
///
/// ```json
/// {
///   "input": "slices.json",
///   "params": { "finder": { "min_points": 4 }, "merge": { "mode": "overlap" } },
///   "output": { "tracks_json": "out/tracks.json", "report_json": "out/report.json" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct TrackFinderToolConfig {
    /// Recorded slice stream (JSON array of slice records).
    pub input: PathBuf,
    #[serde(default)]
    pub params: PipelineParams,
    pub output: TrackFinderOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TrackFinderOutputConfig {
    pub tracks_json: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

/// Read, parse and validate a tool config.
pub fn load_config(path: &Path) -> Result<TrackFinderToolConfig> {
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: TrackFinderToolConfig =
        serde_json::from_str(&data).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
    config.params.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeMode;

    fn write(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("track_finder_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let path = write(
            "minimal.json",
            r#"{ "input": "in.json", "output": { "tracks_json": "tracks.json" } }"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("in.json"));
        assert!(config.output.report_json.is_none());
        assert_eq!(config.params.finder.min_points, 3);
        assert!(config.params.merge.enabled);
    }

    #[test]
    fn nested_params_override_defaults() {
        let path = write(
            "nested.json",
            r#"{
                "input": "in.json",
                "params": {
                    "finder": { "allow_multi_match": false, "refine": { "min_bin": 10 } },
                    "merge": { "mode": "overlap", "max_track_width": 5e4 },
                    "cuts": { "snr": { "enabled": true, "min_total": 12, "average_by": "bin" } }
                },
                "output": { "tracks_json": "t.json", "report_json": "r.json" }
            }"#,
        );
        let config = load_config(&path).unwrap();
        assert!(!config.params.finder.allow_multi_match);
        assert_eq!(config.params.finder.refine.min_bin, Some(10));
        assert_eq!(config.params.merge.mode, MergeMode::Overlap);
        assert_eq!(config.params.merge.max_track_width, 5.0e4);
        assert!(config.params.cuts.snr.enabled);
        assert_eq!(config.params.cuts.snr.min_total, 12.0);
    }

    #[test]
    fn out_of_range_values_fail_to_load() {
        let path = write(
            "bad.json",
            r#"{ "input": "in.json",
                 "params": { "finder": { "time_gap_tolerance": -1 } },
                 "output": { "tracks_json": "t.json" } }"#,
        );
        let err = load_config(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "time_gap_tolerance",
                ..
            }
        ));
    }

    #[test]
    fn unknown_merge_mode_is_a_parse_error() {
        let path = write(
            "mode.json",
            r#"{ "input": "in.json",
                 "params": { "merge": { "mode": "cluster" } },
                 "output": { "tracks_json": "t.json" } }"#,
        );
        assert!(matches!(load_config(&path), Err(Error::Json { .. })));
    }
}
