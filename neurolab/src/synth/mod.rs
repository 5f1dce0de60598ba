//! 合成“笑脸”4D体数据，用于演示切片时间效应。
//!
//! 流程：按调制值生成真实序列与上采样序列，再按切片采集顺序表从上采样序列中重采样出“采集到的”序列。

pub mod consts;
pub mod nii;
pub mod preview;
pub mod resample;
pub mod schedule;
pub mod series;
pub mod smiley;

pub use nii::{check_shape, read_series, write_npy, write_series, VoxelType};
pub use resample::{resample, SLICE_AXIS};
pub use schedule::SliceSchedule;
pub use series::{CropWindow, ModulationRange, SeriesConfig, TIME_AXIS};
pub use smiley::SmileyGeometry;

use crate::error::Result;
use consts::{ACQUIRED_FILE, GROUND_TRUTH_FILE, UPSAMPLED_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// 输出选项。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub voxel: VoxelType,
    /// 是否同时写出同名的npy文件。
    pub npy: bool,
}

/// 写出的三个文件。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub ground_truth: PathBuf,
    pub upsampled: PathBuf,
    pub acquired: PathBuf,
}

impl Artifacts {
    fn in_dir(dir: &Path) -> Self {
        Self {
            ground_truth: dir.join(GROUND_TRUTH_FILE),
            upsampled: dir.join(UPSAMPLED_FILE),
            acquired: dir.join(ACQUIRED_FILE),
        }
    }

    #[inline]
    pub fn paths(&self) -> [&Path; 3] {
        [&self.ground_truth, &self.upsampled, &self.acquired]
    }
}

fn persist(path: &Path, series: &ndarray::Array4<f32>, opts: OutputOptions) -> Result<()> {
    write_series(path, series, opts.voxel)?;
    if opts.npy {
        write_npy(path.with_extension("npy"), series)?;
    }
    Ok(())
}

/// 生成真实序列、上采样序列与采集序列，依次写入`out_dir`（不存在时创建）。
pub fn generate_all(
    out_dir: &Path,
    config: &SeriesConfig,
    schedule: &SliceSchedule,
    opts: OutputOptions,
) -> Result<Artifacts> {
    // 在生成任何数据之前先检查顺序表
    schedule.validate(config.n_slices())?;
    fs::create_dir_all(out_dir)?;
    let artifacts = Artifacts::in_dir(out_dir);
    let frames = config.modulation.frames();
    let groups = schedule.n_groups();
    let (a, b, c) = config.frame_shape();

    tracing::info!(frames, groups, "generating ground truth series");
    let ground_truth = config.ground_truth()?;
    check_shape(&[a, b, c, frames], ground_truth.shape())?;
    persist(&artifacts.ground_truth, &ground_truth, opts)?;

    tracing::info!(frames = frames * groups, "generating upsampled series");
    let upsampled = config.upsampled(groups)?;
    check_shape(&[a, b, c, frames * groups], upsampled.shape())?;
    persist(&artifacts.upsampled, &upsampled, opts)?;

    tracing::info!("resampling according to the slice schedule");
    let acquired = resample(upsampled.view(), schedule, frames)?;
    check_shape(ground_truth.shape(), acquired.shape())?;
    persist(&artifacts.acquired, &acquired, opts)?;

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn small_config() -> SeriesConfig {
        SeriesConfig {
            geometry: SmileyGeometry {
                size: 20,
                eye_radius: 2,
                eyes: [(5, 6, 10), (5, 14, 10)],
                mouth_center_x: 14,
                mouth_inner_radius: 3,
                mouth_outer_radius: 5,
                mouth_z: 10,
                ..SmileyGeometry::default()
            },
            crop: CropWindow {
                x: 0..20,
                y: 0..18,
                z: 6..14,
            },
            modulation: ModulationRange::new(0.0, 30.0, 10.0).unwrap(),
        }
    }

    #[test]
    fn test_generate_all_writes_three_volumes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("smileys");
        let cfg = small_config();
        let sch = SliceSchedule::sequential(18, 3).unwrap();
        let opts = OutputOptions {
            voxel: VoxelType::F32,
            npy: true,
        };
        let artifacts = generate_all(&out, &cfg, &sch, opts).unwrap();
        assert_eq!(artifacts.ground_truth.file_name().unwrap(), GROUND_TRUTH_FILE);
        for p in artifacts.paths() {
            assert!(p.is_file());
            assert!(p.with_extension("npy").is_file());
        }
        let gt = read_series(&artifacts.ground_truth).unwrap();
        let up = read_series(&artifacts.upsampled).unwrap();
        let acq = read_series(&artifacts.acquired).unwrap();
        assert_eq!(gt.shape(), &[20, 18, 8, 4]);
        assert_eq!(up.shape(), &[20, 18, 8, 12]);
        assert_eq!(acq.shape(), gt.shape());
        assert_eq!(acq, resample(up.view(), &sch, 4).unwrap());
    }

    #[test]
    fn test_malformed_schedule_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sch = SliceSchedule::sequential(99, 11).unwrap();
        let err = generate_all(&out, &small_config(), &sch, OutputOptions::default());
        assert!(matches!(err, Err(Error::MalformedSchedule(_))));
        assert!(!out.exists());
    }
}
