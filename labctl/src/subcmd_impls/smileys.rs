use super::utils::{parse_modulation, positive_usize};
use clap::{Args, ValueEnum};
use neurolab::synth::consts::SLICE_GROUPS;
use neurolab::synth::{
    generate_all, ModulationRange, OutputOptions, SeriesConfig, SliceSchedule, VoxelType,
};
use neurolab::Result;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct Smileys {
    /// 输出目录，不存在时自动创建。
    #[arg(long = "output-dir", short, default_value = ".")]
    out_dir: PathBuf,
    /// 每帧的采集组数。
    #[arg(long, short, default_value_t = SLICE_GROUPS, value_parser = positive_usize)]
    groups: usize,
    /// 调制值闭区间`start:stop:step`，默认为`0:80:10`。
    #[arg(long, value_parser = parse_modulation)]
    modulation: Option<ModulationRange>,
    /// 组内切片的排列方式。
    #[arg(long, value_enum, default_value_t = SliceOrder::Sequential)]
    order: SliceOrder,
    /// 写出的体素类型。
    #[arg(long, value_enum, default_value_t = Dtype::U8)]
    dtype: Dtype,
    /// 是否同时写出npy文件。
    #[arg(long)]
    save_npy: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
/// 切片采集顺序。
enum SliceOrder {
    /// 第`g`组为连续切片。
    Sequential,
    /// 第`g`组为间隔为组数的切片。
    Interleaved,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Dtype {
    U8,
    F32,
}

impl From<Dtype> for VoxelType {
    #[inline]
    fn from(d: Dtype) -> Self {
        match d {
            Dtype::U8 => VoxelType::U8,
            Dtype::F32 => VoxelType::F32,
        }
    }
}

impl Smileys {
    pub fn run(&mut self) -> Result<()> {
        let config = SeriesConfig {
            modulation: self.modulation.unwrap_or_default(),
            ..SeriesConfig::default()
        };
        let n_slices = config.n_slices();
        let schedule = match self.order {
            SliceOrder::Sequential => SliceSchedule::sequential(n_slices, self.groups)?,
            SliceOrder::Interleaved => SliceSchedule::interleaved(n_slices, self.groups)?,
        };
        let opts = OutputOptions {
            voxel: self.dtype.into(),
            npy: self.save_npy,
        };
        let artifacts = generate_all(self.out_dir.as_path(), &config, &schedule, opts)?;
        for p in artifacts.paths() {
            println!("{}", p.display());
        }
        Ok(())
    }
}
