//! 时间序列组装：按调制值序列生成笑脸，裁剪后沿第4轴堆叠。

use super::consts::*;
use super::smiley::{paint, SmileyGeometry};
use crate::error::{Error, Result};
use ndarray::{s, Array3, Array4, ArrayView3, Axis};
use std::ops::Range;

/// 时间轴（第4轴）。
pub const TIME_AXIS: Axis = Axis(3);

/// 裁剪窗口，三个方向均为左闭右开区间。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: Range<usize>,
    pub y: Range<usize>,
    pub z: Range<usize>,
}

impl Default for CropWindow {
    fn default() -> Self {
        Self {
            x: CROP_X,
            y: CROP_Y,
            z: CROP_Z,
        }
    }
}

impl CropWindow {
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.x.len(), self.y.len(), self.z.len())
    }

    /// 检查窗口是否落在边长为`size`的体数据内。
    pub fn check(&self, size: usize) -> Result<()> {
        for (axis, r) in [("x", &self.x), ("y", &self.y), ("z", &self.z)] {
            if r.start >= r.end || r.end > size {
                return Err(Error::invalid_argument(format!(
                    "crop range {axis}={}..{} does not fit a grid of size {size}",
                    r.start, r.end
                )));
            }
        }
        Ok(())
    }

    /// 取出窗口内的视图。调用者需保证窗口已通过`check`。
    pub fn apply<'a, A>(&self, volume: &'a Array3<A>) -> ArrayView3<'a, A> {
        volume.slice(s![self.x.clone(), self.y.clone(), self.z.clone()])
    }
}

/// 调制值的等差闭区间[start, stop]。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulationRange {
    start: f32,
    stop: f32,
    step: f32,
}

impl Default for ModulationRange {
    fn default() -> Self {
        Self {
            start: MODULATION_START,
            stop: MODULATION_STOP,
            step: MODULATION_STEP,
        }
    }
}

impl ModulationRange {
    pub fn new(start: f32, stop: f32, step: f32) -> Result<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(Error::invalid_argument("modulation bounds must be finite"));
        }
        if step <= 0.0 {
            return Err(Error::invalid_argument(format!(
                "modulation step must be positive, but got `{step}`"
            )));
        }
        if stop < start {
            return Err(Error::invalid_argument(format!(
                "modulation range is empty: {start} > {stop}"
            )));
        }
        Ok(Self { start, stop, step })
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> f32 {
        self.stop
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// 粗采样帧数，即闭区间内的等差点个数。
    pub fn frames(&self) -> usize {
        let span = (self.stop as f64 - self.start as f64) / self.step as f64;
        // 端点以f32给出，步数与整数的差在f32精度内时视为恰好落在步长上
        let k = span.round();
        let steps = if (span - k).abs() <= 1e-4 * k.max(1.0) {
            k
        } else {
            span.floor()
        };
        steps as usize + 1
    }

    /// 粗采样调制值：start, start + step, ...，包含stop（若stop落在步长上）。
    pub fn values(&self) -> Vec<f32> {
        (0..self.frames())
            .map(|i| (self.start as f64 + i as f64 * self.step as f64) as f32)
            .collect()
    }

    /// 在同一闭区间上均匀取`count`个值（两端都包含）。
    pub fn upsampled(&self, count: usize) -> Vec<f32> {
        match count {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let (a, b) = (self.start as f64, self.stop as f64);
                let delta = (b - a) / (n - 1) as f64;
                (0..n).map(|i| (a + i as f64 * delta) as f32).collect()
            }
        }
    }
}

/// 生成时间序列所需的全部参数。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesConfig {
    pub geometry: SmileyGeometry,
    pub crop: CropWindow,
    pub modulation: ModulationRange,
}

impl SeriesConfig {
    /// 单帧（裁剪后）的形状。
    #[inline]
    pub fn frame_shape(&self) -> (usize, usize, usize) {
        self.crop.shape()
    }

    /// 裁剪后的切片个数（第2轴长度），即采集顺序表需要划分的切片数。
    #[inline]
    pub fn n_slices(&self) -> usize {
        self.crop.y.len()
    }

    /// 对`values`中每个调制值生成一帧笑脸，裁剪后沿第4轴堆叠。
    pub fn assemble(&self, values: &[f32]) -> Result<Array4<f32>> {
        self.crop.check(self.geometry.size)?;
        // 几何形状与调制值无关，掩膜只计算一次
        let mask = self.geometry.mask();
        let roi = self.crop.apply(&mask).to_owned();
        let (a, b, c) = self.frame_shape();
        let mut series = Array4::<f32>::zeros((a, b, c, values.len()));
        for (mut frame, &t) in series.axis_iter_mut(TIME_AXIS).zip(values) {
            frame.assign(&paint(&roi, t));
        }
        tracing::debug!(frames = values.len(), "assembled smiley series");
        Ok(series)
    }

    /// 粗采样的真实序列。
    pub fn ground_truth(&self) -> Result<Array4<f32>> {
        self.assemble(&self.modulation.values())
    }

    /// 帧数为粗采样帧数乘以`groups`的上采样真实序列。
    pub fn upsampled(&self, groups: usize) -> Result<Array4<f32>> {
        let count = self.modulation.frames() * groups;
        self.assemble(&self.modulation.upsampled(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulation_values_closed() {
        let m = ModulationRange::default();
        assert_eq!(m.frames(), 9);
        assert_eq!(
            m.values(),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]
        );
        let m = ModulationRange::new(0.0, 85.0, 10.0).unwrap();
        assert_eq!(m.values().last().copied(), Some(80.0));
    }

    #[test]
    fn test_modulation_fractional_step_keeps_stop() {
        let m = ModulationRange::new(0.0, 0.7, 0.1).unwrap();
        assert_eq!(m.frames(), 8);
        let values = m.values();
        assert_eq!(values.len(), 8);
        assert!((values[7] - 0.7).abs() < 1e-6);
        let m = ModulationRange::new(0.0, 0.3, 0.1).unwrap();
        assert_eq!(m.frames(), 4);
        let m = ModulationRange::new(0.0, 0.75, 0.1).unwrap();
        assert_eq!(m.frames(), 8);
        // 粗采样与上采样的最后一个值一致
        let m = ModulationRange::new(0.0, 0.7, 0.1).unwrap();
        let up = m.upsampled(m.frames() * 3);
        assert!((up[up.len() - 1] - m.values()[7]).abs() < 1e-6);
    }

    #[test]
    fn test_modulation_upsampled_same_range() {
        let m = ModulationRange::default();
        let up = m.upsampled(99);
        assert_eq!(up.len(), 99);
        assert_eq!(up[0], 0.0);
        assert_eq!(up[98], 80.0);
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(m.upsampled(1), vec![0.0]);
        assert!(m.upsampled(0).is_empty());
    }

    #[test]
    fn test_modulation_rejects_bad_ranges() {
        assert!(ModulationRange::new(0.0, 80.0, 0.0).is_err());
        assert!(ModulationRange::new(10.0, 0.0, 1.0).is_err());
        assert!(ModulationRange::new(0.0, f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_series_shapes() {
        let cfg = SeriesConfig::default();
        let gt = cfg.ground_truth().unwrap();
        assert_eq!(gt.shape(), &[99, 99, 40, 9]);
        let up = cfg.upsampled(SLICE_GROUPS).unwrap();
        assert_eq!(up.shape(), &[99, 99, 40, 99]);
    }

    #[test]
    fn test_series_frames_match_generator() {
        let cfg = SeriesConfig::default();
        let gt = cfg.ground_truth().unwrap();
        for (i, t) in cfg.modulation.values().into_iter().enumerate() {
            let full = cfg.geometry.render(t);
            let expected = cfg.crop.apply(&full);
            assert_eq!(gt.index_axis(TIME_AXIS, i), expected);
        }
    }

    #[test]
    fn test_crop_out_of_grid() {
        let cfg = SeriesConfig {
            crop: CropWindow {
                x: 0..99,
                y: 0..101,
                z: 31..71,
            },
            ..SeriesConfig::default()
        };
        assert!(matches!(
            cfg.ground_truth(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
