//! 按切片采集顺序表重采样，模拟切片时间效应。

use super::schedule::SliceSchedule;
use super::series::TIME_AXIS;
use crate::error::{Error, Result};
use ndarray::{Array4, ArrayView4, Axis};

/// 切片轴（第2轴）。
pub const SLICE_AXIS: Axis = Axis(1);

/// 由上采样序列构造“采集到的”序列。
///
/// 上采样序列的长度必须为`frames * G`。输出第`i`帧中第`g`组的切片取自上采样序列第`i * G + g`帧，
/// 即按帧优先、组次之的顺序依次消耗上采样帧。顺序表必须恰好划分切片轴。
pub fn resample(
    upsampled: ArrayView4<f32>,
    schedule: &SliceSchedule,
    frames: usize,
) -> Result<Array4<f32>> {
    let n_groups = schedule.n_groups();
    let (a, b, c, t) = upsampled.dim();
    if t != frames * n_groups {
        return Err(Error::shape_mismatch(
            &[a, b, c, frames * n_groups],
            upsampled.shape(),
        ));
    }
    schedule.validate(upsampled.len_of(SLICE_AXIS))?;

    let mut acquired = Array4::<f32>::zeros((a, b, c, frames));
    if n_groups == 0 || frames == 0 {
        return Ok(acquired);
    }
    let sources = upsampled.axis_chunks_iter(TIME_AXIS, n_groups);
    for (mut frame, chunk) in acquired.axis_iter_mut(TIME_AXIS).zip(sources) {
        // 去掉时间轴后，切片轴仍是第2轴
        for (group, src) in schedule.groups().zip(chunk.axis_iter(TIME_AXIS)) {
            for &s in group.iter() {
                frame
                    .index_axis_mut(SLICE_AXIS, s)
                    .assign(&src.index_axis(SLICE_AXIS, s));
            }
        }
    }
    Ok(acquired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::consts::SLICE_GROUPS;
    use crate::synth::series::SeriesConfig;
    use ndarray::Array4;

    /// 第`k`帧所有体素取值为`k`的上采样序列。
    fn indexed_series(shape: (usize, usize, usize), n: usize) -> Array4<f32> {
        Array4::from_shape_fn((shape.0, shape.1, shape.2, n), |(_, _, _, k)| k as f32)
    }

    #[test]
    fn test_groups_take_their_upsampled_frame() {
        let frames = 9;
        let sch = SliceSchedule::sequential(99, SLICE_GROUPS).unwrap();
        let up = indexed_series((4, 99, 3), frames * SLICE_GROUPS);
        let out = resample(up.view(), &sch, frames).unwrap();
        assert_eq!(out.dim(), (4, 99, 3, frames));
        for i in 0..frames {
            for (g, group) in sch.groups().enumerate() {
                let expected = (i * SLICE_GROUPS + g) as f32;
                for &s in group.iter() {
                    let slab = out.index_axis(TIME_AXIS, i);
                    let slab = slab.index_axis(SLICE_AXIS, s);
                    assert!(slab.iter().all(|&v| v == expected));
                }
            }
        }
    }

    #[test]
    fn test_every_voxel_written_once() {
        let sch = SliceSchedule::interleaved(12, 4).unwrap();
        // 以NaN为哨兵：输出中不允许残留未写入的零
        let up = Array4::from_elem((2, 12, 2, 8), f32::NAN);
        let out = resample(up.view(), &sch, 2).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_default_pipeline_shapes() {
        let cfg = SeriesConfig::default();
        let gt = cfg.ground_truth().unwrap();
        let up = cfg.upsampled(SLICE_GROUPS).unwrap();
        let sch = SliceSchedule::sequential(cfg.n_slices(), SLICE_GROUPS).unwrap();
        let acq = resample(up.view(), &sch, cfg.modulation.frames()).unwrap();
        assert_eq!(acq.shape(), gt.shape());
        assert_eq!(acq.len(), gt.len());
        // 第一组切片来自第一帧上采样数据，与真实序列第一帧一致
        for &s in sch.group(0).iter() {
            assert_eq!(
                acq.index_axis(TIME_AXIS, 0).index_axis(SLICE_AXIS, s),
                gt.index_axis(TIME_AXIS, 0).index_axis(SLICE_AXIS, s)
            );
        }
    }

    #[test]
    fn test_frame_count_mismatch() {
        let sch = SliceSchedule::sequential(6, 3).unwrap();
        let up = indexed_series((2, 6, 2), 7);
        assert!(matches!(
            resample(up.view(), &sch, 2),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_schedule_must_cover_slice_axis() {
        let sch = SliceSchedule::sequential(6, 3).unwrap();
        let up = indexed_series((2, 8, 2), 6);
        assert!(matches!(
            resample(up.view(), &sch, 2),
            Err(Error::MalformedSchedule(_))
        ));
    }
}
