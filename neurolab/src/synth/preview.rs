//! 4D序列的二维灰度预览图。

use super::series::TIME_AXIS;
use crate::error::{Error, Result};
use image::GrayImage;
use ndarray::{Array4, Axis};
use std::fs;
use std::path::{Path, PathBuf};

/// 整个序列的最大体素值，用于统一各帧的灰度尺度。
fn series_max(series: &Array4<f32>) -> f32 {
    series.iter().copied().fold(0.0_f32, f32::max)
}

#[inline]
fn normalize(v: f32, max: f32) -> u8 {
    if max <= 0.0 || v <= 0.0 {
        0_u8
    } else if v >= max {
        255_u8
    } else {
        (v / max * 255.0).floor() as u8
    }
}

/// 取第`frame`帧的第`z`层，灰度按`max`线性拉伸到0..=255。图像宽为第2轴，高为第1轴。
pub fn frame_slice(series: &Array4<f32>, z: usize, frame: usize, max: f32) -> Result<GrayImage> {
    let (h, w, depth, frames) = series.dim();
    if z >= depth || frame >= frames {
        return Err(Error::invalid_argument(format!(
            "slice z={z}, frame={frame} is outside a series of {depth} slices and {frames} frames"
        )));
    }
    let plane = series.index_axis(TIME_AXIS, frame);
    let plane = plane.index_axis(Axis(2), z);
    let buf: Vec<u8> = plane.iter().map(|&v| normalize(v, max)).collect();
    GrayImage::from_vec(w as u32, h as u32, buf)
        .ok_or_else(|| Error::invalid_argument("image buffer size mismatch"))
}

/// 把序列每一帧第`z`层保存为`out_dir/{frame}.png`，返回写出的文件路径。
pub fn save_frame_pngs(series: &Array4<f32>, z: usize, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let max = series_max(series);
    let mut written = Vec::with_capacity(series.len_of(TIME_AXIS));
    for frame in 0..series.len_of(TIME_AXIS) {
        let png = frame_slice(series, z, frame, max)?;
        let path = out_dir.join(format!("{frame}.png"));
        png.save(&path)?;
        written.push(path);
    }
    tracing::debug!(dir = %out_dir.display(), count = written.len(), "saved preview frames");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.0, 80.0), 0);
        assert_eq!(normalize(80.0, 80.0), 255);
        assert_eq!(normalize(40.0, 80.0), 127);
        assert_eq!(normalize(10.0, 0.0), 0);
    }

    #[test]
    fn test_frame_slice_layout() {
        let mut s = Array4::<f32>::zeros((2, 3, 1, 1));
        s[(1, 2, 0, 0)] = 10.0;
        let img = frame_slice(&s, 0, 0, 10.0).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255]);
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert!(frame_slice(&s, 1, 0, 10.0).is_err());
    }

    #[test]
    fn test_save_frame_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let s = Array4::from_shape_fn((4, 4, 2, 3), |(_, _, _, t)| t as f32);
        let paths = save_frame_pngs(&s, 1, dir.path()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.is_file()));
    }
}
