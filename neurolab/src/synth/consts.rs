//! 合成笑脸数据所用的默认几何与采集参数。

use std::f64::consts::FRAC_PI_2;
use std::ops::Range;

/// 体数据边长（三个方向相同）。
pub const GRID_SIZE: usize = 100;

/// 眼睛半径。
pub const EYE_RADIUS: usize = 10;

/// 左眼中心的(x, y)坐标，z坐标取体数据中心。
pub const LEFT_EYE_XY: (usize, usize) = (26, 32);

/// 右眼中心的(x, y)坐标，z坐标取体数据中心。
pub const RIGHT_EYE_XY: (usize, usize) = (26, 70);

/// 嘴部圆环中心的x坐标。
pub const MOUTH_CENTER_X: usize = 70;

pub const MOUTH_INNER_RADIUS: usize = 20;

pub const MOUTH_OUTER_RADIUS: usize = 25;

/// 嘴部所在的z切片。
pub const MOUTH_Z: usize = 50;

/// 嘴部弧线的角度范围（弧度）。
pub const MOUTH_ARC: (f64, f64) = (-FRAC_PI_2, 0.0);

/// 裁剪窗口。
pub const CROP_X: Range<usize> = 0..99;
pub const CROP_Y: Range<usize> = 0..99;
pub const CROP_Z: Range<usize> = 31..71;

/// 调制参数（闭区间）。
pub const MODULATION_START: f32 = 0.0;
pub const MODULATION_STOP: f32 = 80.0;
pub const MODULATION_STEP: f32 = 10.0;

/// 默认采集组数。
pub const SLICE_GROUPS: usize = 11;

pub const GROUND_TRUTH_FILE: &str = "ground_truth_modulation.nii";
pub const UPSAMPLED_FILE: &str = "ground_truth_upsampled_modulation.nii";
pub const ACQUIRED_FILE: &str = "acquired_modulation.nii";
