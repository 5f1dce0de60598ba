//! 笑脸掩膜生成。

use super::consts::*;
use ndarray::Array3;

/// 体素坐标(x, y, z)。
pub type Voxel = (usize, usize, usize);

/// 笑脸的几何参数：一个球体（头），两个球形空洞（眼睛），以及位于单一z切片上的一段圆环（嘴）。
#[derive(Clone, Debug, PartialEq)]
pub struct SmileyGeometry {
    /// 体数据边长。
    pub size: usize,
    pub eye_radius: usize,
    /// 两只眼睛的中心。
    pub eyes: [Voxel; 2],
    pub mouth_center_x: usize,
    pub mouth_inner_radius: usize,
    pub mouth_outer_radius: usize,
    /// 嘴部所在的z切片。
    pub mouth_z: usize,
    /// 嘴部弧线角度范围(下界, 上界)，以弧度表示。
    pub mouth_arc: (f64, f64),
}

impl Default for SmileyGeometry {
    fn default() -> Self {
        let r = GRID_SIZE / 2;
        Self {
            size: GRID_SIZE,
            eye_radius: EYE_RADIUS,
            eyes: [
                (LEFT_EYE_XY.0, LEFT_EYE_XY.1, r),
                (RIGHT_EYE_XY.0, RIGHT_EYE_XY.1, r),
            ],
            mouth_center_x: MOUTH_CENTER_X,
            mouth_inner_radius: MOUTH_INNER_RADIUS,
            mouth_outer_radius: MOUTH_OUTER_RADIUS,
            mouth_z: MOUTH_Z,
            mouth_arc: MOUTH_ARC,
        }
    }
}

#[inline]
fn sq_dist(a: Voxel, b: Voxel) -> i64 {
    let dx = a.0 as i64 - b.0 as i64;
    let dy = a.1 as i64 - b.1 as i64;
    let dz = a.2 as i64 - b.2 as i64;
    dx * dx + dy * dy + dz * dz
}

#[inline]
fn sq(v: usize) -> i64 {
    (v * v) as i64
}

impl SmileyGeometry {
    /// 头部球体半径，同时也是球心在每个方向上的坐标。
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.size, self.size, self.size)
    }

    #[inline]
    fn center(&self) -> Voxel {
        let r = self.radius();
        (r, r, r)
    }

    /// 判断体素是否在头部球体内。
    pub fn is_head(&self, p: Voxel) -> bool {
        sq_dist(p, self.center()) < sq(self.radius())
    }

    /// 判断体素是否在任意一只眼睛内。
    pub fn is_eye(&self, p: Voxel) -> bool {
        self.eyes
            .iter()
            .any(|&eye| sq_dist(p, eye) < sq(self.eye_radius))
    }

    /// 判断体素是否在嘴部区域内。嘴部只出现在`mouth_z`切片上。
    pub fn is_mouth(&self, p: Voxel) -> bool {
        if p.2 != self.mouth_z {
            return false;
        }
        let r = self.radius();
        let d = sq_dist(p, (self.mouth_center_x, r, r));
        if d <= sq(self.mouth_inner_radius) || d >= sq(self.mouth_outer_radius) {
            return false;
        }
        // 弧线范围由x方向偏移与两个参考角余弦的比较给出
        let dx = p.0 as f64 - self.mouth_center_x as f64;
        let outer = self.mouth_outer_radius as f64;
        dx >= outer * self.mouth_arc.0.cos() && dx <= outer * self.mouth_arc.1.cos()
    }

    /// 判断体素在最终掩膜中是否为“开”。
    #[inline]
    pub fn contains(&self, p: Voxel) -> bool {
        self.is_head(p) && !self.is_eye(p) && !self.is_mouth(p)
    }

    /// 生成(size, size, size)的二值掩膜。
    pub fn mask(&self) -> Array3<bool> {
        Array3::from_shape_fn(self.shape(), |p| self.contains(p))
    }

    /// 生成调制值为`t`的笑脸体数据：掩膜为“开”的体素取值`t`，其余为0。
    pub fn render(&self, t: f32) -> Array3<f32> {
        paint(&self.mask(), t)
    }
}

/// 将二值掩膜着色为强度`t`。
#[inline]
pub fn paint<D: ndarray::Dimension>(
    mask: &ndarray::Array<bool, D>,
    t: f32,
) -> ndarray::Array<f32, D> {
    mask.mapv(|on| if on { t } else { 0.0 })
}
