//! NIfTI读写。写出时使用单位仿射矩阵。

use crate::error::{Error, Result};
use ndarray::{Array4, Ix4};
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::path::Path;

/// 写出文件中体素的数据类型。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoxelType {
    /// 无符号8位整数，写出时截断小数部分。
    #[default]
    U8,
    /// 32位浮点数，保留调制值原值。
    F32,
}

/// sform_code = 2，表示对齐到另一文件的坐标系。
const NIFTI_XFORM_ALIGNED_ANAT: i16 = 2;

/// 以单位矩阵作为sform的参考头。
pub fn identity_header() -> NiftiHeader {
    NiftiHeader {
        pixdim: [1.0; 8],
        scl_slope: 1.0,
        scl_inter: 0.0,
        qform_code: 0,
        sform_code: NIFTI_XFORM_ALIGNED_ANAT,
        srow_x: [1.0, 0.0, 0.0, 0.0],
        srow_y: [0.0, 1.0, 0.0, 0.0],
        srow_z: [0.0, 0.0, 1.0, 0.0],
        ..NiftiHeader::default()
    }
}

/// 检查形状是否一致，不一致时返回`ShapeMismatch`。
pub fn check_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::shape_mismatch(expected, actual))
    }
}

/// 将4D序列写为NIfTI-1文件。
pub fn write_series<P: AsRef<Path>>(
    path: P,
    series: &Array4<f32>,
    voxel: VoxelType,
) -> Result<()> {
    let header = identity_header();
    let writer = WriterOptions::new(path.as_ref()).reference_header(&header);
    match voxel {
        VoxelType::U8 => writer.write_nifti(&series.mapv(|v| v as u8))?,
        VoxelType::F32 => writer.write_nifti(series)?,
    }
    tracing::info!(
        path = %path.as_ref().display(),
        shape = ?series.shape(),
        "wrote NIfTI volume"
    );
    Ok(())
}

/// 读取一个4D NIfTI文件，体素统一转换为`f32`。
pub fn read_series<P: AsRef<Path>>(path: P) -> Result<Array4<f32>> {
    let obj = ReaderOptions::new().read_file(path.as_ref())?;
    let volume = obj.into_volume().into_ndarray::<f32>()?;
    if volume.ndim() != 4 {
        return Err(Error::invalid_argument(format!(
            "`{}` is a {}D volume, expected 4D",
            path.as_ref().display(),
            volume.ndim()
        )));
    }
    Ok(volume.into_dimensionality::<Ix4>()?)
}

/// 将4D序列另存为npy文件。
pub fn write_npy<P: AsRef<Path>>(path: P, series: &Array4<f32>) -> Result<()> {
    ndarray_npy::write_npy(path.as_ref(), series)?;
    tracing::info!(path = %path.as_ref().display(), "wrote npy array");
    Ok(())
}
