//! 工具集统一的错误类型。

use thiserror::Error;

/// 工具集中所有可失败操作的错误。
#[derive(Debug, Error)]
pub enum Error {
    /// 切片采集顺序表不能恰好划分切片轴。
    #[error("malformed slice schedule: {0}")]
    MalformedSchedule(String),

    /// 数组形状与预期不一致。
    #[error("shape mismatch: expected {expected:?}, actual {actual:?}")]
    ShapeMismatch {
        /// 预期形状
        expected: Vec<usize>,
        /// 实际形状
        actual: Vec<usize>,
    },

    /// 参数或配置非法。
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 题目文件中不存在该题。
    #[error("question {number} not found in week {week} (available: {available})")]
    QuestionNotFound {
        week: u32,
        number: usize,
        available: usize,
    },

    /// 题目文件结构错误。
    #[error("malformed question fixture: {0}")]
    Quiz(String),

    /// 选项编号非法。
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// 两张表存在同名列，无法连接。
    #[error("column `{0}` exists in both tables")]
    ColumnOverlap(String),

    /// 表中缺少所需的列。
    #[error("missing column `{0}`")]
    MissingColumn(String),

    /// 表数据结构错误。
    #[error("malformed table: {0}")]
    Table(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),

    #[error("npy write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] json::Error),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl Error {
    /// 构造一个`MalformedSchedule`错误。
    pub fn malformed_schedule(reason: impl Into<String>) -> Self {
        Self::MalformedSchedule(reason.into())
    }

    /// 构造一个`ShapeMismatch`错误。
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// 构造一个`InvalidArgument`错误。
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::shape_mismatch(&[99, 99, 40, 9], &[99, 99, 40, 8]);
        assert_eq!(
            e.to_string(),
            "shape mismatch: expected [99, 99, 40, 9], actual [99, 99, 40, 8]"
        );
        let e = Error::malformed_schedule("slice 3 appears twice");
        assert_eq!(e.to_string(), "malformed slice schedule: slice 3 appears twice");
        let e = Error::QuestionNotFound {
            week: 2,
            number: 9,
            available: 7,
        };
        assert_eq!(
            e.to_string(),
            "question 9 not found in week 2 (available: 7)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/neurolab/file")?)
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
