//! 神经影像课程的辅助工具：合成笑脸体数据、测验答案反馈、选择题以及时间序列对齐。

pub mod align;
pub mod error;
pub mod prelude;
pub mod quiz;
pub mod synth;

pub use error::{Error, Result};
