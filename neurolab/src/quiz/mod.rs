//! 课程测验：固定答案反馈与选择题。

pub mod answers;
pub mod mcq;
