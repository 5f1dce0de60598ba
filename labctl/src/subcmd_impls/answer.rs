use clap::{Args, ValueEnum};
use neurolab::quiz::answers::{contrast_feedback, fmri_properties_feedback, ventricle_feedback};
use neurolab::{Error, Result};

#[derive(Args, Debug)]
pub struct Answer {
    /// 题目。
    #[arg(value_enum)]
    question: QuizQuestion,
    /// 所选答案编号。
    #[arg(required = true, allow_negative_numbers = true)]
    answers: Vec<i64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
/// 带固定反馈的课堂小测。
enum QuizQuestion {
    /// fMRI的性质（多选）。
    FmriProperties,
    /// 脑室为何在T1中呈暗色（单选）。
    Ventricles,
    /// 图像对比度（单选）。
    Contrast,
}

impl Answer {
    fn single(&self) -> Result<i64> {
        match self.answers[..] {
            [a] => Ok(a),
            _ => Err(Error::InvalidSelection(format!(
                "{:?} expects exactly one answer, got {}",
                self.question,
                self.answers.len()
            ))),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        match self.question {
            QuizQuestion::FmriProperties => {
                for line in fmri_properties_feedback(&self.answers) {
                    println!("{line}");
                }
            }
            QuizQuestion::Ventricles => println!("{}", ventricle_feedback(self.single()?)),
            QuizQuestion::Contrast => println!("{}", contrast_feedback(self.single()?)),
        }
        Ok(())
    }
}
