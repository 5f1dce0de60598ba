use clap::{Parser, Subcommand};
use neurolab::Result;

#[derive(Parser, Debug)]
#[command(name = "labctl")]
#[command(about = "神经影像课程实验的辅助工具集.")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 子命令。
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run_program(&mut self) -> Result<()> {
        match self.command {
            Commands::Smileys(ref mut v) => v.run(),
            Commands::Nii2png(ref mut v) => v.run(),
            Commands::Answer(ref mut v) => v.run(),
            Commands::Mcq(ref mut v) => v.run(),
            Commands::Align(ref mut v) => v.run(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 生成笑脸真实序列、上采样序列与按切片顺序采集的序列（NIfTI）。
    Smileys(crate::subcmd_impls::smileys::Smileys),
    /// 将目录下每个4D nii文件的某一层逐帧保存为png。
    Nii2png(crate::subcmd_impls::nii2png::Nii2png),
    /// 查看课堂小测的答案反馈。
    Answer(crate::subcmd_impls::answer::Answer),
    /// 显示某周的选择题，并对所选选项给出反馈。
    Mcq(crate::subcmd_impls::mcq::Mcq),
    /// 对齐运动学特征表与肌电标签表。
    Align(crate::subcmd_impls::align::Align),
}
