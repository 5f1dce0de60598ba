use clap::Args;
use neurolab::synth::preview::save_frame_pngs;
use neurolab::synth::read_series;
use neurolab::{Error, Result};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct Nii2png {
    /// 输入目录。
    #[arg(long = "input-dir", short)]
    in_dir: PathBuf,
    /// 输出目录，每个nii文件对应一个同名子目录。
    #[arg(long = "output-dir", short)]
    out_dir: PathBuf,
    /// 输出的z层，默认为19（裁剪后嘴部所在的层）。
    #[arg(long, short, default_value_t = 19)]
    z: usize,
}

impl Nii2png {
    pub fn run(&mut self) -> Result<()> {
        // [...input-dir/*.nii] -> [...output-dir/{stem}/{frame}.png]
        if !self.in_dir.is_dir() {
            return Err(Error::invalid_argument(format!(
                "`{}` is not a directory",
                self.in_dir.display()
            )));
        }
        fs::create_dir_all(self.out_dir.as_path())?;

        let mut converted = 0;
        for entry in WalkDir::new(self.in_dir.as_path())
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(s) = path.extension() else {
                continue;
            };
            if s != "nii" {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };
            println!("处理文件 `{}`...", path.display());
            let series = read_series(path)?;
            self.out_dir.push(stem);
            let written = save_frame_pngs(&series, self.z, self.out_dir.as_path())?;
            println!("\t帧数: {}", written.len());
            self.out_dir.pop();
            converted += 1;
        }
        tracing::info!(files = converted, "converted NIfTI volumes to png");
        Ok(())
    }
}
