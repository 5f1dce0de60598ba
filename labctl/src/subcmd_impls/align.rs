use clap::Args;
use neurolab::align::{align, LabelFix, TimeTable};
use neurolab::Result;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct Align {
    /// 特征表（pandas split格式JSON）。
    #[arg(long, short)]
    features: PathBuf,
    /// 标签表（pandas split格式JSON）。
    #[arg(long, short)]
    labels: PathBuf,
    /// 输出目录。
    #[arg(long = "output-dir", short)]
    out_dir: PathBuf,
    /// 不应用右手通道标签修正。
    #[arg(long)]
    no_fix: bool,
}

impl Align {
    pub fn run(&mut self) -> Result<()> {
        // [features.json, labels.json] -> [output-dir/{features,labels}_aligned.json]
        let x1 = TimeTable::load(self.features.as_path())?;
        let x2 = TimeTable::load(self.labels.as_path())?;
        let fixes = if self.no_fix {
            Vec::new()
        } else {
            vec![LabelFix::right_hand()]
        };
        let (features, labels) = align(&x1, &x2, &fixes)?;
        println!("对齐后行数: {}", features.nrows());

        fs::create_dir_all(self.out_dir.as_path())?;
        self.out_dir.push("features_aligned.json");
        features.save(self.out_dir.as_path())?;
        self.out_dir.set_file_name("labels_aligned.json");
        labels.save(self.out_dir.as_path())?;
        self.out_dir.pop();
        Ok(())
    }
}
