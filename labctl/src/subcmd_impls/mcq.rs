use super::utils::ranges_to_integers;
use clap::Args;
use neurolab::quiz::mcq::Question;
use neurolab::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct Mcq {
    /// 实验课根目录，题目位于`WeekNN/.answers/mca.json`。
    #[arg(long = "root", short = 'D', default_value = ".")]
    root: PathBuf,
    /// 周次（从1开始）。
    #[arg(long, short)]
    week: u32,
    /// 题号（从1开始）。
    #[arg(long, short)]
    question: usize,
    /// 所选选项，如`1,3-4`；省略时只显示题目。
    #[arg(long, short, value_parser = ranges_to_integers)]
    select: Option<BTreeSet<usize>>,
}

impl Mcq {
    pub fn run(&mut self) -> Result<()> {
        let question = Question::load_week(self.root.as_path(), self.week, self.question)?;
        print!("{}", question.render());
        let Some(ref selected) = self.select else {
            return Ok(());
        };
        let selected: Vec<usize> = selected.iter().copied().collect();
        for fb in question.answer(&selected)? {
            println!("{fb}");
        }
        Ok(())
    }
}
