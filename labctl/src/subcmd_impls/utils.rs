use neurolab::synth::ModulationRange;
use std::collections::BTreeSet;

/// 解析`start:stop:step`形式的调制值闭区间。
pub fn parse_modulation(s: &str) -> Result<ModulationRange, String> {
    let err = || format!("`{s}` is not a legal modulation range, expected `start:stop:step`");
    let parts: Vec<f32> = s
        .split(':')
        .map(|p| p.trim().parse::<f32>().map_err(|_| err()))
        .collect::<Result<_, _>>()?;
    let [start, stop, step] = parts[..] else {
        return Err(err());
    };
    ModulationRange::new(start, stop, step).map_err(|e| e.to_string())
}

pub fn positive_usize(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a positive integer"))?;
    if v == 0 {
        return Err("value must be positive, but got `0`".to_string());
    }
    Ok(v)
}

/// 单个选择题的选项编号上限。
pub const MAX_CHOICE: usize = 64;

/// 从形如`1,3-4`的字符串中提取从1开始的选项编号集合，编号不超过`MAX_CHOICE`。
pub fn ranges_to_integers(s: &str) -> Result<BTreeSet<usize>, &'static str> {
    const ERR: &str = "整数范围格式错误";
    let mut set = BTreeSet::<usize>::new();
    for ranges in s.split(',') {
        let mut d_iter = ranges.trim().split('-');
        let d1: usize = d_iter.next().ok_or(ERR)?.parse().map_err(|_| ERR)?;
        if d1 == 0 || d1 > MAX_CHOICE {
            return Err(ERR);
        }
        let d2 = d_iter.next();
        if let Some(d2) = d2 {
            let d2: usize = d2.parse().map_err(|_| ERR)?;
            if d2 < d1 || d2 > MAX_CHOICE {
                return Err(ERR);
            }
            set.extend(d1..=d2);
            if d_iter.next().is_some() {
                return Err(ERR);
            }
        } else {
            set.insert(d1);
        }
    }
    Ok(set)
}
