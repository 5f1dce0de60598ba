//! 课堂小测的固定反馈。

use std::collections::BTreeSet;

/// fMRI性质题中应当选择的答案。
pub const FMRI_PROPERTIES_EXPECTED: [i64; 3] = [1, 3, 4];

pub const EMPTY_ANSWER: &str = "Please enter at least one answer!";
pub const MISSING_ANSWERS: &str = "You might be missing some answers! Check again ;)";

/// fMRI性质多选题：答案去重排序后逐条给出反馈；若漏选了正确答案则追加提示。
pub fn fmri_properties_feedback(answers: &[i64]) -> Vec<String> {
    if answers.is_empty() {
        return vec![EMPTY_ANSWER.to_string()];
    }
    let answers: BTreeSet<i64> = answers.iter().copied().collect();
    let mut lines: Vec<String> = answers
        .iter()
        .map(|&a| {
            match a {
                1 => "1. ✔️ Indeed, fMRI (short for functional MRI) aims to measure fluctuations in time of the MRI signal and does add time to 3D data, hence 4D.",
                2 => "2. ❌ Not exactly. Look to the contrast of fMRI compared to MRI: you will immediately notice they differ!",
                3 => "3. ✔️ fMRI aims to measure the blood oxygen level dependent (BOLD) signal.",
                4 => "4. ✔️ The actual sequence used depends on the desired contrast in analysis.",
                _ => "Please input a number between 1, 2, 3 and 4!",
            }
            .to_string()
        })
        .collect();
    if FMRI_PROPERTIES_EXPECTED
        .iter()
        .any(|e| !answers.contains(e))
    {
        lines.push(MISSING_ANSWERS.to_string());
    }
    lines
}

/// 脑室在T1图像中为何呈暗色。
pub fn ventricle_feedback(answer: i64) -> &'static str {
    match answer {
        1 => "❌ Air does appear dark, as you can see around the brain.\nHowever, ventricles in the human brain store and produce what is called the cerebro-spinal fluid (CSF).",
        2 => "✔️ Ventricles do indeed contain liquid, called the  cerebro-spinal fluid (CSF).\nIn T1 contrast, water and CSF appear dark while fat appears white.",
        3 => "❌ Fat in T1 contrast actually appears white! Look on the left-most image (called axial view).\nOn the bottom leftmost part, you actually see the back of the neck. Notice the little white area? It is a padding of fat!",
        _ => "Select a number between 1, 2 or 3!",
    }
}

/// 图像对比度题。
pub fn contrast_feedback(answer: i64) -> &'static str {
    match answer {
        1 => "❌ Check the ventricles for example",
        2 => "✔️ Correct!",
        _ => "Select a number between 1 and 2!",
    }
}
