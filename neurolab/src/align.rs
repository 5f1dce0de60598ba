//! 两个以时间为索引的数据表的对齐（运动学特征与肌电标签）。
//!
//! 表以pandas的`orient="split"` JSON格式读写：`{"columns": [...], "index": [...], "data": [[...], ...]}`，
//! 其中`null`表示缺失值（在内存中为NaN）。

use crate::error::{Error, Result};
use json::JsonValue;
use ndarray::{s, Array2, ArrayView1};
use std::fs;
use std::path::Path;

/// 以时间为行索引的数值表，缺失值为NaN。
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTable {
    index: Vec<f64>,
    columns: Vec<String>,
    data: Array2<f64>,
}

fn parse_number(v: &JsonValue, what: &str) -> Result<f64> {
    if v.is_null() {
        return Ok(f64::NAN);
    }
    v.as_f64()
        .ok_or_else(|| Error::Table(format!("{what} must be a number or null")))
}

#[inline]
fn number_to_json(v: f64) -> JsonValue {
    if v.is_finite() {
        JsonValue::from(v)
    } else {
        JsonValue::Null
    }
}

impl TimeTable {
    /// 构造一张表。`data`的形状必须为(行数, 列数)，索引不能含NaN且不能重复。
    pub fn new(index: Vec<f64>, columns: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if data.dim() != (index.len(), columns.len()) {
            return Err(Error::shape_mismatch(
                &[index.len(), columns.len()],
                data.shape(),
            ));
        }
        if index.iter().any(|v| v.is_nan()) {
            return Err(Error::Table("index contains NaN".into()));
        }
        let mut sorted = index.clone();
        sorted.sort_by(f64::total_cmp);
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::Table("index contains duplicate entries".into()));
        }
        Ok(Self {
            index,
            columns,
            data,
        })
    }

    #[inline]
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<f64>> {
        self.column_position(name).map(|j| self.data.column(j))
    }

    /// 解析split格式的JSON。
    pub fn from_split_json(text: &str) -> Result<Self> {
        let root = json::parse(text)?;
        let columns = root["columns"]
            .members()
            .map(|c| {
                c.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::Table("column names must be strings".into()))
            })
            .collect::<Result<Vec<_>>>()?;
        let index = root["index"]
            .members()
            .map(|v| parse_number(v, "index entry"))
            .collect::<Result<Vec<_>>>()?;
        let mut flat = Vec::with_capacity(index.len() * columns.len());
        for row in root["data"].members() {
            if row.len() != columns.len() {
                return Err(Error::Table(format!(
                    "row has {} values, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
            for v in row.members() {
                flat.push(parse_number(v, "cell")?);
            }
        }
        if flat.len() != index.len() * columns.len() {
            return Err(Error::Table(format!(
                "table has {} rows of data but {} index entries",
                flat.len() / columns.len().max(1),
                index.len()
            )));
        }
        let data = Array2::from_shape_vec((index.len(), columns.len()), flat)?;
        Self::new(index, columns, data)
    }

    /// 编码为split格式的JSON，NaN写为`null`。
    pub fn to_split_json(&self) -> String {
        let mut root = JsonValue::new_object();
        let columns: Vec<JsonValue> = self.columns.iter().map(|c| c.as_str().into()).collect();
        let index: Vec<JsonValue> = self.index.iter().copied().map(number_to_json).collect();
        let data: Vec<JsonValue> = self
            .data
            .rows()
            .into_iter()
            .map(|row| {
                let row: Vec<JsonValue> = row.iter().copied().map(number_to_json).collect();
                row.into()
            })
            .collect();
        root["columns"] = columns.into();
        root["index"] = index.into();
        root["data"] = data.into();
        root.dump()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_split_json(&fs::read_to_string(path)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_split_json())?;
        Ok(())
    }

    /// 只保留`keep`为真的行。
    fn filter_rows(&self, keep: &[bool]) -> Self {
        let rows: Vec<usize> = (0..self.nrows()).filter(|&i| keep[i]).collect();
        let index = rows.iter().map(|&i| self.index[i]).collect();
        let data = self.data.select(ndarray::Axis(0), &rows);
        Self {
            index,
            columns: self.columns.clone(),
            data,
        }
    }

    /// 取列区间`range`组成新表。
    fn take_columns(&self, range: std::ops::Range<usize>) -> Self {
        Self {
            index: self.index.clone(),
            columns: self.columns[range.clone()].to_vec(),
            data: self.data.slice(s![.., range]).to_owned(),
        }
    }
}

/// 标签修正：当`columns`上的取值恰为`pattern`时，替换为`replacement`。
#[derive(Clone, Debug, PartialEq)]
pub struct LabelFix {
    pub columns: Vec<String>,
    pub pattern: Vec<f64>,
    pub replacement: Vec<f64>,
}

impl LabelFix {
    /// 右手六通道标签`[0, 1, 2, 2, 2, 2]`的对齐误差修正为`[0, 0, 2, 2, 2, 2]`。
    pub fn right_hand() -> Self {
        Self {
            columns: (1..=6).map(|i| format!("Right_Hand_channel{i}")).collect(),
            pattern: vec![0.0, 1.0, 2.0, 2.0, 2.0, 2.0],
            replacement: vec![0.0, 0.0, 2.0, 2.0, 2.0, 2.0],
        }
    }

    fn apply(&self, table: &mut TimeTable) -> Result<usize> {
        let n = self.columns.len();
        if n != self.pattern.len() || n != self.replacement.len() {
            return Err(Error::invalid_argument(
                "label fix columns, pattern and replacement must have the same length",
            ));
        }
        let pos = self
            .columns
            .iter()
            .map(|c| {
                table
                    .column_position(c)
                    .ok_or_else(|| Error::MissingColumn(c.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut fixed = 0;
        for mut row in table.data.rows_mut() {
            if pos.iter().zip(&self.pattern).all(|(&j, &p)| row[j] == p) {
                for (&j, &r) in pos.iter().zip(&self.replacement) {
                    row[j] = r;
                }
                fixed += 1;
            }
        }
        Ok(fixed)
    }
}

/// 按索引位置对每一列做线性插值，只填补两侧都有有效值的缺口。
fn interpolate_inside(index: &[f64], data: &mut Array2<f64>) {
    for mut col in data.columns_mut() {
        let valid: Vec<usize> = (0..col.len()).filter(|&i| !col[i].is_nan()).collect();
        for w in valid.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            if hi - lo < 2 {
                continue;
            }
            let (x0, x1) = (index[lo], index[hi]);
            let (y0, y1) = (col[lo], col[hi]);
            for i in lo + 1..hi {
                col[i] = y0 + (y1 - y0) * (index[i] - x0) / (x1 - x0);
            }
        }
    }
}

/// 在升序索引中查找与`v`相等（`==`语义，`-0.0`与`0.0`相等）的位置。
#[inline]
fn position_sorted(sorted: &[f64], v: f64) -> Option<usize> {
    let i = sorted.partition_point(|&p| p < v);
    (sorted.get(i) == Some(&v)).then_some(i)
}

/// 对齐两个时间表，返回裁剪后的(`x1`, `x2`)。
///
/// 1. 按索引外连接并升序排序；
/// 2. 每列按索引线性插值（只在有效值之间）；
/// 3. 保留第一列与最后一列都有值的行；
/// 4. 去掉索引属于`x2`的行；
/// 5. 拆回两张表，`x2`四舍六入五成双取整后应用`fixes`。
pub fn align(
    x1: &TimeTable,
    x2: &TimeTable,
    fixes: &[LabelFix],
) -> Result<(TimeTable, TimeTable)> {
    if x1.columns.is_empty() || x2.columns.is_empty() {
        return Err(Error::Table("both tables need at least one column".into()));
    }
    if let Some(c) = x1.columns.iter().find(|c| x2.columns.contains(c)) {
        return Err(Error::ColumnOverlap(c.clone()));
    }

    let mut index: Vec<f64> = x1.index.iter().chain(&x2.index).copied().collect();
    index.sort_by(f64::total_cmp);
    index.dedup();

    let (c1, c2) = (x1.columns.len(), x2.columns.len());
    let mut data = Array2::from_elem((index.len(), c1 + c2), f64::NAN);
    for (table, offset) in [(x1, 0), (x2, c1)] {
        for (i, &t) in table.index.iter().enumerate() {
            let row = position_sorted(&index, t)
                .ok_or_else(|| Error::Table(format!("index entry {t} missing after join")))?;
            data.slice_mut(s![row, offset..offset + table.columns.len()])
                .assign(&table.data.row(i));
        }
    }
    interpolate_inside(&index, &mut data);

    let mut x2_index = x2.index.clone();
    x2_index.sort_by(f64::total_cmp);
    let last = c1 + c2 - 1;
    let keep: Vec<bool> = (0..index.len())
        .map(|i| {
            !data[(i, 0)].is_nan()
                && !data[(i, last)].is_nan()
                && position_sorted(&x2_index, index[i]).is_none()
        })
        .collect();

    let columns = x1.columns.iter().chain(&x2.columns).cloned().collect();
    let joined = TimeTable {
        index,
        columns,
        data,
    }
    .filter_rows(&keep);

    let features = joined.take_columns(0..c1);
    let mut labels = joined.take_columns(c1..c1 + c2);
    labels.data.mapv_inplace(f64::round_ties_even);
    for fix in fixes {
        let n = fix.apply(&mut labels)?;
        tracing::debug!(fixed = n, "applied label fix");
    }
    tracing::info!(rows = features.nrows(), "aligned time tables");
    Ok((features, labels))
}
