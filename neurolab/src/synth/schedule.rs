//! 切片采集顺序表。

use crate::error::{Error, Result};
use ndarray::{Array, Array2, ArrayView1, Axis};

/// 切片采集顺序表：一个(G, K)矩阵，第`g`行是第`g`个采集组中的切片编号。
///
/// 一帧内各组按行的顺序依次读出，每组内的切片视为同时采集。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceSchedule {
    groups: Array2<usize>,
}

impl SliceSchedule {
    /// 顺序采集：将`0..n_slices`按行优先排成`n_groups`行，即第`g`组为连续的切片。
    pub fn sequential(n_slices: usize, n_groups: usize) -> Result<Self> {
        let per_group = Self::group_len_for(n_slices, n_groups)?;
        let groups = Array::from_iter(0..n_slices).into_shape((n_groups, per_group))?;
        Ok(Self { groups })
    }

    /// 交错采集：第`g`组为切片`g, g + G, g + 2G, ...`。
    pub fn interleaved(n_slices: usize, n_groups: usize) -> Result<Self> {
        let per_group = Self::group_len_for(n_slices, n_groups)?;
        let groups = Array2::from_shape_fn((n_groups, per_group), |(g, k)| g + k * n_groups);
        Ok(Self { groups })
    }

    /// 由各组的切片列表构造。各组长度必须相同且非空。
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Result<Self> {
        let n_groups = groups.len();
        let per_group = groups.first().map_or(0, Vec::len);
        if n_groups == 0 || per_group == 0 {
            return Err(Error::malformed_schedule("schedule has no slices"));
        }
        if let Some((g, v)) = groups.iter().enumerate().find(|(_, v)| v.len() != per_group) {
            return Err(Error::malformed_schedule(format!(
                "group {g} has {} slices, expected {per_group}",
                v.len()
            )));
        }
        let flat: Vec<usize> = groups.into_iter().flatten().collect();
        let groups = Array2::from_shape_vec((n_groups, per_group), flat)?;
        Ok(Self { groups })
    }

    #[inline]
    pub fn from_array(groups: Array2<usize>) -> Self {
        Self { groups }
    }

    fn group_len_for(n_slices: usize, n_groups: usize) -> Result<usize> {
        if n_groups == 0 || n_slices == 0 {
            return Err(Error::malformed_schedule(
                "slice and group counts must be positive",
            ));
        }
        if n_slices % n_groups != 0 {
            return Err(Error::malformed_schedule(format!(
                "{n_slices} slices cannot be split evenly into {n_groups} groups"
            )));
        }
        Ok(n_slices / n_groups)
    }

    /// 采集组个数G。
    #[inline]
    pub fn n_groups(&self) -> usize {
        self.groups.nrows()
    }

    /// 每组切片数K。
    #[inline]
    pub fn group_len(&self) -> usize {
        self.groups.ncols()
    }

    /// 表中切片总数G * K。
    #[inline]
    pub fn n_slices(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn group(&self, g: usize) -> ArrayView1<usize> {
        self.groups.row(g)
    }

    /// 按采集顺序枚举各组。
    pub fn groups(&self) -> impl Iterator<Item = ArrayView1<usize>> + '_ {
        self.groups.axis_iter(Axis(0))
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<usize> {
        &self.groups
    }

    /// 检查顺序表是否恰好划分`0..n_slices`：每个切片出现且只出现一次。
    pub fn validate(&self, n_slices: usize) -> Result<()> {
        if self.n_groups() == 0 || self.group_len() == 0 {
            return Err(Error::malformed_schedule("schedule has no slices"));
        }
        if self.n_slices() != n_slices {
            return Err(Error::malformed_schedule(format!(
                "schedule covers {} slices, but the slice axis has {n_slices}",
                self.n_slices()
            )));
        }
        let mut seen = vec![false; n_slices];
        for (g, group) in self.groups().enumerate() {
            for &s in group.iter() {
                match seen.get_mut(s) {
                    None => {
                        return Err(Error::malformed_schedule(format!(
                            "slice {s} in group {g} is out of range 0..{n_slices}"
                        )))
                    }
                    Some(true) => {
                        return Err(Error::malformed_schedule(format!(
                            "slice {s} appears more than once"
                        )))
                    }
                    Some(v) => *v = true,
                }
            }
        }
        Ok(())
    }
}
