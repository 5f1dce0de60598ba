pub use super::align::{align, LabelFix, TimeTable};
pub use super::error::{Error, Result};
pub use super::quiz::answers::{contrast_feedback, fmri_properties_feedback, ventricle_feedback};
pub use super::quiz::mcq::{Feedback, Question};
pub use super::synth::consts::SLICE_GROUPS;
pub use super::synth::{
    generate_all, resample, Artifacts, CropWindow, ModulationRange, OutputOptions, SeriesConfig,
    SliceSchedule, SmileyGeometry, VoxelType,
};
