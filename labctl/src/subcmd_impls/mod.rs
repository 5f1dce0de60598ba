mod align;
mod answer;
pub mod args;
mod mcq;
mod nii2png;
mod smileys;
mod utils;
