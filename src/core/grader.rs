// src/core/grader.rs

use crate::core::models::Grade;

/// Upper bound of the published risk score.
pub const MAX_SCORE: u8 = 100;

/// Clamps a raw accumulated score into `0..=100`.
pub fn clamp_score(raw: u32) -> u8 {
    raw.min(u32::from(MAX_SCORE)) as u8
}

/// Maps a clamped score to its grade. Higher scores mean more risk.
pub fn grade_for(score: u8) -> Grade {
    match score {
        80.. => Grade::F,
        60..=79 => Grade::D,
        40..=59 => Grade::C,
        20..=39 => Grade::B,
        _ => Grade::A,
    }
}
