//! Reliability score of a single answered probe.
//!
//! The score is the capped sum of three independent components:
//!
//! | component    | rule                                   | points |
//! |--------------|----------------------------------------|--------|
//! | availability | 200 / other 2xx / 401 / anything else  | 50 / 40 / 10 / 0 |
//! | performance  | <0.5s / <1s / <2s / slower             | 30 / 20 / 10 / 0 |
//! | consistency  | valid format / invalid                 | 20 / 0 |

pub const MAX_SCORE: u8 = 100;

pub fn availability_score(status: u16) -> u8 {
    match status {
        200 => 50,
        201..=299 => 40,
        401 => 10,
        _ => 0,
    }
}

pub fn performance_score(response_time: f64) -> u8 {
    if response_time < 0.5 {
        30
    } else if response_time < 1.0 {
        20
    } else if response_time < 2.0 {
        10
    } else {
        0
    }
}

pub fn consistency_score(valid_format: bool) -> u8 {
    if valid_format { 20 } else { 0 }
}

/// Composite reliability score in `0..=100`
pub fn calculate_score(status: u16, response_time: f64, valid_format: bool) -> u8 {
    let total = availability_score(status) + performance_score(response_time) + consistency_score(valid_format);
    total.min(MAX_SCORE)
}
