#![no_main]

use debtlens::linalg::{invert, Matrix};
use debtlens::regression::{regress, Controls};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes become f64 columns; NaN, infinities and extremes included
    let values: Vec<f64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect();

    let n = values.len() / 3;
    let (tdr, rest) = values.split_at(n);
    let (velocity, growth) = rest.split_at(n);
    let growth = &growth[..n];

    let controls = Controls {
        company_age_months: tdr.iter().map(|v| v.abs()).collect(),
        team_size: velocity.iter().map(|v| v.abs()).collect(),
        round_number: (0..n).map(|i| (i % 4) as f64 + 1.0).collect(),
        industry: (0..n).map(|i| format!("industry-{}", i % 3)).collect(),
    };

    // Must never panic
    let result = regress(tdr, velocity, growth, &controls);
    assert!((0.0..=1.0).contains(&result.p_value));

    let side = (values.len() as f64).sqrt() as usize;
    if side > 0 {
        let rows: Vec<Vec<f64>> = values[..side * side]
            .chunks(side)
            .map(|row| row.to_vec())
            .collect();
        if let Ok(m) = Matrix::from_rows(&rows) {
            let _ = invert(&m);
        }
    }
});
