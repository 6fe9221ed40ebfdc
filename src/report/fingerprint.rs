use crate::sample::Observation;
use sha2::{Digest, Sha256};

/// Hex SHA-256 over the fields the analysis reads from each observation
///
/// Row order is significant: the same rows in a different order hash
/// differently, matching the positional quartile and quintile passes.
pub fn sample_fingerprint(observations: &[Observation]) -> String {
    let mut h = Sha256::new();
    h.update((observations.len() as u64).to_le_bytes());
    for obs in observations {
        h.update(obs.period_id.to_le_bytes());
        h.update(obs.company_id.to_le_bytes());
        for value in [
            obs.tdr_change,
            obs.composite_velocity,
            obs.development_speed,
            obs.commit_velocity,
            obs.code_churn,
            obs.author_activity,
            obs.funding_growth_rate,
            obs.company_age_months,
            obs.team_size,
            obs.quality_score.unwrap_or(f64::NAN),
        ] {
            h.update(value.to_bits().to_le_bytes());
        }
        h.update(obs.period_days.to_le_bytes());
        h.update(obs.round_number.to_le_bytes());
        h.update([u8::from(obs.got_next_round)]);
        h.update((obs.industry.len() as u64).to_le_bytes());
        h.update(obs.industry.as_bytes());
    }
    hex::encode(h.finalize())
}
