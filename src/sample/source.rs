// Upstream record lookup and scatter/gather enrichment
//
// Joining a velocity period to its company and funding rounds is the only
// step that may touch an external store. Lookups for different periods are
// independent, so they are fanned out over scoped threads and gathered back
// in input order. A failed lookup degrades that row (absent fields) instead
// of aborting the batch.

use crate::records::{Company, Dataset, FundingRound, VelocityPeriod};
use anyhow::Result;
use fnv::FnvHashMap;

/// Read-only access to upstream records
pub trait RecordSource {
    fn company(&self, id: i64) -> Result<Option<Company>>;

    fn funding_round(&self, id: i64) -> Result<Option<FundingRound>>;

    /// All rounds of a company, in any order
    fn rounds_for_company(&self, company_id: i64) -> Result<Vec<FundingRound>>;
}

/// `RecordSource` over a fully loaded [`Dataset`]
#[derive(Debug)]
pub struct InMemorySource<'a> {
    companies: FnvHashMap<i64, &'a Company>,
    rounds: FnvHashMap<i64, &'a FundingRound>,
    rounds_by_company: FnvHashMap<i64, Vec<&'a FundingRound>>,
}

impl<'a> InMemorySource<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let companies = dataset.companies.iter().map(|c| (c.id, c)).collect();
        let rounds = dataset.funding_rounds.iter().map(|r| (r.id, r)).collect();

        let mut rounds_by_company: FnvHashMap<i64, Vec<&'a FundingRound>> =
            FnvHashMap::default();
        for round in &dataset.funding_rounds {
            rounds_by_company
                .entry(round.company_id)
                .or_default()
                .push(round);
        }

        Self {
            companies,
            rounds,
            rounds_by_company,
        }
    }
}

impl RecordSource for InMemorySource<'_> {
    fn company(&self, id: i64) -> Result<Option<Company>> {
        Ok(self.companies.get(&id).map(|c| (*c).clone()))
    }

    fn funding_round(&self, id: i64) -> Result<Option<FundingRound>> {
        Ok(self.rounds.get(&id).map(|r| (*r).clone()))
    }

    fn rounds_for_company(&self, company_id: i64) -> Result<Vec<FundingRound>> {
        Ok(self
            .rounds_by_company
            .get(&company_id)
            .map(|rounds| rounds.iter().map(|r| (*r).clone()).collect())
            .unwrap_or_default())
    }
}

/// A velocity period joined with whatever upstream records could be fetched
#[derive(Debug, Clone)]
pub struct EnrichedPeriod<'a> {
    pub period: &'a VelocityPeriod,
    pub company: Option<Company>,
    pub from_round: Option<FundingRound>,
    pub to_round: Option<FundingRound>,
    pub company_rounds: Vec<FundingRound>,
}

impl<'a> EnrichedPeriod<'a> {
    /// Period with no upstream information attached
    pub fn bare(period: &'a VelocityPeriod) -> Self {
        Self {
            period,
            company: None,
            from_round: None,
            to_round: None,
            company_rounds: Vec::new(),
        }
    }
}

fn fetch_or_absent<T: Default>(what: &str, period_id: i64, fetched: Result<T>) -> T {
    fetched.unwrap_or_else(|e| {
        tracing::warn!("Failed to fetch {} for period {}: {}", what, period_id, e);
        T::default()
    })
}

fn enrich_one<'a, S: RecordSource + ?Sized>(
    period: &'a VelocityPeriod,
    source: &S,
) -> EnrichedPeriod<'a> {
    let company = fetch_or_absent("company", period.id, source.company(period.company_id));
    let from_round = match period.from_round_id {
        Some(id) => fetch_or_absent("from round", period.id, source.funding_round(id)),
        None => None,
    };
    let to_round = match period.to_round_id {
        Some(id) => fetch_or_absent("to round", period.id, source.funding_round(id)),
        None => None,
    };
    let company_rounds = fetch_or_absent(
        "company rounds",
        period.id,
        source.rounds_for_company(period.company_id),
    );

    EnrichedPeriod {
        period,
        company,
        from_round,
        to_round,
        company_rounds,
    }
}

/// Enrich every period, fanning lookups out over `workers` scoped threads
///
/// Output order matches input order. Results become visible only after all
/// workers finish.
pub fn enrich_periods<'a, S: RecordSource + Sync + ?Sized>(
    periods: &'a [VelocityPeriod],
    source: &S,
    workers: usize,
) -> Vec<EnrichedPeriod<'a>> {
    if periods.is_empty() {
        return Vec::new();
    }

    let workers = workers.max(1);
    if workers == 1 {
        return periods.iter().map(|p| enrich_one(p, source)).collect();
    }

    let chunk_size = periods.len().div_ceil(workers);
    let gathered = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = periods
            .chunks(chunk_size)
            .map(|chunk| {
                let handle = scope.spawn(move |_| {
                    chunk
                        .iter()
                        .map(|p| enrich_one(p, source))
                        .collect::<Vec<_>>()
                });
                (chunk, handle)
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(chunk, handle)| {
                handle.join().unwrap_or_else(|_| {
                    tracing::warn!(
                        "Enrichment worker panicked; {} periods kept without upstream data",
                        chunk.len()
                    );
                    chunk.iter().map(EnrichedPeriod::bare).collect()
                })
            })
            .collect::<Vec<_>>()
    });

    gathered.unwrap_or_else(|_| {
        tracing::warn!("Enrichment scope failed; periods kept without upstream data");
        periods.iter().map(EnrichedPeriod::bare).collect()
    })
}
