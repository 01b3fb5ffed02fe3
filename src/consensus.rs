use crate::clock::Clock;
use crate::regional;
use crate::types::{CommunityReport, Confidence, ConsensusQuote};
use chrono::Duration;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const RECENCY_WINDOW_DAYS: i64 = 30;

/// Report set grouped by (service, country). Reports are simulated in this
/// implementation; submissions are acknowledged but never stored.
pub struct ReportBoard {
    reports: HashMap<(String, String), Vec<CommunityReport>>,
    clock: Arc<dyn Clock>,
}

/// (reported_by, price, plan, days_ago, verified)
type SeedRow = (&'static str, f64, &'static str, i64, bool);
const SIMULATED_REPORTS: &[(&str, &str, &[SeedRow])] = &[
    (
        "Netflix",
        "US",
        &[
            ("user123", 15.49, "Standard", 1, true),
            ("user456", 15.49, "Standard", 2, true),
            ("user789", 15.49, "Standard", 3, false),
        ],
    ),
    (
        "Netflix",
        "CA",
        &[
            ("user_ca1", 16.49, "Standard", 1, true),
            ("user_ca2", 16.49, "Standard", 2, true),
        ],
    ),
    (
        "Netflix",
        "GB",
        &[
            ("user_uk1", 10.99, "Standard", 1, true),
            ("user_uk2", 10.99, "Standard", 4, true),
        ],
    ),
    (
        "Netflix",
        "IN",
        &[
            ("user_in1", 649.0, "Premium", 1, true),
            ("user_in2", 649.0, "Premium", 2, true),
        ],
    ),
    (
        "Disney+",
        "US",
        &[
            ("disney_fan1", 7.99, "Basic", 1, true),
            ("disney_fan2", 7.99, "Basic", 2, true),
        ],
    ),
    ("Disney+", "CA", &[("ca_disney", 11.99, "Basic", 1, true)]),
    ("Disney+", "IN", &[("india_disney", 299.0, "Super", 1, true)]),
    (
        "Spotify",
        "US",
        &[
            ("music_lover", 10.99, "Individual", 1, true),
            ("spotify_user", 10.99, "Individual", 2, true),
        ],
    ),
    (
        "Spotify",
        "IN",
        &[
            ("india_user1", 119.0, "Individual", 1, true),
            ("india_user2", 119.0, "Individual", 3, false),
        ],
    ),
    ("Spotify", "BR", &[("brazil_user1", 19.9, "Individual", 1, true)]),
    ("Apple Music", "US", &[("apple_fan", 10.99, "Individual", 1, true)]),
    ("Apple Music", "IN", &[("india_apple", 99.0, "Individual", 1, true)]),
    (
        "YouTube Premium",
        "US",
        &[("youtube_user", 13.99, "Individual", 1, true)],
    ),
    ("YouTube Premium", "IN", &[("india_yt", 129.0, "Individual", 1, true)]),
];

impl ReportBoard {
    /// The simulated board: seed timestamps are offsets from the injected
    /// clock so the recency filter behaves as if reports accrue over time.
    pub fn simulated(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let mut reports: HashMap<(String, String), Vec<CommunityReport>> = HashMap::new();

        for (service, country, rows) in SIMULATED_REPORTS {
            let entries = rows
                .iter()
                .map(|(reported_by, price, plan, days_ago, verified)| CommunityReport {
                    price: *price,
                    plan: (*plan).to_string(),
                    reported_by: (*reported_by).to_string(),
                    reported_at: now - Duration::days(*days_ago),
                    verified: *verified,
                })
                .collect();
            reports.insert((service.to_string(), country.to_string()), entries);
        }

        Self { reports, clock }
    }

    #[cfg(test)]
    pub(crate) fn with_reports(
        service: &str,
        country: &str,
        entries: Vec<CommunityReport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut reports = HashMap::new();
        reports.insert((service.to_string(), country.to_string()), entries);
        Self { reports, clock }
    }

    /// Consensus over the reports for one (service, country) pair: recent
    /// reports only, verified ones preferred, modal price with ties resolved
    /// to the lowest price.
    pub fn consensus(&self, service: &str, country: &str) -> Option<ConsensusQuote> {
        let reports = self
            .reports
            .get(&(service.to_string(), country.to_string()))?;

        let now = self.clock.now();
        let cutoff = now - Duration::days(RECENCY_WINDOW_DAYS);
        let recent: Vec<&CommunityReport> =
            reports.iter().filter(|r| r.reported_at > cutoff).collect();
        if recent.is_empty() {
            return None;
        }

        let verified: Vec<&CommunityReport> =
            recent.iter().copied().filter(|r| r.verified).collect();
        let selected = if verified.is_empty() { recent } else { verified };

        // Count occurrences in cent-precision buckets; ascending iteration
        // with a strict comparison hands ties to the lowest price.
        let mut frequency: BTreeMap<i64, usize> = BTreeMap::new();
        for report in &selected {
            *frequency.entry(to_cents(report.price)).or_insert(0) += 1;
        }
        let (consensus_cents, _) = frequency
            .iter()
            .fold(None, |best: Option<(i64, usize)>, (cents, count)| {
                match best {
                    Some((_, best_count)) if *count <= best_count => best,
                    _ => Some((*cents, *count)),
                }
            })?;

        let report_count = selected.len();
        let verified_count = selected.iter().filter(|r| r.verified).count();
        let verified_ratio = verified_count as f64 / report_count as f64;

        let confidence = if report_count >= 3 && verified_ratio >= 0.7 {
            Confidence::High
        } else if report_count >= 2 && verified_ratio >= 0.5 {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        Some(ConsensusQuote {
            currency: regional::currency_for_country(country).to_string(),
            price: consensus_cents as f64 / 100.0,
            plan: selected[0].plan.clone(),
            confidence,
            report_count,
            verified_count,
            last_updated: now,
        })
    }
}

fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::manual::ManualClock;

    fn report(price: f64, days_ago: i64, verified: bool, clock: &ManualClock) -> CommunityReport {
        CommunityReport {
            price,
            plan: "Standard".to_string(),
            reported_by: "tester".to_string(),
            reported_at: clock.now() - Duration::days(days_ago),
            verified,
        }
    }

    #[test]
    fn verified_subset_is_preferred_and_scored_on_its_own() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::with_reports(
            "Netflix",
            "US",
            vec![
                report(10.0, 1, true, &clock),
                report(10.0, 2, true, &clock),
                report(12.0, 3, false, &clock),
            ],
            clock.clone(),
        );

        // Three recent reports, but only the two verified ones are selected:
        // n=2, v=1.0 lands on medium, not high.
        let quote = board.consensus("Netflix", "US").unwrap();
        assert_eq!(quote.price, 10.0);
        assert_eq!(quote.confidence, Confidence::Medium);
        assert_eq!(quote.report_count, 2);
        assert_eq!(quote.verified_count, 2);
    }

    #[test]
    fn tied_counts_resolve_to_the_lowest_price() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::with_reports(
            "Netflix",
            "US",
            vec![report(12.0, 1, true, &clock), report(10.0, 2, true, &clock)],
            clock.clone(),
        );

        assert_eq!(board.consensus("Netflix", "US").unwrap().price, 10.0);
    }

    #[test]
    fn three_verified_reports_reach_high_confidence() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::with_reports(
            "Netflix",
            "US",
            vec![
                report(15.49, 1, true, &clock),
                report(15.49, 2, true, &clock),
                report(15.49, 3, true, &clock),
            ],
            clock.clone(),
        );

        assert_eq!(
            board.consensus("Netflix", "US").unwrap().confidence,
            Confidence::High
        );
    }

    #[test]
    fn unverified_reports_are_used_when_nothing_is_verified() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::with_reports(
            "Netflix",
            "US",
            vec![report(9.99, 1, false, &clock), report(9.99, 2, false, &clock)],
            clock.clone(),
        );

        let quote = board.consensus("Netflix", "US").unwrap();
        assert_eq!(quote.price, 9.99);
        assert_eq!(quote.confidence, Confidence::Low);
        assert_eq!(quote.verified_count, 0);
    }

    #[test]
    fn reports_older_than_thirty_days_are_ignored() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::with_reports(
            "Netflix",
            "US",
            vec![report(15.49, 31, true, &clock), report(15.49, 45, true, &clock)],
            clock.clone(),
        );

        assert!(board.consensus("Netflix", "US").is_none());
    }

    #[test]
    fn currency_comes_from_the_country_map_with_usd_fallback() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::simulated(clock.clone());

        assert_eq!(board.consensus("Spotify", "IN").unwrap().currency, "INR");
        assert!(board.consensus("Spotify", "JP").is_none());

        let unmapped = ReportBoard::with_reports(
            "Netflix",
            "ZZ",
            vec![report(8.0, 1, true, &clock)],
            clock.clone(),
        );
        assert_eq!(unmapped.consensus("Netflix", "ZZ").unwrap().currency, "USD");
    }

    #[test]
    fn simulated_board_matches_the_recorded_observations() {
        let clock = Arc::new(ManualClock::default_start());
        let board = ReportBoard::simulated(clock.clone());

        let netflix = board.consensus("Netflix", "US").unwrap();
        assert_eq!(netflix.price, 15.49);
        // Two verified out of three recent reports selected.
        assert_eq!(netflix.report_count, 2);
        assert_eq!(netflix.confidence, Confidence::Medium);

        assert!(board.consensus("Hulu", "US").is_none());
    }
}
