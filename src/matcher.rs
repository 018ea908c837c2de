//! Fuzzy matching of a geocoded place against check-in service results.
//!
//! A reference place (name and coordinate) is compared against each
//! candidate on two axes: great-circle distance and the edit distance
//! between normalized names. Candidates are sorted nearest first and then
//! dropped into one of three buckets by an ordered rule list:
//!
//! | kind  | distance            | edits                   |
//! |-------|---------------------|-------------------------|
//! | exact | `< 0.01 km`         | `<= 2`                  |
//! | good  | `< 0.03 km`         | `<= 5`                  |
//! | bad   | anything else       |                         |
//!
//! ```rust
//! use mapcore::{CandidatePlace, GeoPoint, Place, PlaceMatcher};
//!
//! let park = GeoPoint::new(40.785091, -73.968285);
//! let reference = Place::new("Central Park", park);
//! let candidates = vec![
//!     CandidatePlace::new("Completely Different", GeoPoint::new(40.83, -73.968285)),
//!     CandidatePlace::new("central  park", park),
//! ];
//!
//! let matches = PlaceMatcher::new().match_places(&reference, candidates)?;
//! assert_eq!(matches.exact.len(), 1);
//! assert_eq!(matches.bad.len(), 1);
//! assert_eq!(matches.sole_exact().unwrap().name, "central  park");
//! # Ok::<(), mapcore::MapcoreError>(())
//! ```

use crate::compute::distance::{DistanceMetric, distance_km};
use crate::compute::levenshtein::{levenshtein, normalize_name};
use crate::compute::validation::{validate_candidates, validate_place};
use crate::config::{Config, MatchThresholds};
use crate::error::Result;
use mapcore_types::place::{CandidatePlace, Place};
use serde::{Deserialize, Serialize};

/// How confidently a candidate corresponds to the reference place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Bad,
    Good,
    Exact,
}

/// The measurements behind one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub kind: MatchKind,
    pub distance_km: f64,
    /// Edit distance between the normalized names
    pub edit_distance: usize,
}

/// Candidates partitioned by match kind, each bucket nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBucket {
    pub exact: Vec<CandidatePlace>,
    pub good: Vec<CandidatePlace>,
    pub bad: Vec<CandidatePlace>,
}

impl MatchBucket {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: MatchKind, place: CandidatePlace) {
        match kind {
            MatchKind::Exact => self.exact.push(place),
            MatchKind::Good => self.good.push(place),
            MatchKind::Bad => self.bad.push(place),
        }
    }

    pub fn bucket(&self, kind: MatchKind) -> &[CandidatePlace] {
        match kind {
            MatchKind::Exact => &self.exact,
            MatchKind::Good => &self.good,
            MatchKind::Bad => &self.bad,
        }
    }

    /// Total number of candidates across the three buckets.
    pub fn len(&self) -> usize {
        self.exact.len() + self.good.len() + self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The exact match when there is exactly one.
    ///
    /// A check-in flow can select such a place without asking; with zero or
    /// several exact matches the user has to pick from the list.
    pub fn sole_exact(&self) -> Option<&CandidatePlace> {
        match self.exact.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Exact matches, then good, then bad.
    pub fn iter(&self) -> impl Iterator<Item = (MatchKind, &CandidatePlace)> {
        self.exact
            .iter()
            .map(|p| (MatchKind::Exact, p))
            .chain(self.good.iter().map(|p| (MatchKind::Good, p)))
            .chain(self.bad.iter().map(|p| (MatchKind::Bad, p)))
    }

    /// Flatten into presentation order: exact, good, bad.
    pub fn into_vec(self) -> Vec<CandidatePlace> {
        let mut all = self.exact;
        all.extend(self.good);
        all.extend(self.bad);
        all
    }
}

/// Classifies candidate places against a reference place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaceMatcher {
    thresholds: MatchThresholds,
    metric: DistanceMetric,
}

impl PlaceMatcher {
    /// Matcher with the default thresholds and haversine distances.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.matcher.validate()?;
        Ok(Self {
            thresholds: config.matcher,
            metric: config.distance_metric,
        })
    }

    /// Replace the rule thresholds; they are validated when matching.
    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Apply the ordered rule list; the first rule that holds wins.
    pub fn kind_of(&self, distance_km: f64, edit_distance: usize) -> MatchKind {
        let t = &self.thresholds;
        if distance_km < t.exact_distance_km && edit_distance <= t.exact_max_edits {
            MatchKind::Exact
        } else if distance_km < t.good_distance_km && edit_distance <= t.good_max_edits {
            MatchKind::Good
        } else {
            MatchKind::Bad
        }
    }

    /// Score a single candidate against the reference.
    pub fn score(&self, reference: &Place, candidate: &CandidatePlace) -> Result<MatchScore> {
        self.thresholds.validate()?;
        validate_place(reference)?;
        validate_candidates(std::slice::from_ref(candidate))?;
        Ok(self.score_normalized(reference, &normalize_name(&reference.name), candidate))
    }

    fn score_normalized(
        &self,
        reference: &Place,
        reference_name: &str,
        candidate: &CandidatePlace,
    ) -> MatchScore {
        let distance = distance_km(&reference.location, &candidate.location, self.metric);
        let edits = levenshtein(reference_name, &normalize_name(&candidate.name));
        MatchScore {
            kind: self.kind_of(distance, edits),
            distance_km: distance,
            edit_distance: edits,
        }
    }

    /// Score every candidate and return them nearest first.
    ///
    /// The sort is stable: candidates at equal distance keep their input
    /// order.
    pub fn rank(
        &self,
        reference: &Place,
        candidates: impl IntoIterator<Item = CandidatePlace>,
    ) -> Result<Vec<(CandidatePlace, MatchScore)>> {
        let candidates: Vec<CandidatePlace> = candidates.into_iter().collect();

        if let Err(e) = self
            .thresholds
            .validate()
            .and_then(|_| validate_place(reference))
            .and_then(|_| validate_candidates(&candidates))
        {
            log::warn!("Rejecting place match: {}", e);
            return Err(e);
        }

        let reference_name = normalize_name(&reference.name);
        let mut scored: Vec<(CandidatePlace, MatchScore)> = candidates
            .into_iter()
            .map(|candidate| {
                let score = self.score_normalized(reference, &reference_name, &candidate);
                (candidate, score)
            })
            .collect();

        scored.sort_by(|a, b| a.1.distance_km.total_cmp(&b.1.distance_km));
        Ok(scored)
    }

    /// Partition candidates into exact, good and bad buckets.
    ///
    /// Every candidate lands in exactly one bucket, and each bucket is
    /// ordered by ascending distance from the reference.
    pub fn match_places(
        &self,
        reference: &Place,
        candidates: impl IntoIterator<Item = CandidatePlace>,
    ) -> Result<MatchBucket> {
        let mut result = MatchBucket::new();
        for (candidate, score) in self.rank(reference, candidates)? {
            result.push(score.kind, candidate);
        }

        log::debug!(
            "Matched {} candidates against '{}': {} exact, {} good, {} bad",
            result.len(),
            reference.name,
            result.exact.len(),
            result.good.len(),
            result.bad.len()
        );

        Ok(result)
    }
}

/// Match with the default thresholds and haversine distances.
pub fn match_places(
    reference: &Place,
    candidates: impl IntoIterator<Item = CandidatePlace>,
) -> Result<MatchBucket> {
    PlaceMatcher::new().match_places(reference, candidates)
}
