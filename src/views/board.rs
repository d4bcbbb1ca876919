// Feature board for the prioritization view
//
// Features live only here, in memory. The RICE score is derived on every
// read and never stored, so an edit is reflected immediately.

use std::cmp::Ordering;

use crate::client::{Moscow, PrioritizedFeature};

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub reach: f64,
    pub impact: f64,
    /// Percentage, 0-100
    pub confidence: f64,
    pub effort: f64,
    pub moscow: Moscow,
    pub justification: Option<String>,
}

impl Feature {
    /// A new feature with the board's starting values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            reach: 100.0,
            impact: 1.0,
            confidence: 50.0,
            effort: 3.0,
            moscow: Moscow::Could,
            justification: None,
        }
    }

    /// reach × impact × (confidence / 100) / effort
    pub fn rice_score(&self) -> f64 {
        self.reach * self.impact * (self.confidence / 100.0) / self.effort
    }
}

/// Partial edit of a feature; `None` fields are left alone
#[derive(Debug, Clone, Default)]
pub struct FeatureUpdate {
    pub name: Option<String>,
    pub reach: Option<f64>,
    pub impact: Option<f64>,
    pub confidence: Option<f64>,
    pub effort: Option<f64>,
    pub moscow: Option<Moscow>,
}

/// Outcome of merging model scores into the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Local features that received scores
    pub updated: usize,
    /// Names returned by the model that match no local feature
    pub unmatched: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureBoard {
    features: Vec<Feature>,
}

impl FeatureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board a fresh prioritization view starts with
    pub fn with_defaults() -> Self {
        let seed = |id: &str,
                    name: &str,
                    reach: f64,
                    impact: f64,
                    confidence: f64,
                    effort: f64,
                    moscow: Moscow| Feature {
            id: id.to_string(),
            name: name.to_string(),
            reach,
            impact,
            confidence,
            effort,
            moscow,
            justification: None,
        };

        Self {
            features: vec![
                seed("1", "Export PDF", 500.0, 3.0, 80.0, 3.0, Moscow::Should),
                seed("2", "Intégration Slack", 300.0, 2.0, 90.0, 5.0, Moscow::Could),
                seed("3", "Sauvegarde auto", 800.0, 3.0, 95.0, 2.0, Moscow::Must),
                seed("4", "Filtres avancés", 200.0, 1.0, 70.0, 4.0, Moscow::Could),
                seed("5", "Mode hors-ligne", 100.0, 2.0, 50.0, 8.0, Moscow::Wont),
            ],
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Add a feature by name. Blank names are ignored.
    pub fn add(&mut self, name: &str) -> Option<&Feature> {
        if name.trim().is_empty() {
            return None;
        }
        self.features.push(Feature::new(name));
        self.features.last()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        self.features.len() != before
    }

    /// Apply an edit. Confidence is capped at 100 and effort floored at 1,
    /// as the edit controls do.
    pub fn update(&mut self, id: &str, update: FeatureUpdate) -> bool {
        let Some(feature) = self.features.iter_mut().find(|f| f.id == id) else {
            return false;
        };

        if let Some(name) = update.name {
            feature.name = name;
        }
        if let Some(reach) = update.reach {
            feature.reach = reach;
        }
        if let Some(impact) = update.impact {
            feature.impact = impact;
        }
        if let Some(confidence) = update.confidence {
            feature.confidence = confidence.min(100.0);
        }
        if let Some(effort) = update.effort {
            feature.effort = effort.max(1.0);
        }
        if let Some(moscow) = update.moscow {
            feature.moscow = moscow;
        }
        true
    }

    /// Names only, in board order: what gets sent for prioritization
    pub fn names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    /// Features with their current score, highest first. Ties keep board order.
    pub fn ranked_by_rice(&self) -> Vec<(&Feature, f64)> {
        let mut ranked: Vec<(&Feature, f64)> =
            self.features.iter().map(|f| (f, f.rice_score())).collect();
        ranked.sort_by(|a, b| compare_scores(b.1, a.1));
        ranked
    }

    /// Features grouped by MoSCoW category, every category present, in display order
    pub fn by_moscow(&self) -> Vec<(Moscow, Vec<&Feature>)> {
        Moscow::ORDER
            .iter()
            .map(|category| {
                let items = self
                    .features
                    .iter()
                    .filter(|f| f.moscow == *category)
                    .collect();
                (*category, items)
            })
            .collect()
    }

    /// Copy model scores onto local features whose name matches,
    /// ignoring case. Anything that does not match is left as is.
    pub fn merge_scores(&mut self, scored: &[PrioritizedFeature]) -> MergeReport {
        let mut report = MergeReport::default();

        for feature in &mut self.features {
            let key = feature.name.to_lowercase();
            if let Some(ai) = scored.iter().find(|s| s.name.to_lowercase() == key) {
                feature.reach = ai.reach;
                feature.impact = ai.impact;
                feature.confidence = ai.confidence;
                feature.effort = ai.effort;
                feature.moscow = ai.moscow;
                feature.justification = Some(ai.justification.clone());
                report.updated += 1;
            }
        }

        report.unmatched = scored
            .iter()
            .filter(|s| {
                let key = s.name.to_lowercase();
                !self.features.iter().any(|f| f.name.to_lowercase() == key)
            })
            .map(|s| s.name.clone())
            .collect();

        if !report.unmatched.is_empty() {
            tracing::debug!(unmatched = ?report.unmatched, "Scores returned for unknown features");
        }

        report
    }
}

/// Descending-friendly comparison that keeps NaN scores at the bottom
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}
