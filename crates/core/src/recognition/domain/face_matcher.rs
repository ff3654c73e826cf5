//! Pixel-distance face identification against a [`Gallery`].
//!
//! There is no embedding: a probe crop and each reference crop (resized to
//! the probe's size) are compared by the Euclidean norm of their byte-wise
//! difference. The first gallery entry that qualifies wins, so results
//! depend on gallery order.

use crate::recognition::domain::gallery::Gallery;
use crate::shared::constants::UNKNOWN_LABEL;
use crate::shared::frame::Frame;

/// What counts as a match for a given distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// `distance < tolerance`: close crops are the same face.
    #[default]
    WithinTolerance,
    /// `distance > tolerance`: the inverted comparison, where any
    /// sufficiently *different* entry matches. Kept for compatibility.
    BeyondTolerance,
}

impl MatchPolicy {
    pub fn accepts(&self, distance: f64, tolerance: f64) -> bool {
        match self {
            MatchPolicy::WithinTolerance => distance < tolerance,
            MatchPolicy::BeyondTolerance => distance > tolerance,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Identity {
    Known { label: String, distance: f64 },
    Unknown,
}

impl Identity {
    pub fn label(&self) -> &str {
        match self {
            Identity::Known { label, .. } => label,
            Identity::Unknown => UNKNOWN_LABEL,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Identity::Known { .. })
    }
}

pub struct FaceMatcher {
    tolerance: f64,
    policy: MatchPolicy,
}

impl FaceMatcher {
    pub fn new(tolerance: f64, policy: MatchPolicy) -> Self {
        if policy == MatchPolicy::BeyondTolerance {
            log::warn!("Face matching uses the inverted (beyond-tolerance) comparison");
        }
        Self { tolerance, policy }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Labels `probe` with the first gallery entry the policy accepts.
    pub fn identify(&self, probe: &Frame, gallery: &Gallery) -> Identity {
        if probe.is_empty() {
            return Identity::Unknown;
        }
        for entry in gallery.entries() {
            let distance = pixel_distance(probe, &entry.crop);
            if self.policy.accepts(distance, self.tolerance) {
                return Identity::Known {
                    label: entry.label.clone(),
                    distance,
                };
            }
        }
        Identity::Unknown
    }
}

/// L2 norm of `probe - reference` over every channel byte, with
/// `reference` resized to the probe's dimensions first.
pub fn pixel_distance(probe: &Frame, reference: &Frame) -> f64 {
    let resized;
    let reference = if reference.width() == probe.width() && reference.height() == probe.height() {
        reference
    } else {
        resized = reference.resized(probe.width(), probe.height());
        &resized
    };

    probe
        .data()
        .iter()
        .zip(reference.data())
        .map(|(&a, &b)| {
            let d = a as f64 - b as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
