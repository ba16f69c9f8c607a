//! Cry classification contract.
//!
//! Classification itself lives behind [`CryClassifier`]; this crate ships
//! no model. What it owns is the shape of an assessment and the fixed
//! description and advice that go with each need.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};

/// What a cry most likely signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CryNeed {
    Hunger,
    Sleep,
    Discomfort,
    Attention,
    Pain,
}

impl CryNeed {
    pub const ALL: [CryNeed; 5] = [
        CryNeed::Hunger,
        CryNeed::Sleep,
        CryNeed::Discomfort,
        CryNeed::Attention,
        CryNeed::Pain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CryNeed::Hunger => "hunger",
            CryNeed::Sleep => "sleep",
            CryNeed::Discomfort => "discomfort",
            CryNeed::Attention => "attention",
            CryNeed::Pain => "pain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CryNeed::Hunger => "Baby is likely hungry. Consider feeding.",
            CryNeed::Sleep => "Baby seems tired. Try putting them down for a nap.",
            CryNeed::Discomfort => "Baby may be uncomfortable. Check diaper or clothing.",
            CryNeed::Attention => "Baby wants attention and interaction.",
            CryNeed::Pain => "Baby might be in pain. Monitor closely.",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            CryNeed::Hunger => &[
                "Offer breast or bottle feeding",
                "Check if it's been 2-3 hours since last feeding",
                "Look for hunger cues like rooting or sucking motions",
            ],
            CryNeed::Sleep => &[
                "Create a calm, dark environment",
                "Try swaddling or gentle rocking",
                "Check if baby has been awake for 1-2 hours",
            ],
            CryNeed::Discomfort => &[
                "Check and change diaper if needed",
                "Adjust room temperature",
                "Check for tight clothing or hair wrapped around fingers/toes",
            ],
            CryNeed::Attention => &[
                "Talk or sing to your baby",
                "Make eye contact and smile",
                "Try gentle play or tummy time",
            ],
            CryNeed::Pain => &[
                "Check for signs of illness or injury",
                "Consider gas or colic remedies",
                "Consult pediatrician if crying persists",
            ],
        }
    }
}

impl fmt::Display for CryNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CryNeed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ValidationError::invalid("need", format!("unknown cry need '{s}'")))
    }
}

/// A recorded audio clip handed to a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    /// e.g. "audio/webm"
    pub mime_type: String,
    pub duration_secs: u32,
}

/// Classifier output: the need, how sure it is, and what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryAssessment {
    pub need: CryNeed,
    /// 0.0..=1.0
    pub confidence: f64,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl CryAssessment {
    /// Assessment with the standard description and advice for `need`.
    ///
    /// # Errors
    /// Rejects a confidence that is not a finite value in 0.0..=1.0.
    pub fn new(need: CryNeed, confidence: f64) -> Result<Self, ValidationError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            need,
            confidence,
            description: need.description().to_string(),
            recommendations: need.recommendations().iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Confidence as a whole percentage, rounded to nearest.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Anything that can turn a recording into a [`CryAssessment`].
pub trait CryClassifier {
    /// Short identifier of the model or service.
    fn name(&self) -> &str;

    /// Classify one clip recorded for `baby_id`.
    ///
    /// # Errors
    /// Implementations report their own failures as
    /// [`CoreError::Classifier`](crate::error::CoreError::Classifier).
    fn classify(&self, baby_id: &str, clip: &AudioClip) -> Result<CryAssessment>;
}

/// A stored assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryAnalysis {
    pub id: String,
    pub baby_id: String,
    #[serde(flatten)]
    pub assessment: CryAssessment,
    pub created_at: DateTime<Utc>,
}

impl CryAnalysis {
    pub fn new(baby_id: &str, assessment: CryAssessment, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            baby_id: baby_id.to_string(),
            assessment,
            created_at: now,
        }
    }
}

/// Run `classifier` on `clip` and wrap the result as a new analysis.
///
/// # Errors
/// Propagates the classifier's error, and rejects an assessment whose
/// confidence is out of range.
pub fn analyze(
    classifier: &dyn CryClassifier,
    baby_id: &str,
    clip: &AudioClip,
    now: DateTime<Utc>,
) -> Result<CryAnalysis> {
    let assessment = classifier.classify(baby_id, clip)?;
    if !assessment.confidence.is_finite() || !(0.0..=1.0).contains(&assessment.confidence) {
        return Err(ValidationError::ConfidenceOutOfRange(assessment.confidence).into());
    }
    tracing::info!(
        classifier = classifier.name(),
        baby_id,
        need = %assessment.need,
        confidence = assessment.confidence,
        "cry classified"
    );
    Ok(CryAnalysis::new(baby_id, assessment, now))
}
