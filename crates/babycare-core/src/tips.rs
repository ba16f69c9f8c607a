//! Age-appropriate parenting tips.
//!
//! A static catalog of four age bands with four tips each. Which tip is
//! showing is tracked by a [`TipCursor`] owned by the caller's session, so
//! separate sessions never share a position.

use std::fmt;

use serde::Serialize;

use crate::age::age_in_months;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Sleep,
    Feeding,
    Development,
    Behavior,
}

impl TipCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TipCategory::Sleep => "sleep",
            TipCategory::Feeding => "feeding",
            TipCategory::Development => "development",
            TipCategory::Behavior => "behavior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub body: &'static str,
    pub category: TipCategory,
}

const fn tip(title: &'static str, body: &'static str, category: TipCategory) -> Tip {
    Tip {
        title,
        body,
        category,
    }
}

static NEWBORN_TIPS: [Tip; 4] = [
    tip(
        "Newborn Sleep",
        "Newborns sleep 14-17 hours per day in short bursts. This is completely normal!",
        TipCategory::Sleep,
    ),
    tip(
        "Feeding Frequency",
        "Breastfed babies typically feed every 2-3 hours, while formula-fed babies may go 3-4 hours.",
        TipCategory::Feeding,
    ),
    tip(
        "Tummy Time",
        "Start with 2-3 minutes of tummy time several times a day to strengthen neck muscles.",
        TipCategory::Development,
    ),
    tip(
        "Crying is Normal",
        "Babies cry 1-3 hours per day on average. Peak crying usually occurs around 6 weeks.",
        TipCategory::Behavior,
    ),
];

static EARLY_INFANT_TIPS: [Tip; 4] = [
    tip(
        "Social Smiles",
        "Around 6-8 weeks, your baby will start smiling in response to your voice and face.",
        TipCategory::Development,
    ),
    tip(
        "Longer Sleep Stretches",
        "By 2-3 months, many babies can sleep for 4-6 hour stretches at night.",
        TipCategory::Sleep,
    ),
    tip(
        "Increased Tummy Time",
        "Gradually increase tummy time to 15-20 minutes per day to build strength.",
        TipCategory::Development,
    ),
    tip(
        "Growth Spurts",
        "Expect growth spurts around 2-3 weeks, 6 weeks, and 3 months with increased feeding.",
        TipCategory::Feeding,
    ),
];

static INFANT_TIPS: [Tip; 4] = [
    tip(
        "Rolling Over",
        "Most babies start rolling from tummy to back around 4 months, then back to tummy.",
        TipCategory::Development,
    ),
    tip(
        "Sleep Regression",
        "The 4-month sleep regression is common as sleep patterns mature. Stay consistent!",
        TipCategory::Sleep,
    ),
    tip(
        "Introducing Solids",
        "Around 6 months, look for signs of readiness: sitting up, showing interest in food.",
        TipCategory::Feeding,
    ),
    tip(
        "Babbling Begins",
        "Your baby will start making consonant sounds like 'ba-ba' and 'da-da' around 4-6 months.",
        TipCategory::Development,
    ),
];

static OLDER_INFANT_TIPS: [Tip; 4] = [
    tip(
        "Sitting Up",
        "Most babies can sit without support by 6-8 months. Provide a safe space to practice.",
        TipCategory::Development,
    ),
    tip(
        "Solid Food Exploration",
        "Let your baby explore different textures and flavors. Mess is part of learning!",
        TipCategory::Feeding,
    ),
    tip(
        "Stranger Anxiety",
        "Stranger anxiety around 6-12 months is a normal sign of healthy attachment.",
        TipCategory::Behavior,
    ),
    tip(
        "Crawling Preparation",
        "Encourage crawling by placing toys just out of reach during tummy time.",
        TipCategory::Development,
    ),
];

/// Age band of the tip catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipBand {
    /// Under 30 days
    Newborn,
    /// 30 to 89 days
    EarlyInfant,
    /// 90 to 179 days
    Infant,
    /// 180 days and up
    OlderInfant,
}

impl TipBand {
    /// Checked in ascending threshold order; the first match wins.
    pub fn for_age(age_in_days: u32) -> Self {
        if age_in_days < 30 {
            TipBand::Newborn
        } else if age_in_days < 90 {
            TipBand::EarlyInfant
        } else if age_in_days < 180 {
            TipBand::Infant
        } else {
            TipBand::OlderInfant
        }
    }

    pub fn tips(&self) -> &'static [Tip] {
        match self {
            TipBand::Newborn => &NEWBORN_TIPS,
            TipBand::EarlyInfant => &EARLY_INFANT_TIPS,
            TipBand::Infant => &INFANT_TIPS,
            TipBand::OlderInfant => &OLDER_INFANT_TIPS,
        }
    }
}

/// Tips for a baby of the given age.
pub fn tips_for_age(age_in_days: u32) -> &'static [Tip] {
    TipBand::for_age(age_in_days).tips()
}

/// Session-scoped position in the tip list.
///
/// Starts at 0 and resets whenever a different baby is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TipCursor {
    baby_id: Option<String>,
    index: usize,
}

impl TipCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn baby_id(&self) -> Option<&str> {
        self.baby_id.as_deref()
    }

    /// Point the cursor at `baby_id`; switching babies resets it to the first tip.
    pub fn select_baby(&mut self, baby_id: &str) {
        if self.baby_id.as_deref() != Some(baby_id) {
            self.baby_id = Some(baby_id.to_string());
            self.index = 0;
        }
    }

    /// Advance to the next tip of the baby's band, wrapping around.
    pub fn next(&mut self, age_in_days: u32) -> TipView {
        let len = tips_for_age(age_in_days).len();
        self.index = (self.index + 1) % len;
        self.current(age_in_days)
    }

    pub fn current(&self, age_in_days: u32) -> TipView {
        let tips = tips_for_age(age_in_days);
        let position = self.index % tips.len();
        TipView {
            tip: tips[position],
            position: position + 1,
            total: tips.len(),
            age_in_months: age_in_months(age_in_days),
        }
    }
}

/// The tip on screen plus its footer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TipView {
    pub tip: Tip,
    /// 1-based
    pub position: usize,
    pub total: usize,
    pub age_in_months: u32,
}

impl fmt::Display for TipView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.tip.title, self.tip.category.name())?;
        writeln!(f, "{}", self.tip.body)?;
        write!(
            f,
            "Tip {} of {} | Age: {} months",
            self.position, self.total, self.age_in_months
        )
    }
}
