use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `gratitudes` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Gratitude {
    pub id: i32,
    pub thankful_for: String,
    pub did_well: String,
    pub achieve: String,
    pub soc: String,
    pub author_id: i32,
    pub date_created: DateTime<Utc>,
}

/// Insert payload; `id` and `date_created` come from the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewGratitude {
    pub thankful_for: String,
    pub did_well: String,
    pub achieve: String,
    pub soc: String,
    pub author_id: i32,
}

/// Partial update; `None` columns are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GratitudeUpdate {
    pub thankful_for: Option<String>,
    pub did_well: Option<String>,
    pub achieve: Option<String>,
    pub soc: Option<String>,
}

impl GratitudeUpdate {
    /// Column/value pairs that are actually being set, in table order
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        [
            ("thankful_for", &self.thankful_for),
            ("did_well", &self.did_well),
            ("achieve", &self.achieve),
            ("soc", &self.soc),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    pub fn apply_to(&self, gratitude: &mut Gratitude) {
        if let Some(v) = &self.thankful_for {
            gratitude.thankful_for = v.clone();
        }
        if let Some(v) = &self.did_well {
            gratitude.did_well = v.clone();
        }
        if let Some(v) = &self.achieve {
            gratitude.achieve = v.clone();
        }
        if let Some(v) = &self.soc {
            gratitude.soc = v.clone();
        }
    }
}
