//! Reader for recorded-sale exports.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use time::{macros::format_description, Date};

use crate::domain::DealRecord;

#[derive(Debug, Error)]
pub enum DealLoadError {
    #[error("failed to read deal file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed deal file: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("deal #{index} ({name}): {reason}")]
    InvalidRecord {
        index: usize,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DealDto {
    name: String,
    deal_date: String,
    deal_price: f64,
    area_m2: f64,
}

impl DealDto {
    fn into_record(self, index: usize) -> Result<DealRecord, DealLoadError> {
        let invalid = |reason: String| DealLoadError::InvalidRecord {
            index,
            name: self.name.clone(),
            reason,
        };

        let deal_date = Date::parse(&self.deal_date, format_description!("[year]-[month]-[day]"))
            .map_err(|err| invalid(format!("bad deal_date {:?}: {err}", self.deal_date)))?;
        if !self.deal_price.is_finite() || self.deal_price <= 0.0 {
            return Err(invalid(format!("deal_price must be positive, got {}", self.deal_price)));
        }
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(invalid(format!("area_m2 must be positive, got {}", self.area_m2)));
        }

        Ok(DealRecord {
            complex_name: self.name,
            deal_date,
            deal_price: self.deal_price,
            area_m2: self.area_m2,
        })
    }
}

/// Parses a JSON array of deals, rejecting the whole batch on the first bad record.
pub fn parse_deals(json: &str) -> Result<Vec<DealRecord>, DealLoadError> {
    let dtos: Vec<DealDto> = serde_json::from_str(json)?;
    dtos.into_iter()
        .enumerate()
        .map(|(index, dto)| dto.into_record(index))
        .collect()
}

pub fn load_deals(path: &Path) -> Result<Vec<DealRecord>, DealLoadError> {
    let data = fs::read_to_string(path)?;
    let deals = parse_deals(&data)?;
    tracing::debug!(path = %path.display(), count = deals.len(), "loaded deal records");
    Ok(deals)
}
