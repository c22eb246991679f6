//! Case files: a roster plus either a net estate or estate totals.

use std::path::Path;

use anyhow::{bail, Context};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use mirath::{EstateTotals, HeirCounts, HeirRecord, Locale, NetEstate, RosterBuilder};

/// A case as stored on disk, in YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaseFile {
    /// Case reference, for display only
    pub reference: Option<String>,
    pub net_estate: Option<Decimal>,
    pub estate: Option<EstateTotals>,
    /// Explicit heir records
    pub heirs: Vec<HeirRecord>,
    /// Head counts, used when no explicit heirs are given
    pub counts: Option<HeirCounts>,
}

impl CaseFile {
    /// Load from a file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading case file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let case = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {} as JSON", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing {} as YAML", path.display()))?
        };
        Ok(case)
    }

    /// Net estate, given directly or derived from the totals.
    pub fn net_estate(&self) -> anyhow::Result<Decimal> {
        match (self.net_estate, self.estate) {
            (Some(net), None) => Ok(net),
            (None, Some(totals)) => {
                let estate = NetEstate::derive(totals)?;
                info!(
                    after_debts = %estate.after_debts,
                    bequests = %estate.effective_bequests,
                    net = %estate.net,
                    "Net estate derived from totals"
                );
                Ok(estate.net)
            }
            (Some(_), Some(_)) => bail!("case file gives both net_estate and estate totals"),
            (None, None) => bail!("case file needs net_estate or estate totals"),
        }
    }

    /// Heir records, building them from counts when none are listed.
    pub fn roster(&self, locale: Locale) -> anyhow::Result<Vec<HeirRecord>> {
        match (&self.counts, self.heirs.is_empty()) {
            (Some(_), false) => bail!("case file gives both heirs and counts"),
            (Some(counts), true) => Ok(RosterBuilder::new(locale).add_counts(counts).build()),
            (None, _) => Ok(self.heirs.clone()),
        }
    }
}
