//! Output formatting for distributions.

use clap::ValueEnum;
use serde::Serialize;

use mirath::{Distribution, HeirRecord, Locale};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Yaml,
}

/// One row of a rendered report.
#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a str,
    name: &'a str,
    relationship: &'a str,
    #[serde(flatten)]
    record: &'a mirath::ShareRecord,
}

/// A distribution paired with the roster it was computed for.
#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
    net_estate: rust_decimal::Decimal,
    reconciliation: mirath::Reconciliation,
    common_denominator: &'a str,
    fingerprint: &'a str,
    heirs: Vec<Row<'a>>,
}

fn report<'a>(
    dist: &'a Distribution,
    heirs: &'a [HeirRecord],
    reference: Option<&'a str>,
) -> Report<'a> {
    let rows = heirs
        .iter()
        .filter_map(|heir| {
            dist.get(&heir.id).map(|record| Row {
                id: &heir.id,
                name: &heir.name,
                relationship: heir.relationship.code(),
                record,
            })
        })
        .collect();

    Report {
        reference,
        net_estate: dist.net_estate,
        reconciliation: dist.reconciliation,
        common_denominator: &dist.common_denominator,
        fingerprint: &dist.fingerprint,
        heirs: rows,
    }
}

/// Render a distribution in the chosen format.
pub fn render(
    dist: &Distribution,
    heirs: &[HeirRecord],
    reference: Option<&str>,
    format: Format,
    locale: Locale,
) -> anyhow::Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&report(dist, heirs, reference))?),
        Format::Yaml => Ok(serde_yaml::to_string(&report(dist, heirs, reference))?),
        Format::Table => Ok(format_table(dist, heirs, reference, locale)),
    }
}

fn format_table(
    dist: &Distribution,
    heirs: &[HeirRecord],
    reference: Option<&str>,
    locale: Locale,
) -> String {
    let mut output = String::new();
    match reference {
        Some(reference) => output.push_str(&format!("Distribution for case {}\n", reference)),
        None => output.push_str("Distribution\n"),
    }
    output.push_str("============\n\n");
    output.push_str(&format!("Net estate:     {}\n", dist.net_estate));
    output.push_str(&format!("Reconciliation: {:?}\n", dist.reconciliation));
    output.push_str(&format!("Base:           {}\n\n", dist.common_denominator));

    for heir in heirs {
        let Some(record) = dist.get(&heir.id) else {
            continue;
        };
        output.push_str(&format!(
            "[{}] {} ({})\n     {} | {} | {}% | {}\n",
            heir.id,
            heir.name,
            locale.relationship(heir.relationship),
            record.fraction_label,
            record.raw_share,
            record.percentage,
            record.monetary_value
        ));
        if let Some(reason) = &record.blocking_reason {
            output.push_str(&format!("     {}\n", reason));
        }
    }

    output.push_str(&format!("\nTotal: {}\n", dist.total_value()));
    output.push_str(&format!("Fingerprint: {}\n", dist.fingerprint));
    output
}

/// Listing of every accepted relationship code.
pub fn format_relationships() -> String {
    let mut output = String::new();
    output.push_str("Relationships\n");
    output.push_str("=============\n\n");
    for rel in mirath::Relationship::ALL {
        output.push_str(&format!(
            "{:<24} {:<32} {}\n",
            rel.code(),
            rel.english_name(),
            rel.arabic_name()
        ));
    }
    output
}
