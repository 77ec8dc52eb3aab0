/// Extraction: listing entries -> normalized rows
///
/// This module handles:
/// - Parsing the numeric id out of a listing URL
/// - Normalizing a detail record into a `Row`
/// - Building the table with per-item isolation (one bad entry never stops the batch)
use crate::api::{HttpGet, PokeApiClient};
use crate::error::{ExtractError, ParseError};
use crate::types::{DetailRecord, ListingEntry, Row};
use log::{debug, error, info};

/// A listing entry that could not be turned into a row
#[derive(Debug)]
pub struct ItemFailure {
    pub name: String,
    pub url: String,
    pub error: ExtractError,
}

/// Result of building a table: surviving rows in listing order, plus what was dropped
#[derive(Debug, Default)]
pub struct Extraction {
    pub rows: Vec<Row>,
    pub failures: Vec<ItemFailure>,
}

/// Parse the id from the second-to-last `/` segment of a listing URL
///
/// `https://pokeapi.co/api/v2/pokemon/25/` -> `25`
pub fn extract_id(url: &str) -> Result<i64, ParseError> {
    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 2 {
        return Err(ParseError::MissingSegment { url: url.to_string() });
    }

    let segment = segments[segments.len() - 2];
    segment
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidId { url: url.to_string(), segment: segment.to_string() })
}

/// Build a row from a detail record
///
/// The first occurrence of each tracked stat wins; a stat missing from the
/// record stays `None`. A record without types is rejected.
pub fn normalize(detail: &DetailRecord) -> Result<Row, ExtractError> {
    let base_experience =
        detail.base_experience.ok_or(ExtractError::Normalize { id: detail.id, field: "base_experience" })?;
    if detail.types.is_empty() {
        return Err(ExtractError::Normalize { id: detail.id, field: "types" });
    }

    let mut hp = None;
    let mut attack = None;
    let mut defense = None;
    for slot in &detail.stats {
        let target = match slot.stat.name.as_str() {
            "hp" => &mut hp,
            "attack" => &mut attack,
            "defense" => &mut defense,
            _ => continue,
        };
        if target.is_none() {
            *target = Some(slot.base_stat);
        }
    }

    Ok(Row {
        id: detail.id,
        name: title_case(&detail.name),
        base_experience,
        types: detail.types.iter().map(|t| t.kind.name.clone()).collect(),
        hp,
        attack,
        defense,
    })
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Resolve one listing entry into a row: id -> detail -> normalize
fn extract_row<H: HttpGet>(client: &PokeApiClient<H>, entry: &ListingEntry) -> Result<Row, ExtractError> {
    let id = extract_id(&entry.url)?;
    let detail = client.fetch_detail(id)?;
    normalize(&detail)
}

/// Fetch and normalize every listing entry, strictly in listing order
///
/// Failures are logged and collected; if every entry fails the result is an
/// empty table, not an error.
pub fn build_table<H: HttpGet>(client: &PokeApiClient<H>, listing: &[ListingEntry]) -> Extraction {
    info!("Building table from {} listing entries", listing.len());

    let extraction = listing.iter().fold(Extraction::default(), |mut acc, entry| {
        match extract_row(client, entry) {
            Ok(row) => {
                debug!("extracted {} ({})", row.name, row.id);
                acc.rows.push(row);
            }
            Err(e) => {
                error!("Error fetching details for {}: {}", entry.name, e);
                acc.failures.push(ItemFailure { name: entry.name.clone(), url: entry.url.clone(), error: e });
            }
        }
        acc
    });

    info!("Extracted {} rows, {} failures", extraction.rows.len(), extraction.failures.len());
    extraction
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;
