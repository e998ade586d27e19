//! Per-body osculating-element query against the JPL Horizons API.
//!
//! The request asks for `EPHEM_TYPE=ELEMENTS` over a one-day window in the
//! ecliptic J2000 frame, lengths in AU and times in days, relative to the
//! solar system barycenter. The returned payload is located between the
//! `$$SOE`/`$$EOE` markers and scanned as label/value pairs; field order is
//! not guaranteed by the service and is never assumed here.

use std::collections::HashMap;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use crate::constants::{Planet, JD2000};
use crate::orbital_elements::OrbitalElements;
use crate::orrery_errors::OrreryError;

/// Default endpoint of the Horizons API.
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// JSON envelope of a Horizons response. Depending on the deployment the
/// text payload arrives under `result` or `data`.
#[derive(Debug, Deserialize)]
struct HorizonsEnvelope {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

/// Fetch and parse the osculating elements of one body.
///
/// Arguments
/// ---------
/// * `client`: shared HTTP client.
/// * `base_url`: Horizons endpoint ([`HORIZONS_API_URL`] in production).
/// * `planet`: body to query.
/// * `as_of`: calendar date anchoring the one-day ephemeris window.
///
/// Return
/// ------
/// * The parsed [`OrbitalElements`], or an [`OrreryError`] on transport,
///   envelope or payload failure.
pub(crate) async fn fetch_elements(
    client: &Client,
    base_url: &str,
    planet: Planet,
    as_of: NaiveDate,
) -> Result<OrbitalElements, OrreryError> {
    let start = as_of.format("%Y-%m-%d").to_string();
    let stop = as_of
        .succ_opt()
        .unwrap_or(as_of)
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .get(base_url)
        .query(&[
            ("format", "json"),
            ("COMMAND", planet.horizons_id()),
            ("OBJ_DATA", "NO"),
            ("MAKE_EPHEM", "YES"),
            ("EPHEM_TYPE", "ELEMENTS"),
            ("OUT_UNITS", "AU-D"),
            ("REF_PLANE", "ECLIPTIC"),
            ("REF_SYSTEM", "J2000"),
            ("CENTER", "500@0"),
            ("START_TIME", start.as_str()),
            ("STOP_TIME", stop.as_str()),
            ("STEP_SIZE", "1 d"),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    let envelope: HorizonsEnvelope = serde_json::from_str(&body)?;
    let payload = envelope
        .result
        .or(envelope.data)
        .ok_or(OrreryError::EmptyEnvelope(planet))?;

    parse_elements(&payload, planet)
}

/// Parse a Horizons ELEMENTS text payload into an [`OrbitalElements`].
///
/// The semi-major axis (`A`) is the only hard requirement: its absence is
/// a typed parse failure. The remaining angles default to zero and the
/// optional `N`/`PR` fields are resolved by the element constructor. The
/// epoch is taken from a `JDTDB` label when present, otherwise from the
/// leading `<jd> = A.D. <date>` line of the block, otherwise J2000.
pub(crate) fn parse_elements(
    payload: &str,
    planet: Planet,
) -> Result<OrbitalElements, OrreryError> {
    let block = extract_data_block(payload).ok_or(OrreryError::MissingDataBlock(planet))?;
    let fields = scan_fields(block);

    let semi_major_axis = *fields
        .get("A")
        .ok_or(OrreryError::MissingSemiMajorAxis(planet))?;

    let epoch = fields
        .get("JDTDB")
        .copied()
        .or_else(|| leading_epoch(block))
        .unwrap_or(JD2000);

    Ok(OrbitalElements::from_degrees(
        epoch,
        semi_major_axis,
        fields.get("EC").copied().unwrap_or(0.0),
        fields.get("IN").copied().unwrap_or(0.0),
        fields.get("OM").copied().unwrap_or(0.0),
        fields.get("W").copied().unwrap_or(0.0),
        fields.get("MA").copied().unwrap_or(0.0),
        fields.get("N").copied(),
        fields.get("PR").copied(),
    ))
}

/// Extract the data block between the `$$SOE` and `$$EOE` markers.
fn extract_data_block(payload: &str) -> Option<&str> {
    let data_regex = Regex::new(r"(?s)\$\$SOE(.*?)\$\$EOE").unwrap();
    data_regex
        .captures(payload)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Scan a data block for `LABEL = number` pairs.
///
/// Labels are runs of ASCII letters; values are signed decimal or
/// exponential numbers. The first occurrence of a label wins. Tokens that
/// do not form a pair (calendar dates, stray punctuation) are skipped.
fn scan_fields(block: &str) -> HashMap<String, f64> {
    let mut fields = HashMap::new();
    let bytes = block.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }

        let label_start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        let label = &block[label_start..i];

        let mut j = i;
        while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'=' {
            continue;
        }
        j += 1;
        while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
            j += 1;
        }

        let value_start = j;
        while j < bytes.len()
            && (bytes[j].is_ascii_digit() || matches!(bytes[j], b'+' | b'-' | b'.' | b'E' | b'e'))
        {
            j += 1;
        }

        if j > value_start {
            if let Ok(value) = block[value_start..j].parse::<f64>() {
                fields.entry(label.to_string()).or_insert(value);
            }
        }
        i = j;
    }

    fields
}

/// Epoch from the leading `<jd> = A.D. <calendar date>` line of a block.
fn leading_epoch(block: &str) -> Option<f64> {
    let epoch_regex = Regex::new(r"(?m)^\s*([0-9]+\.[0-9]+)\s*=\s*A\.D\.").unwrap();
    epoch_regex
        .captures(block)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
