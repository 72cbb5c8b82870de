//! Text and JSON rendering of classification results

use crate::classify::Classification;
use crate::errors::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, Write};

pub const SCIENCE_HEADER: &str = "--------- science_variables ----------";
pub const METADATA_HEADER: &str = "--------- metadata ----------";

/// Writes the data model, then the sorted science and metadata names one per
/// line under their section headers.
pub fn write_report<W: Write>(classification: &Classification, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", classification.data_model())?;

    writeln!(out, "{}", SCIENCE_HEADER)?;
    for name in classification.science_variables() {
        writeln!(out, "{}", name)?;
    }

    writeln!(out, "{}", METADATA_HEADER)?;
    for name in classification.metadata_variables() {
        writeln!(out, "{}", name)?;
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    data_model: &'static str,
    science_variables: &'a BTreeSet<String>,
    metadata_variables: &'a BTreeSet<String>,
}

/// Renders the result sets as a JSON object with sorted name arrays
pub fn to_json(classification: &Classification) -> Result<String> {
    let report = JsonReport {
        data_model: classification.data_model().as_str(),
        science_variables: classification.science_variables(),
        metadata_variables: classification.metadata_variables(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
