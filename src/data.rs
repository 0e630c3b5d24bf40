//! Tabular data ingestion and the AmpGen column conventions.
//!
//! Analysis tuples arrive as CSV, Parquet, or ROOT trees and are handled as
//! polars DataFrames with four-momenta stored column-wise as
//! `{name}_px/_py/_pz/_e`. AmpGen labels its particles with charge symbols
//! (`K#`, `pi~`, ...) that depend on the flavor and tag of the sample; the
//! aliasing helpers translate those generator columns into plain names.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::utils::enums::{Flavor, Tag};
use crate::{K3PiError, K3PiResult};

/// ROOT-file ingestion via the oxyroot backend.
pub mod io;

pub(crate) fn canonicalize_input_path(file_path: &str) -> K3PiResult<PathBuf> {
    Ok(Path::new(&*shellexpand::full(file_path)?).canonicalize()?)
}

pub(crate) fn expand_output_path(file_path: &str) -> K3PiResult<PathBuf> {
    Ok(PathBuf::from(&*shellexpand::full(file_path)?))
}

/// Load a delimited text file into a [`DataFrame`], trimming whitespace from
/// the header names.
pub fn read_csv(file_path: &str) -> K3PiResult<DataFrame> {
    let path = canonicalize_input_path(file_path)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))?
        .finish()?;
    let df = trim_column_names(df)?;
    info!(rows = df.height(), "loaded CSV file {}", file_path);
    Ok(df)
}

/// Strip surrounding whitespace from every column name.
pub fn trim_column_names(mut df: DataFrame) -> K3PiResult<DataFrame> {
    let trimmed: Vec<PlSmallStr> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().trim().into())
        .collect();
    df.set_column_names(trimmed)?;
    Ok(df)
}

/// Load a [`DataFrame`] from a Parquet file.
pub fn read_parquet(file_path: &str) -> K3PiResult<DataFrame> {
    let path = canonicalize_input_path(file_path)?;
    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;
    info!(rows = df.height(), "loaded Parquet file {}", file_path);
    Ok(df)
}

/// Persist a [`DataFrame`] to a Parquet file.
pub fn write_parquet(df: &mut DataFrame, file_path: &str) -> K3PiResult<()> {
    let path = expand_output_path(file_path)?;
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}

/// Split a comma-separated list of input files, stripping all whitespace.
pub fn parse_file_list(files: &str) -> Vec<String> {
    let stripped: String = files.chars().filter(|c| !c.is_whitespace()).collect();
    stripped.split(',').map(str::to_string).collect()
}

/// The AmpGen column label of the kaon for a sample of the given flavor and
/// tag.
///
/// # Errors
///
/// [`K3PiError::InvalidDecay`] for [`Tag::Both`]: merged samples carry no
/// single labelling.
pub fn ampgen_kaon_label(flavor: Flavor, tag: Tag) -> K3PiResult<&'static str> {
    match (flavor, tag) {
        (Flavor::D0, Tag::RS) | (Flavor::D0Bar, Tag::WS) => Ok("K#"),
        (Flavor::D0, Tag::WS) | (Flavor::D0Bar, Tag::RS) => Ok("K~"),
        (_, Tag::Both) => Err(no_label_for_both()),
    }
}

/// The AmpGen column label of the opposite-sign pion.
pub fn ampgen_os_pi_label(flavor: Flavor, tag: Tag) -> K3PiResult<&'static str> {
    match (flavor, tag) {
        (Flavor::D0, Tag::RS) | (Flavor::D0Bar, Tag::WS) => Ok("pi~"),
        (Flavor::D0, Tag::WS) | (Flavor::D0Bar, Tag::RS) => Ok("pi#"),
        (_, Tag::Both) => Err(no_label_for_both()),
    }
}

/// The AmpGen column label of the same-sign pions.
pub fn ampgen_ss_pi_label(flavor: Flavor, tag: Tag) -> K3PiResult<&'static str> {
    match (flavor, tag) {
        (Flavor::D0, Tag::RS) | (Flavor::D0Bar, Tag::WS) => Ok("pi#"),
        (Flavor::D0, Tag::WS) | (Flavor::D0Bar, Tag::RS) => Ok("pi~"),
        (_, Tag::Both) => Err(no_label_for_both()),
    }
}

fn no_label_for_both() -> K3PiError {
    K3PiError::InvalidDecay(
        "AmpGen particle labels are only defined for RS or WS samples".to_string(),
    )
}

/// Alias the AmpGen four-vector columns `_{index}_{label}_{E,Px,Py,Pz}` of a
/// particle to the crate convention `{name}_{e,px,py,pz}`.
///
/// The generator columns are kept; the aliases are added alongside them.
pub fn alias_ampgen_p4(lf: LazyFrame, index: usize, label: &str, name: &str) -> LazyFrame {
    lf.with_columns([
        col(format!("_{index}_{label}_E")).alias(format!("{name}_e")),
        col(format!("_{index}_{label}_Px")).alias(format!("{name}_px")),
        col(format!("_{index}_{label}_Py")).alias(format!("{name}_py")),
        col(format!("_{index}_{label}_Pz")).alias(format!("{name}_pz")),
    ])
}
