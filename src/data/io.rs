//! ROOT-file ingestion via the oxyroot backend.

use oxyroot::{Branch, Named, ReaderTree, RootFile, WriterTree};
use polars::prelude::*;
use tracing::info;

use super::{canonicalize_input_path, expand_output_path};
use crate::{K3PiError, K3PiResult};

/// Names of the keys stored in a ROOT file.
pub fn root_keys(file_path: &str) -> K3PiResult<Vec<String>> {
    let path = canonicalize_input_path(file_path)?;
    let mut file = RootFile::open(&path).map_err(|err| {
        map_root_error(
            &format!("Failed to open ROOT file '{}'", path.display()),
            err,
        )
    })?;
    Ok(file
        .keys()
        .into_iter()
        .map(|key| key.name().to_string())
        .collect())
}

/// Load a ROOT TTree into a [`DataFrame`].
///
/// Only scalar float and double branches are read; `tree = None` selects the
/// file's single TTree and errors when the choice is ambiguous.
pub fn read_root_tree(file_path: &str, tree: Option<&str>) -> K3PiResult<DataFrame> {
    let path = canonicalize_input_path(file_path)?;
    let mut file = RootFile::open(&path).map_err(|err| {
        map_root_error(
            &format!("Failed to open ROOT file '{}'", path.display()),
            err,
        )
    })?;
    let (tree, tree_name) = resolve_tree(&mut file, tree)?;

    let mut columns: Vec<Column> = Vec::new();
    for branch in tree.branches() {
        let Some(kind) = branch_scalar_kind(branch) else {
            continue;
        };
        let name = branch.name();
        let values: Vec<f64> = match kind {
            RootScalarKind::F32 => branch
                .as_iter::<f32>()
                .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
                .map(|value| value as f64)
                .collect(),
            RootScalarKind::F64 => branch
                .as_iter::<f64>()
                .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
                .collect(),
        };
        columns.push(Series::new(name.into(), values).into());
    }
    if columns.is_empty() {
        return Err(K3PiError::Custom(format!(
            "No float or double branches found in ROOT tree '{tree_name}'"
        )));
    }
    let df = DataFrame::new(columns)?;
    info!(
        rows = df.height(),
        tree = %tree_name,
        "loaded ROOT tree from {}",
        file_path
    );
    Ok(df)
}

/// Persist the float columns of a [`DataFrame`] as a flat ROOT TTree.
pub fn write_root_tree(df: &DataFrame, file_path: &str, tree_name: &str) -> K3PiResult<()> {
    let path = expand_output_path(file_path)?;
    let mut file = RootFile::create(&path).map_err(|err| {
        map_root_error(
            &format!("Failed to create ROOT file '{}'", path.display()),
            err,
        )
    })?;
    let mut tree = WriterTree::new(tree_name);
    for column in df.get_columns() {
        let name = column.name().to_string();
        let values: Vec<f64> = column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .collect();
        tree.new_branch(name, values.into_iter());
    }
    tree.write(&mut file).map_err(|err| {
        map_root_error(
            &format!(
                "Failed to write ROOT tree '{tree_name}' to '{}'",
                path.display()
            ),
            err,
        )
    })?;
    file.close().map_err(|err| {
        map_root_error(
            &format!("Failed to close ROOT file '{}'", path.display()),
            err,
        )
    })?;
    Ok(())
}

fn resolve_tree(file: &mut RootFile, requested: Option<&str>) -> K3PiResult<(ReaderTree, String)> {
    if let Some(name) = requested {
        let tree = file
            .get_tree(name)
            .map_err(|err| map_root_error(&format!("Failed to open ROOT tree '{name}'"), err))?;
        return Ok((tree, name.to_string()));
    }

    let tree_names: Vec<String> = file
        .keys()
        .into_iter()
        .filter(|key| key.class_name() == "TTree")
        .map(|key| key.name().to_string())
        .collect();

    if tree_names.is_empty() {
        return Err(K3PiError::Custom(
            "ROOT file does not contain any TTrees".to_string(),
        ));
    }
    if tree_names.len() > 1 {
        return Err(K3PiError::Custom(format!(
            "Multiple TTrees found ({tree_names:?}); pass a tree name to disambiguate"
        )));
    }

    let selected = &tree_names[0];
    let tree = file
        .get_tree(selected)
        .map_err(|err| map_root_error(&format!("Failed to open ROOT tree '{selected}'"), err))?;
    Ok((tree, selected.clone()))
}

#[derive(Clone, Copy)]
enum RootScalarKind {
    F32,
    F64,
}

fn branch_scalar_kind(branch: &Branch) -> Option<RootScalarKind> {
    let type_name = branch.item_type_name();
    let lower = type_name.to_ascii_lowercase();
    if lower.contains("vector") {
        return None;
    }
    match lower.as_str() {
        "float" | "float_t" | "float32_t" => Some(RootScalarKind::F32),
        "double" | "double_t" | "double32_t" => Some(RootScalarKind::F64),
        _ => None,
    }
}

fn map_root_error<E: std::fmt::Display>(context: &str, err: E) -> K3PiError {
    K3PiError::Custom(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{reference_frame, val1};

    #[test]
    fn test_root_round_trip() {
        let path = std::env::temp_dir().join("k3pi_io_root_round_trip.root");
        let df = reference_frame();
        write_root_tree(&df, path.to_str().unwrap(), "events").unwrap();

        let keys = root_keys(path.to_str().unwrap()).unwrap();
        assert!(keys.iter().any(|key| key == "events"));

        let back = read_root_tree(path.to_str().unwrap(), None).unwrap();
        assert_eq!(back.height(), 1);
        for column in ["k_e", "k_px", "os_pi2_pz", "ss_pi_py"] {
            assert_eq!(val1(&back, column), val1(&df, column));
        }

        let named = read_root_tree(path.to_str().unwrap(), Some("events")).unwrap();
        assert_eq!(named.height(), 1);
        assert!(read_root_tree(path.to_str().unwrap(), Some("nope")).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_root_file_is_an_error() {
        assert!(root_keys("/nonexistent/k3pi/input.root").is_err());
        assert!(read_root_tree("/nonexistent/k3pi/input.root", None).is_err());
    }
}
