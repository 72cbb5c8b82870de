//! Loading NetCDF files into the in-memory dataset model
//!
//! The NetCDF handle is opened, read and dropped inside [`Dataset::open`]; the
//! returned [`Dataset`] never holds on to it. NetCDF-3 files expose a single
//! flat root group, NetCDF-4 files are walked group by group.

use crate::classify::{COORDINATES_ATTR, GRID_MAPPING_ATTR};
use crate::errors::{NcScanError, OpenFailure, Result};
use crate::model::{AttributeValue, DataModel, Dataset, Group, Variable};
use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// Root attribute netCDF-C writes into classic-model NetCDF-4 files
const NC3_STRICT_ATTR: &[u8] = b"_nc3_strict";

/// Bytes searched for the classic-model marker, counted from the superblock
const CLASSIC_MARKER_WINDOW: u64 = 64 * 1024;

/// Offsets an HDF5 superblock may start at: 0, then 512 doubling, up to `len`
fn superblock_offsets(len: u64) -> impl Iterator<Item = u64> {
    let signature_len = HDF5_SIGNATURE.len() as u64;
    std::iter::once(0)
        .chain(std::iter::successors(Some(512u64), |offset| offset.checked_mul(2)))
        .take_while(move |offset| offset.saturating_add(signature_len) <= len)
}

fn netcdf3_model(header: &[u8]) -> Option<DataModel> {
    match header {
        [b'C', b'D', b'F', 1, ..] => Some(DataModel::Netcdf3Classic),
        [b'C', b'D', b'F', 2, ..] => Some(DataModel::Netcdf3Offset64),
        [b'C', b'D', b'F', 5, ..] => Some(DataModel::Netcdf3Data64),
        _ => None,
    }
}

/// Tells classic-model files apart from the bytes following the superblock
fn hdf5_model(from_superblock: &[u8]) -> DataModel {
    let window_len = from_superblock.len().min(CLASSIC_MARKER_WINDOW as usize);
    let classic = from_superblock[..window_len]
        .windows(NC3_STRICT_ATTR.len())
        .any(|window| window == NC3_STRICT_ATTR);
    if classic {
        DataModel::Netcdf4Classic
    } else {
        DataModel::Netcdf4
    }
}

/// Identifies the data model from the leading bytes of a file.
///
/// The HDF5 superblock is looked for at offset 0 and after a user block at
/// every power of two from 512 that fits in `bytes`.
pub fn data_model_from_signature(bytes: &[u8]) -> Option<DataModel> {
    if let Some(model) = netcdf3_model(bytes) {
        return Some(model);
    }
    superblock_offsets(bytes.len() as u64)
        .map(|offset| &bytes[offset as usize..])
        .find(|rest| rest.starts_with(&HDF5_SIGNATURE))
        .map(hdf5_model)
}

/// Reads the signature of the file at `path` and identifies its data model
pub fn detect_data_model(path: &Path) -> std::result::Result<DataModel, OpenFailure> {
    let mut file = fs::File::open(path)?;
    let len = file.metadata()?.len();

    let mut header = Vec::with_capacity(HDF5_SIGNATURE.len());
    file.by_ref()
        .take(HDF5_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    if let Some(model) = netcdf3_model(&header) {
        return Ok(model);
    }

    for offset in superblock_offsets(len) {
        let mut signature = [0u8; 8];
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut signature)?;
        if signature == HDF5_SIGNATURE {
            let mut window = Vec::new();
            file.seek(SeekFrom::Start(offset))?;
            file.by_ref()
                .take(CLASSIC_MARKER_WINDOW)
                .read_to_end(&mut window)?;
            return Ok(hdf5_model(&window));
        }
    }

    Err(OpenFailure::UnrecognizedFormat)
}

impl Dataset {
    /// Opens a NetCDF file and loads its full group tree.
    ///
    /// Every failure is reported as [`NcScanError::DatasetOpen`]. The file
    /// handle is released before this returns, on success and on error.
    pub fn open(path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let data_model = detect_data_model(path).map_err(|e| NcScanError::open(path, e))?;
        let file = netcdf::open(path).map_err(|e| NcScanError::open(path, e))?;
        let root = load_root(&file).map_err(|e| NcScanError::open(path, e))?;

        debug!(path = %path.display(), %data_model, "loaded dataset");
        Ok(Dataset::new(data_model, root))
    }
}

fn load_root(file: &netcdf::File) -> std::result::Result<Group, OpenFailure> {
    let mut root = Group::root();
    match file.root() {
        Some(group) => load_group(&group, &mut root)?,
        None => {
            for var in file.variables() {
                root.add_variable(load_variable(&var)?);
            }
            for dim in file.dimensions() {
                root.add_dimension(dim.name(), dim.len());
            }
        }
    }
    Ok(root)
}

fn load_group(
    source: &netcdf::Group<'_>,
    target: &mut Group,
) -> std::result::Result<(), OpenFailure> {
    for var in source.variables() {
        target.add_variable(load_variable(&var)?);
    }
    for dim in source.dimensions() {
        target.add_dimension(dim.name(), dim.len());
    }
    for child in source.groups() {
        let name = child.name();
        load_group(&child, target.add_group(&name))?;
    }
    Ok(())
}

fn load_variable(var: &netcdf::Variable<'_>) -> std::result::Result<Variable, OpenFailure> {
    let mut variable = Variable::new(var.name());

    for attr in var.attributes() {
        let name = attr.name();
        match attr.value() {
            Ok(value) => variable.set_attribute(name, convert_attribute(value)),
            Err(source) if name == COORDINATES_ATTR || name == GRID_MAPPING_ATTR => {
                return Err(OpenFailure::Attribute {
                    variable: var.name(),
                    attribute: name.to_string(),
                    source,
                });
            }
            // Only the reference attributes are inspected by value
            Err(e) => {
                warn!(
                    variable = %var.name(),
                    attribute = name,
                    error = %e,
                    "skipping unreadable attribute"
                );
            }
        }
    }

    Ok(variable)
}

fn convert_attribute(value: netcdf::AttributeValue) -> AttributeValue {
    use netcdf::AttributeValue as Nc;

    match value {
        Nc::Str(s) => AttributeValue::Text(s),
        Nc::Strs(ss) => AttributeValue::Texts(ss),
        Nc::Uchar(v) => AttributeValue::Number(f64::from(v)),
        Nc::Ushort(v) => AttributeValue::Number(f64::from(v)),
        Nc::Short(v) => AttributeValue::Number(f64::from(v)),
        Nc::Uint(v) => AttributeValue::Number(f64::from(v)),
        Nc::Int(v) => AttributeValue::Number(f64::from(v)),
        Nc::Float(v) => AttributeValue::Number(f64::from(v)),
        Nc::Double(v) => AttributeValue::Number(v),
        Nc::Uchars(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Ushorts(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Shorts(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Uints(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Ints(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Floats(vs) => AttributeValue::Numbers(vs.into_iter().map(f64::from).collect()),
        Nc::Doubles(vs) => AttributeValue::Numbers(vs),
        other => AttributeValue::Text(format!("{:?}", other)),
    }
}
