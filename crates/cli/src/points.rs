//! CSV point files: one lattice point per row, integer columns `x0..x{d-1}`.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use digconv::{Integer, PointVector};
use polars::prelude::*;

/// Largest dimension accepted in point files.
pub const MAX_DIM: usize = 3;

/// Points as read from disk, before the dimension is fixed at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointTable {
    pub dim: usize,
    pub rows: Vec<Vec<Integer>>,
}

impl PointTable {
    /// Rows as `D`-dimensional points. Fails if the table has another dimension.
    pub fn points<const D: usize>(&self) -> Result<Vec<PointVector<D>>> {
        if self.dim != D {
            bail!("point table has dimension {}, expected {D}", self.dim);
        }
        self.rows.iter().map(|r| to_point(r)).collect()
    }
}

/// `D`-dimensional point from a coordinate slice of length `D`.
pub fn to_point<const D: usize>(coords: &[Integer]) -> Result<PointVector<D>> {
    let c: [Integer; D] = coords
        .try_into()
        .with_context(|| format!("expected {D} coordinates, got {}", coords.len()))?;
    Ok(PointVector::new(c))
}

/// Parses `"x,y[,z]"`.
pub fn parse_coords(s: &str) -> Result<Vec<Integer>> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<Integer>()
                .with_context(|| format!("invalid coordinate {t:?} in {s:?}"))
        })
        .collect()
}

pub fn read_points(path: &Path) -> Result<PointTable> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    let dim = (0..=MAX_DIM)
        .take_while(|i| df.column(&format!("x{i}")).is_ok())
        .count();
    if dim == 0 || dim > MAX_DIM {
        bail!(
            "{}: expected columns x0..x1 or x0..x2, found {:?}",
            path.display(),
            df.get_column_names()
        );
    }
    let mut cols: Vec<Vec<Integer>> = Vec::with_capacity(dim);
    for i in 0..dim {
        let name = format!("x{i}");
        let s = df.column(&name)?.cast(&DataType::Int32)?;
        let col = s
            .i32()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.with_context(|| format!("{name}: missing or non-integer value at row {row}")))
            .collect::<Result<Vec<Integer>>>()?;
        cols.push(col);
    }
    let rows = (0..df.height())
        .map(|r| cols.iter().map(|c| c[r]).collect())
        .collect();
    Ok(PointTable { dim, rows })
}

pub fn write_points<const D: usize>(path: &Path, points: &[PointVector<D>]) -> Result<()> {
    let columns: Vec<Series> = (0..D)
        .map(|i| {
            let values: Vec<Integer> = points.iter().map(|p| p[i]).collect();
            Series::new(format!("x{i}").into(), values)
        })
        .collect();
    let mut df = DataFrame::new(columns)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
