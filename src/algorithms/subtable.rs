// src/algorithms/subtable.rs

use crate::algorithms::missing::check_bounds;
use crate::core::{Coordinate, Dataset, ExtractMode, Extracted, Result};
use ndarray::{Array1, Axis};
use std::collections::BTreeSet;

/// Narrows `data` to the cells, rows or columns named by `coords`.
///
/// * `Pointwise`: the values at `coords`, in the order given. Repeated
///   coordinates are repeated in the output.
/// * `Rows` / `Columns`: the distinct rows (columns) named by `coords`, in
///   ascending index order, with the other dimension kept whole.
///
/// An empty `coords` gives an empty result, never the full table.
pub fn extract_subtable(data: &Dataset, coords: &[Coordinate], mode: ExtractMode) -> Result<Extracted> {
    check_bounds(data, coords)?;
    let extracted = match mode {
        ExtractMode::Pointwise => {
            Extracted::Values(coords.iter().map(|&coord| data[coord]).collect::<Array1<f64>>())
        }
        ExtractMode::Rows => {
            let rows = distinct(coords.iter().map(|&(r, _)| r));
            Extracted::Table(data.select(Axis(0), &rows))
        }
        ExtractMode::Columns => {
            let cols = distinct(coords.iter().map(|&(_, c)| c));
            Extracted::Table(data.select(Axis(1), &cols))
        }
    };
    Ok(extracted)
}

fn distinct(indices: impl Iterator<Item = usize>) -> Vec<usize> {
    indices.collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::missing::locate_missing;
    use crate::core::VdError;
    use ndarray::array;

    const NAN: f64 = f64::NAN;

    fn sample() -> Dataset {
        array![
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0]
        ]
    }

    #[test]
    fn pointwise_follows_coordinate_order() -> Result<()> {
        let values = extract_subtable(&sample(), &[(2, 0), (0, 1), (2, 0)], ExtractMode::Pointwise)?
            .into_values()
            .expect("pointwise yields values");
        assert_eq!(values, array![7.0, 2.0, 7.0]);
        Ok(())
    }

    #[test]
    fn rows_are_distinct_and_ascending() -> Result<()> {
        let table = extract_subtable(&sample(), &[(2, 0), (0, 1), (2, 2)], ExtractMode::Rows)?
            .into_table()
            .expect("row mode yields a table");
        assert_eq!(table, array![[1.0, 2.0, 3.0], [7.0, 8.0, 9.0]]);
        Ok(())
    }

    #[test]
    fn columns_are_distinct_and_ascending() -> Result<()> {
        let table = extract_subtable(&sample(), &[(1, 2), (0, 0), (2, 2)], ExtractMode::Columns)?
            .into_table()
            .expect("column mode yields a table");
        assert_eq!(table, array![[1.0, 3.0], [4.0, 6.0], [7.0, 9.0]]);
        Ok(())
    }

    #[test]
    fn same_coordinates_restrict_both_tables_alike() -> Result<()> {
        let reference = array![[1.0, NAN], [3.0, 4.0]];
        let imputed = array![[1.0, 2.0], [3.0, 4.0]];
        let coords = locate_missing(&reference);

        let r = extract_subtable(&reference, &coords, ExtractMode::Columns)?.into_table();
        let i = extract_subtable(&imputed, &coords, ExtractMode::Columns)?.into_table();
        assert_eq!(r.map(|t| t.dim()), Some((2, 1)));
        assert_eq!(i, Some(array![[2.0], [4.0]]));
        Ok(())
    }

    #[test]
    fn empty_coordinates_give_empty_restriction() -> Result<()> {
        let rows = extract_subtable(&sample(), &[], ExtractMode::Rows)?.into_table();
        assert_eq!(rows.map(|t| t.dim()), Some((0, 3)));

        let cols = extract_subtable(&sample(), &[], ExtractMode::Columns)?.into_table();
        assert_eq!(cols.map(|t| t.dim()), Some((3, 0)));

        let values = extract_subtable(&sample(), &[], ExtractMode::Pointwise)?.into_values();
        assert_eq!(values.map(|v| v.len()), Some(0));
        Ok(())
    }

    #[test]
    fn out_of_range_is_rejected() {
        let err = extract_subtable(&sample(), &[(0, 3)], ExtractMode::Columns).unwrap_err();
        assert!(matches!(err, VdError::OutOfRangeCoordinate { row: 0, col: 3, .. }));
    }
}
