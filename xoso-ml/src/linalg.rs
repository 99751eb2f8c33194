use faer::prelude::Solve;
use faer::{Mat, Side};
use ndarray::{Array1, Array2};
use xoso_data::{DataError, Result};

/// Convert ndarray Array2 to faer Mat (column-major).
fn ndarray_to_faer(arr: &Array2<f64>) -> Mat<f64> {
    let (rows, cols) = (arr.nrows(), arr.ncols());
    Mat::from_fn(rows, cols, |i, j| arr[[i, j]])
}

/// Solve A * x = b for symmetric positive-definite A via Cholesky.
pub fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = b.len();
    let a_faer = ndarray_to_faer(a);
    let b_faer = Mat::from_fn(n, 1, |i, _| b[i]);
    let llt = a_faer.llt(Side::Lower).map_err(|_| {
        DataError::InsufficientData("Hessian is not positive-definite".to_string())
    })?;
    let x_faer = llt.solve(&b_faer);
    Ok(Array1::from_shape_fn(n, |i| x_faer[(i, 0)]))
}
