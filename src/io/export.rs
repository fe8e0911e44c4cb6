//! CSV exports.
//!
//! - the frequency-magnitude distribution, one row per bin
//! - a bare magnitude list (synthetic catalogues), readable by `load_catalogue`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{CurvatureCurve, Fmd};
use crate::error::AppError;

/// Write per-bin FMD values (and |dN/dM|) to a CSV file.
pub fn write_fmd_csv(path: &Path, fmd: &Fmd, curvature: &CurvatureCurve) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create FMD CSV '{}': {e}", path.display())))?;
    write_fmd(file, fmd, curvature)
}

/// Write the FMD table to any writer.
pub fn write_fmd<W: Write>(mut out: W, fmd: &Fmd, curvature: &CurvatureCurve) -> Result<(), AppError> {
    writeln!(out, "magnitude,discrete,cumulative,abs_gradient")
        .map_err(|e| AppError::new(2, format!("Failed to write FMD CSV header: {e}")))?;

    for i in 0..fmd.len() {
        let grad = curvature.abs_gradient.get(i).copied().unwrap_or(f64::NAN);
        writeln!(
            out,
            "{:.4},{},{},{:.6}",
            fmd.gr_mag[i], fmd.discrete[i], fmd.gr_freq[i], grad
        )
        .map_err(|e| AppError::new(2, format!("Failed to write FMD CSV row: {e}")))?;
    }

    Ok(())
}

/// Write magnitudes as a single-column CSV catalogue (`Magnitude` header).
pub fn write_magnitudes_csv(path: &Path, magnitudes: &[f64]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create catalogue '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "Magnitude").map_err(|e| AppError::new(2, format!("Failed to write catalogue header: {e}")))?;
    for m in magnitudes {
        writeln!(out, "{m}").map_err(|e| AppError::new(2, format!("Failed to write catalogue row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush catalogue '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmd::max_curvature;

    #[test]
    fn writes_one_row_per_bin() {
        let fmd = Fmd {
            gr_mag: vec![1.0, 1.5, 2.0],
            gr_freq: vec![6, 2, 1],
            discrete: vec![4, 1, 1],
            bin_width: 0.5,
        };
        let curve = max_curvature(&fmd).unwrap();

        let mut buf = Vec::new();
        write_fmd(&mut buf, &fmd, &curve).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "magnitude,discrete,cumulative,abs_gradient");
        assert_eq!(lines[1], "1.0000,4,6,8.000000");
        assert_eq!(lines[3], "2.0000,1,1,2.000000");
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmd.csv");
        let fmd = Fmd {
            gr_mag: vec![0.0, 1.0],
            gr_freq: vec![3, 1],
            discrete: vec![2, 1],
            bin_width: 1.0,
        };
        let curve = max_curvature(&fmd).unwrap();
        write_fmd_csv(&path, &fmd, &curve).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("magnitude,"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn magnitude_csv_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synthetic.csv");
        write_magnitudes_csv(&path, &[1.2, 0.7, 3.05]).unwrap();

        let cat = crate::io::load_catalogue(&path, None).unwrap();
        assert_eq!(cat.magnitudes, vec![1.2, 0.7, 3.05]);
        assert!(cat.row_errors.is_empty());
    }
}
