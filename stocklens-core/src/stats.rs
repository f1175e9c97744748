//! Numeric helpers shared by the return, indicator, and risk modules.
//!
//! All estimators are sample estimators (N − 1 denominator) and return `None`
//! rather than 0.0 when there is too little data to define them.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance. `None` with fewer than two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    Some(ss / (values.len() - 1) as f64)
}

/// Sample standard deviation. `None` with fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Sample covariance of paired observations. `None` with fewer than two pairs.
pub fn sample_covariance(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let cross = pairs.iter().map(|(x, y)| (x - mx) * (y - my)).sum::<f64>();
    Some(cross / (n - 1.0))
}

/// Pearson correlation coefficient. `None` when either side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let cov = sample_covariance(pairs)?;
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let sx = sample_std(&xs)?;
    let sy = sample_std(&ys)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    // rounding can push |r| a hair past 1
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}
