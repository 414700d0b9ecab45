use sym_core::Error;

/// Equal-width intensity histogram over the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// A constant input widens the range to `[v - 0.5, v + 0.5]`. The last bin
    /// is closed on the right. Non-finite values are rejected with their index.
    pub fn build<I>(values: I, bins: usize) -> Result<Self, Error>
    where
        I: IntoIterator<Item = f32> + Clone,
    {
        let bins = bins.max(1);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut seen = 0usize;
        for (index, v) in values.clone().into_iter().enumerate() {
            if !v.is_finite() {
                return Err(Error::NonFiniteIntensity { index });
            }
            let v = v as f64;
            lo = lo.min(v);
            hi = hi.max(v);
            seen += 1;
        }

        if seen == 0 {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + i as f64 * width })
            .collect();

        let mut counts = vec![0usize; bins];
        for v in values {
            let t = (v as f64 - lo) / (hi - lo);
            let bin = ((t * bins as f64) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// `bins + 1` monotonically increasing edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
