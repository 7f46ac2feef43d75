/// A single supervised sample.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataPoint {
    pub feature: f64,
    pub target: f64,
}

impl DataPoint {
    pub fn new(feature: f64, target: f64) -> Self {
        Self { feature, target }
    }

    /// A point takes part in fitting only if both of its values are non negative.
    ///
    /// NaN values compare false and are therefore invalid as well.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.feature >= 0.0 && self.target >= 0.0
    }
}

/// An ordered, immutable collection of samples.
///
/// Invalid points are kept as they were given; every computation filters them
/// on the fly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Creates a new `Dataset` from owned points.
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Total number of points, counting the invalid ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Iterates over the points that take part in fitting.
    pub fn valid(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter().filter(|p| p.is_valid())
    }

    /// Returns the smallest and largest feature among the valid points.
    ///
    /// # Returns
    /// `None` if there are no valid points.
    pub fn feature_range(&self) -> Option<(f64, f64)> {
        self.valid().fold(None, |range, p| match range {
            None => Some((p.feature, p.feature)),
            Some((min, max)) => Some((min.min(p.feature), max.max(p.feature))),
        })
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<(f64, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(feature, target)| DataPoint::new(feature, target))
            .collect::<Vec<_>>()
            .into()
    }
}
