//! Binned material thickness along a layer's surface coordinate.

use crate::error::{FastSimError, Result};

/// Material thickness (in radiation lengths) as a step function of the
/// layer's local coordinate: `|z|` for barrel layers, `r` for forward layers.
///
/// Bin `i` covers `[limits[i], limits[i + 1])`; outside all bins there is no
/// material.
///
/// # Examples
///
/// ```
/// use fastsim::geometry::ThicknessProfile;
///
/// let profile = ThicknessProfile::new(vec![0.0, 27.5, 32.0, 65.0], vec![0.0135, 0.095, 0.050]).unwrap();
/// assert_eq!(profile.at(10.0), 0.0135);
/// assert_eq!(profile.at(30.0), 0.095);
/// assert_eq!(profile.at(70.0), 0.0);
/// assert_eq!(profile.material_max(), 65.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThicknessProfile {
    limits: Vec<f64>,
    thickness: Vec<f64>,
    material_min: f64,
    material_max: f64,
}

impl ThicknessProfile {
    /// Builds a profile from `N` bin limits and `N - 1` thickness values.
    ///
    /// Two empty tables describe a layer without material.
    pub fn new(limits: Vec<f64>, thickness: Vec<f64>) -> Result<Self> {
        if limits.is_empty() && thickness.is_empty() {
            return Ok(Self::empty());
        }
        if limits.len() < 2 || thickness.len() != limits.len() - 1 {
            return Err(FastSimError::ThicknessTableSize {
                limits: limits.len(),
                thickness: thickness.len(),
            });
        }
        if let Some(pair) = limits.windows(2).find(|pair| pair[0] > pair[1]) {
            return Err(FastSimError::ThicknessLimitsOrder {
                previous: pair[0],
                next: pair[1],
            });
        }

        let first = thickness.iter().position(|&t| t > 0.0);
        let last = thickness.iter().rposition(|&t| t > 0.0);
        let (material_min, material_max) = match (first, last) {
            (Some(first), Some(last)) => (limits[first], limits[last + 1]),
            _ => (0.0, 0.0),
        };

        Ok(Self {
            limits,
            thickness,
            material_min,
            material_max,
        })
    }

    /// A single bin of constant thickness covering `[0, extent)`.
    pub fn uniform(extent: f64, thickness: f64) -> Self {
        let extent = extent.max(0.0);
        let has_material = thickness > 0.0 && extent > 0.0;
        Self {
            limits: vec![0.0, extent],
            thickness: vec![thickness],
            material_min: 0.0,
            material_max: if has_material { extent } else { 0.0 },
        }
    }

    /// A profile without any material.
    pub fn empty() -> Self {
        Self {
            limits: Vec::new(),
            thickness: Vec::new(),
            material_min: 0.0,
            material_max: 0.0,
        }
    }

    /// Thickness at the given local coordinate.
    pub fn at(&self, coordinate: f64) -> f64 {
        self.limits
            .windows(2)
            .zip(&self.thickness)
            .find(|(edges, _)| edges[0] <= coordinate && coordinate < edges[1])
            .map_or(0.0, |(_, &thickness)| thickness)
    }

    /// Lower edge of the region holding material
    pub fn material_min(&self) -> f64 {
        self.material_min
    }

    /// Upper edge of the region holding material
    pub fn material_max(&self) -> f64 {
        self.material_max
    }

    pub fn has_material(&self) -> bool {
        self.material_max > self.material_min
    }

    pub fn limits(&self) -> &[f64] {
        &self.limits
    }

    pub fn values(&self) -> &[f64] {
        &self.thickness
    }
}

impl Default for ThicknessProfile {
    fn default() -> Self {
        ThicknessProfile::empty()
    }
}
