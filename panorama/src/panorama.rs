use crate::{PanoramaError, PanoramaParameters};
use std::mem;

/// Per-pixel samples of a computed panorama.
///
/// Pixels where no terrain is visible have an infinite distance and
/// all other channels at zero.
#[derive(Debug, Clone)]
pub struct Panorama {
    parameters: PanoramaParameters,
    samples: Samples,
}

/// Parallel channels indexed by
/// [PanoramaParameters::linear_sample_index].
#[derive(Debug, Clone)]
struct Samples {
    distance: Box<[f32]>,
    longitude: Box<[f32]>,
    latitude: Box<[f32]>,
    elevation: Box<[f32]>,
    slope: Box<[f32]>,
}

impl Samples {
    fn new(size: usize) -> Self {
        Self {
            distance: vec![f32::INFINITY; size].into_boxed_slice(),
            longitude: vec![0.0; size].into_boxed_slice(),
            latitude: vec![0.0; size].into_boxed_slice(),
            elevation: vec![0.0; size].into_boxed_slice(),
            slope: vec![0.0; size].into_boxed_slice(),
        }
    }
}

impl Panorama {
    pub fn parameters(&self) -> &PanoramaParameters {
        &self.parameters
    }

    /// Distance in meters from the observer to the terrain seen at
    /// `(x, y)`, or infinity.
    pub fn distance_at(&self, x: usize, y: usize) -> Result<f32, PanoramaError> {
        Ok(self.samples.distance[self.index(x, y)?])
    }

    /// Like [distance_at](Self::distance_at), returning `default` for
    /// pixels outside of the panorama.
    pub fn distance_at_or(&self, x: i64, y: i64, default: f32) -> f32 {
        if self.parameters.is_valid_sample_index(x, y) {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let i = self.parameters.linear_sample_index(x as usize, y as usize);
            self.samples.distance[i]
        } else {
            default
        }
    }

    /// Longitude in radians.
    pub fn longitude_at(&self, x: usize, y: usize) -> Result<f32, PanoramaError> {
        Ok(self.samples.longitude[self.index(x, y)?])
    }

    /// Latitude in radians.
    pub fn latitude_at(&self, x: usize, y: usize) -> Result<f32, PanoramaError> {
        Ok(self.samples.latitude[self.index(x, y)?])
    }

    /// Terrain altitude in meters.
    pub fn elevation_at(&self, x: usize, y: usize) -> Result<f32, PanoramaError> {
        Ok(self.samples.elevation[self.index(x, y)?])
    }

    /// Terrain slope in radians.
    pub fn slope_at(&self, x: usize, y: usize) -> Result<f32, PanoramaError> {
        Ok(self.samples.slope[self.index(x, y)?])
    }

    pub fn distances(&self) -> &[f32] {
        &self.samples.distance
    }

    pub fn longitudes(&self) -> &[f32] {
        &self.samples.longitude
    }

    pub fn latitudes(&self) -> &[f32] {
        &self.samples.latitude
    }

    pub fn elevations(&self) -> &[f32] {
        &self.samples.elevation
    }

    pub fn slopes(&self) -> &[f32] {
        &self.samples.slope
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, PanoramaError> {
        checked_index(&self.parameters, x, y)
    }
}

fn checked_index(
    parameters: &PanoramaParameters,
    x: usize,
    y: usize,
) -> Result<usize, PanoramaError> {
    if x < parameters.width() && y < parameters.height() {
        Ok(parameters.linear_sample_index(x, y))
    } else {
        #[allow(clippy::cast_possible_wrap)]
        Err(PanoramaError::OutOfBounds {
            x: x as i64,
            y: y as i64,
        })
    }
}

/// Write-once builder of a [Panorama].
///
/// Every channel starts at its "no terrain" value. Once
/// [build](Self::build) has been called, every further call fails with
/// [PanoramaError::AlreadyBuilt].
#[derive(Debug)]
pub struct Builder {
    parameters: PanoramaParameters,
    state: State,
}

#[derive(Debug)]
enum State {
    Open(Samples),
    Sealed,
}

impl Builder {
    pub fn new(parameters: PanoramaParameters) -> Self {
        Self {
            parameters,
            state: State::Open(Samples::new(parameters.size())),
        }
    }

    pub fn parameters(&self) -> &PanoramaParameters {
        &self.parameters
    }

    pub fn set_distance_at(
        &mut self,
        x: usize,
        y: usize,
        distance: f32,
    ) -> Result<&mut Self, PanoramaError> {
        self.set(x, y, distance, |s| &mut s.distance[..])
    }

    /// Sets the longitude in radians.
    pub fn set_longitude_at(
        &mut self,
        x: usize,
        y: usize,
        longitude: f32,
    ) -> Result<&mut Self, PanoramaError> {
        self.set(x, y, longitude, |s| &mut s.longitude[..])
    }

    /// Sets the latitude in radians.
    pub fn set_latitude_at(
        &mut self,
        x: usize,
        y: usize,
        latitude: f32,
    ) -> Result<&mut Self, PanoramaError> {
        self.set(x, y, latitude, |s| &mut s.latitude[..])
    }

    pub fn set_elevation_at(
        &mut self,
        x: usize,
        y: usize,
        elevation: f32,
    ) -> Result<&mut Self, PanoramaError> {
        self.set(x, y, elevation, |s| &mut s.elevation[..])
    }

    pub fn set_slope_at(
        &mut self,
        x: usize,
        y: usize,
        slope: f32,
    ) -> Result<&mut Self, PanoramaError> {
        self.set(x, y, slope, |s| &mut s.slope[..])
    }

    /// Hands the samples over to a new [Panorama] and seals this
    /// builder.
    pub fn build(&mut self) -> Result<Panorama, PanoramaError> {
        match mem::replace(&mut self.state, State::Sealed) {
            State::Open(samples) => Ok(Panorama {
                parameters: self.parameters,
                samples,
            }),
            State::Sealed => Err(PanoramaError::AlreadyBuilt),
        }
    }

    fn set<F>(
        &mut self,
        x: usize,
        y: usize,
        value: f32,
        channel: F,
    ) -> Result<&mut Self, PanoramaError>
    where
        F: FnOnce(&mut Samples) -> &mut [f32],
    {
        let i = checked_index(&self.parameters, x, y)?;
        match &mut self.state {
            State::Open(samples) => channel(samples)[i] = value,
            State::Sealed => return Err(PanoramaError::AlreadyBuilt),
        }
        Ok(self)
    }
}
