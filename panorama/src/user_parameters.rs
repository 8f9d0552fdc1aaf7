//! Integer panorama parameters as entered by a user, always sanitized
//! into their allowed ranges.

use crate::{PanoramaError, PanoramaParameters};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use terrain::GeoPoint;

/// Observer coordinates are given in 1/10 000 of a degree.
const UNITS_PER_DEGREE: f64 = 10_000.0;

/// Steepest vertical field of view, in degrees.
const MAX_VERTICAL_FIELD_OF_VIEW: i32 = 170;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserParameter {
    ObserverLongitude,
    ObserverLatitude,
    ObserverElevation,
    CenterAzimuth,
    HorizontalFieldOfView,
    MaxDistance,
    Width,
    Height,
    SuperSamplingExponent,
}

impl UserParameter {
    pub const ALL: [UserParameter; 9] = [
        Self::ObserverLongitude,
        Self::ObserverLatitude,
        Self::ObserverElevation,
        Self::CenterAzimuth,
        Self::HorizontalFieldOfView,
        Self::MaxDistance,
        Self::Width,
        Self::Height,
        Self::SuperSamplingExponent,
    ];

    /// Allowed values.
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            Self::ObserverLongitude => 60_000..=120_000,
            Self::ObserverLatitude => 450_000..=480_000,
            Self::ObserverElevation => 300..=10_000,
            Self::CenterAzimuth => 0..=359,
            Self::HorizontalFieldOfView => 1..=360,
            Self::MaxDistance => 10..=600,
            Self::Width => 30..=16_000,
            Self::Height => 10..=4_000,
            Self::SuperSamplingExponent => 0..=2,
        }
    }

    /// Returns the allowed value closest to `value`.
    pub fn sanitize(self, value: i32) -> i32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

/// The nine integer parameters of a panorama.
///
/// | parameter                   | unit            |
/// |-----------------------------|-----------------|
/// | `observer_longitude`        | 1/10 000 degree |
/// | `observer_latitude`         | 1/10 000 degree |
/// | `observer_elevation`        | meter           |
/// | `center_azimuth`            | degree          |
/// | `horizontal_field_of_view`  | degree          |
/// | `max_distance`              | kilometer       |
/// | `width`, `height`           | pixel           |
/// | `super_sampling_exponent`   | power of two    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawUserParameters")]
pub struct PanoramaUserParameters {
    observer_longitude: i32,
    observer_latitude: i32,
    observer_elevation: i32,
    center_azimuth: i32,
    horizontal_field_of_view: i32,
    max_distance: i32,
    width: i32,
    height: i32,
    super_sampling_exponent: i32,
}

/// Unsanitized parameters, as read from JSON.
#[derive(Deserialize)]
struct RawUserParameters {
    observer_longitude: i32,
    observer_latitude: i32,
    observer_elevation: i32,
    center_azimuth: i32,
    horizontal_field_of_view: i32,
    #[serde(default = "standard_max_distance")]
    max_distance: i32,
    #[serde(default = "standard_width")]
    width: i32,
    #[serde(default = "standard_height")]
    height: i32,
    #[serde(default)]
    super_sampling_exponent: i32,
}

impl From<RawUserParameters> for PanoramaUserParameters {
    fn from(raw: RawUserParameters) -> Self {
        Self::new(
            raw.observer_longitude,
            raw.observer_latitude,
            raw.observer_elevation,
            raw.center_azimuth,
            raw.horizontal_field_of_view,
            raw.max_distance,
            raw.width,
            raw.height,
            raw.super_sampling_exponent,
        )
    }
}

fn standard_max_distance() -> i32 {
    STANDARD_MAX_DISTANCE
}

fn standard_width() -> i32 {
    STANDARD_WIDTH
}

fn standard_height() -> i32 {
    STANDARD_HEIGHT
}

impl PanoramaUserParameters {
    /// Returns sanitized parameters: every value is clamped into its
    /// range, then the height is lowered if needed to keep the
    /// vertical field of view at most 170°.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        observer_longitude: i32,
        observer_latitude: i32,
        observer_elevation: i32,
        center_azimuth: i32,
        horizontal_field_of_view: i32,
        max_distance: i32,
        width: i32,
        height: i32,
        super_sampling_exponent: i32,
    ) -> Self {
        use UserParameter as P;
        let width = P::Width.sanitize(width);
        let horizontal_field_of_view = P::HorizontalFieldOfView.sanitize(horizontal_field_of_view);
        let max_height = MAX_VERTICAL_FIELD_OF_VIEW * (width - 1) / horizontal_field_of_view + 1;
        Self {
            observer_longitude: P::ObserverLongitude.sanitize(observer_longitude),
            observer_latitude: P::ObserverLatitude.sanitize(observer_latitude),
            observer_elevation: P::ObserverElevation.sanitize(observer_elevation),
            center_azimuth: P::CenterAzimuth.sanitize(center_azimuth),
            horizontal_field_of_view,
            max_distance: P::MaxDistance.sanitize(max_distance),
            width,
            height: P::Height.sanitize(height).min(max_height),
            super_sampling_exponent: P::SuperSamplingExponent.sanitize(super_sampling_exponent),
        }
    }

    /// Returns the value of one parameter.
    pub fn get(&self, parameter: UserParameter) -> i32 {
        match parameter {
            UserParameter::ObserverLongitude => self.observer_longitude,
            UserParameter::ObserverLatitude => self.observer_latitude,
            UserParameter::ObserverElevation => self.observer_elevation,
            UserParameter::CenterAzimuth => self.center_azimuth,
            UserParameter::HorizontalFieldOfView => self.horizontal_field_of_view,
            UserParameter::MaxDistance => self.max_distance,
            UserParameter::Width => self.width,
            UserParameter::Height => self.height,
            UserParameter::SuperSamplingExponent => self.super_sampling_exponent,
        }
    }

    /// Returns a copy with `parameter` set to `value`, sanitized.
    #[must_use]
    pub fn with(&self, parameter: UserParameter, value: i32) -> Self {
        let mut values = UserParameter::ALL.map(|p| self.get(p));
        values[parameter as usize] = value;
        let [lon, lat, elev, az, hfov, dist, w, h, ss] = values;
        Self::new(lon, lat, elev, az, hfov, dist, w, h, ss)
    }

    pub fn observer_longitude(&self) -> i32 {
        self.observer_longitude
    }

    pub fn observer_latitude(&self) -> i32 {
        self.observer_latitude
    }

    pub fn observer_elevation(&self) -> i32 {
        self.observer_elevation
    }

    pub fn center_azimuth(&self) -> i32 {
        self.center_azimuth
    }

    pub fn horizontal_field_of_view(&self) -> i32 {
        self.horizontal_field_of_view
    }

    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn super_sampling_exponent(&self) -> i32 {
        self.super_sampling_exponent
    }

    /// Parameters to compute with, super-sampled.
    pub fn panorama_parameters(&self) -> Result<PanoramaParameters, PanoramaError> {
        self.to_parameters(1 << self.super_sampling_exponent)
    }

    /// Parameters of the displayed image.
    pub fn panorama_display_parameters(&self) -> Result<PanoramaParameters, PanoramaError> {
        self.to_parameters(1)
    }

    #[allow(clippy::cast_sign_loss)]
    fn to_parameters(&self, scale: usize) -> Result<PanoramaParameters, PanoramaError> {
        let observer = GeoPoint::from_degrees(
            f64::from(self.observer_longitude) / UNITS_PER_DEGREE,
            f64::from(self.observer_latitude) / UNITS_PER_DEGREE,
        )?;
        PanoramaParameters::new(
            observer,
            self.observer_elevation,
            f64::from(self.center_azimuth).to_radians(),
            f64::from(self.horizontal_field_of_view).to_radians(),
            self.max_distance * 1000,
            scale * self.width as usize,
            scale * self.height as usize,
        )
    }

    /// Preset with the standard range and image size.
    const fn standard(
        observer_longitude: i32,
        observer_latitude: i32,
        observer_elevation: i32,
        center_azimuth: i32,
        horizontal_field_of_view: i32,
    ) -> Self {
        Self {
            observer_longitude,
            observer_latitude,
            observer_elevation,
            center_azimuth,
            horizontal_field_of_view,
            max_distance: STANDARD_MAX_DISTANCE,
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
            super_sampling_exponent: 0,
        }
    }
}

const STANDARD_MAX_DISTANCE: i32 = 300;
const STANDARD_WIDTH: i32 = 1080;
const STANDARD_HEIGHT: i32 = 480;

pub const NIESEN: PanoramaUserParameters =
    PanoramaUserParameters::standard(76_500, 467_300, 600, 180, 110);
pub const ALPES_DU_JURA: PanoramaUserParameters =
    PanoramaUserParameters::standard(68_087, 470_085, 1380, 162, 27);
pub const MONT_RACINE: PanoramaUserParameters =
    PanoramaUserParameters::standard(68_200, 470_200, 1500, 135, 45);
pub const FINSTERAARHORN: PanoramaUserParameters =
    PanoramaUserParameters::standard(81_260, 465_374, 4300, 205, 20);
pub const SAUVABELIN: PanoramaUserParameters =
    PanoramaUserParameters::standard(66_385, 465_353, 700, 135, 100);
pub const PELICAN: PanoramaUserParameters =
    PanoramaUserParameters::standard(65_728, 465_132, 380, 135, 60);

/// Named presets, as accepted by [preset].
pub const PRESETS: [(&str, PanoramaUserParameters); 6] = [
    ("niesen", NIESEN),
    ("alpes-du-jura", ALPES_DU_JURA),
    ("mont-racine", MONT_RACINE),
    ("finsteraarhorn", FINSTERAARHORN),
    ("sauvabelin", SAUVABELIN),
    ("pelican", PELICAN),
];

/// Looks up a preset by name, ignoring case and treating `_` as `-`.
pub fn preset(name: &str) -> Option<PanoramaUserParameters> {
    let name = name.to_ascii_lowercase().replace('_', "-");
    PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, params)| *params)
}
