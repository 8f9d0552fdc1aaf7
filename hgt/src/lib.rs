//! SRTM 1 arc-second elevation (`.hgt`) file format.
//!
//! A tile covers exactly one degree of longitude by one degree of
//! latitude with 3601 x 3601 big-endian `i16` samples. The first
//! sample in the file is the north-west corner; rows run from north
//! to south. Adjacent tiles share their edge rows and columns.
//!
//! # References
//!
//! 1. [30-Meter SRTM Tile Downloader](https://dwtkns.com/srtm30m)
//! 1. [Archive Team](http://fileformats.archiveteam.org/index.php?title=HGT&oldid=17250)
//! 1. [SRTM Collection User Guide](https://lpdaac.usgs.gov/documents/179/SRTM_User_Guide_V3.pdf)

mod error;

pub use crate::error::HgtError;
use byteorder::{BigEndian as BE, ByteOrder, ReadBytesExt};
use geo::geometry::Coord;
use log::debug;
use memmap2::Mmap;
use std::{fs::File, io::BufReader, mem::size_of, path::Path};

/// Number of samples per degree, along either axis.
pub const SAMPLES_PER_DEGREE: usize = 3600;

/// Number of samples along one edge of a tile.
pub const HGT_LENGTH: usize = SAMPLES_PER_DEGREE + 1;

/// Exact size in bytes of a valid tile file.
#[allow(clippy::cast_possible_truncation)]
pub const HGT_SIZE: u64 = (HGT_LENGTH * HGT_LENGTH * size_of::<u16>()) as u64;

pub struct Tile {
    /// Southwest corner of the tile in integer degrees.
    sw_corner: Coord<i16>,

    /// Elevation samples, in file order.
    samples: SampleStore,
}

enum SampleStore {
    Tombstone,
    InMem(Box<[i16]>),
    MemMap(Mmap),
}

impl SampleStore {
    fn get_unchecked(&self, index: usize) -> i16 {
        match self {
            Self::Tombstone => 0,
            Self::InMem(samples) => samples[index],
            Self::MemMap(raw) => {
                let start = index * size_of::<u16>();
                BE::read_i16(&raw[start..start + size_of::<u16>()])
            }
        }
    }
}

impl Tile {
    /// Returns a Tile read into memory from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HgtError> {
        let sw_corner = parse_sw_corner(&path)?;
        check_len(&path)?;

        let mut file = BufReader::new(File::open(&path)?);
        let mut samples = vec![0_i16; HGT_LENGTH * HGT_LENGTH];
        file.read_i16_into::<BE>(&mut samples)?;

        debug!("loaded {:?} into memory", path.as_ref());
        Ok(Self {
            sw_corner,
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }

    /// Returns a Tile using the memory-mapped file as storage.
    ///
    /// The mapping is released when the tile is dropped.
    pub fn memmap<P: AsRef<Path>>(path: P) -> Result<Self, HgtError> {
        let sw_corner = parse_sw_corner(&path)?;
        check_len(&path)?;

        let samples = {
            let file = File::open(&path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            SampleStore::MemMap(mmap)
        };

        debug!("mapped {:?}", path.as_ref());
        Ok(Self { sw_corner, samples })
    }

    /// Returns a Tile backed by already decoded samples, in file
    /// order (north row first).
    pub fn from_samples(sw_corner: Coord<i16>, samples: Box<[i16]>) -> Result<Self, HgtError> {
        let expected = HGT_LENGTH * HGT_LENGTH;
        if samples.len() != expected {
            return Err(HgtError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            sw_corner,
            samples: SampleStore::InMem(samples),
        })
    }

    /// Returns a placeholder tile where every sample is at sea level.
    pub fn tombstone(sw_corner: Coord<i16>) -> Self {
        Self {
            sw_corner,
            samples: SampleStore::Tombstone,
        }
    }

    /// Returns the southwest corner of this tile in integer degrees.
    pub fn sw_corner(&self) -> Coord<i16> {
        self.sw_corner
    }

    /// Returns `true` if this tile has no backing data.
    pub fn is_tombstone(&self) -> bool {
        matches!(self.samples, SampleStore::Tombstone)
    }

    /// Returns the number of samples in this tile.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        HGT_LENGTH * HGT_LENGTH
    }

    /// Returns the sample at column `x` (increasing eastwards) and
    /// row `y` (increasing northwards), if any.
    pub fn get_xy(&self, (x, y): (usize, usize)) -> Option<i16> {
        if x < HGT_LENGTH && y < HGT_LENGTH {
            Some(self.get_xy_unchecked((x, y)))
        } else {
            None
        }
    }

    /// Returns the sample at `(x, y)` without range checks.
    ///
    /// Panics for memory backed tiles if `(x, y)` is off the tile.
    pub fn get_xy_unchecked(&self, (x, y): (usize, usize)) -> i16 {
        self.samples.get_unchecked(xy_to_linear_index((x, y)))
    }
}

/// Returns the file name of the tile whose southwest corner is `sw_corner`.
pub fn file_name(Coord { x, y }: Coord<i16>) -> String {
    let (n_s, lat) = {
        let lat = y.abs();
        let n_s = if y.is_negative() { 'S' } else { 'N' };
        (n_s, lat)
    };
    let (e_w, lon) = {
        let lon = x.abs();
        let e_w = if x.is_negative() { 'W' } else { 'E' };
        (e_w, lon)
    };
    format!("{n_s}{lat:02}{e_w}{lon:03}.hgt")
}

/// Storage is north row first, so geographic row `y` is file row
/// `HGT_LENGTH - 1 - y`.
fn xy_to_linear_index((x, y): (usize, usize)) -> usize {
    HGT_LENGTH * (HGT_LENGTH - y - 1) + x
}

fn check_len<P: AsRef<Path>>(path: P) -> Result<(), HgtError> {
    match path.as_ref().metadata().map(|m| m.len())? {
        HGT_SIZE => Ok(()),
        invalid_len => Err(HgtError::HgtLen(invalid_len, path.as_ref().to_owned())),
    }
}

fn parse_sw_corner<P: AsRef<Path>>(path: P) -> Result<Coord<i16>, HgtError> {
    let mk_err = || HgtError::HgtName(path.as_ref().to_owned());
    let name = path
        .as_ref()
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(mk_err)?;
    if name.len() != 11 || !name.is_ascii() || &name[7..] != ".hgt" {
        return Err(mk_err());
    }
    let parse_digits = |digits: &str, limit: i16| {
        if digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse::<i16>().ok().filter(|v| *v < limit)
        } else {
            None
        }
    };
    let lat_sign = match &name[0..1] {
        "N" | "n" => 1,
        "S" | "s" => -1,
        _ => return Err(mk_err()),
    };
    let lat = lat_sign * parse_digits(&name[1..3], 90).ok_or_else(mk_err)?;
    let lon_sign = match &name[3..4] {
        "E" | "e" => 1,
        "W" | "w" => -1,
        _ => return Err(mk_err()),
    };
    let lon = lon_sign * parse_digits(&name[4..7], 180).ok_or_else(mk_err)?;
    Ok(Coord { x: lon, y: lat })
}
