//! Identifiers for the NVS collections and schemes used by OG1.

use std::fmt;

/// Base URL of the NERC Vocabulary Server.
pub const NVS_BASE_URL: &str = "https://vocab.nerc.ac.uk";

// =============================================================================
// Collections
// =============================================================================

/// An NVS concept collection.
///
/// Links between concepts are classified by checking whether the target URI
/// contains the collection code (e.g. `.../collection/L05/current/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionId {
    /// SeaDataNet device categories (sensor types).
    L05,
    /// SeaVoX device catalogue (sensor models).
    L22,
    /// SeaVoX device manufacturers (sensor makers).
    L35,
    /// OceanGliders OG1 parameter names.
    Og1,
    /// BODC parameter usage vocabulary.
    P01,
    /// SeaDataNet parameter discovery vocabulary.
    P02,
    /// BODC data storage units.
    P06,
    /// Climate and Forecast standard names.
    P07,
}

impl CollectionId {
    /// NVS code of the collection.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::L05 => "L05",
            Self::L22 => "L22",
            Self::L35 => "L35",
            Self::Og1 => "OG1",
            Self::P01 => "P01",
            Self::P02 => "P02",
            Self::P06 => "P06",
            Self::P07 => "P07",
        }
    }

    /// Substring identifying URIs that belong to this collection.
    pub const fn marker(&self) -> &'static str {
        self.code()
    }

    pub const fn all() -> &'static [CollectionId] {
        &[
            Self::L05,
            Self::L22,
            Self::L35,
            Self::Og1,
            Self::P01,
            Self::P02,
            Self::P06,
            Self::P07,
        ]
    }

    /// Parse a collection code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Whether `uri` points into this collection.
    ///
    /// Plain substring containment: `.../collection/L05/current/...` and any
    /// other URI carrying `L05` both match.
    pub fn owns(&self, uri: &str) -> bool {
        uri.contains(self.marker())
    }

    /// Linked-data URL of the current version of this collection.
    pub fn url(&self, kind: VocabKind) -> String {
        format!(
            "{NVS_BASE_URL}/{}/{}/current/?_profile=nvs&_mediatype=application/ld+json",
            kind.path_segment(),
            self.code()
        )
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which NVS endpoint family a code lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VocabKind {
    #[default]
    Collection,
    Scheme,
}

impl VocabKind {
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Scheme => "scheme",
        }
    }
}

impl fmt::Display for VocabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// =============================================================================
// Schemes
// =============================================================================

/// A governance scheme concepts can be declared members of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Sensors approved for use in OceanGliders files.
    OgSensors,
}

impl Scheme {
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::OgSensors => "OG_SENSORS",
        }
    }

    pub fn uri(&self) -> String {
        format!("http://vocab.nerc.ac.uk/scheme/{}/current/", self.marker())
    }

    pub fn owns(&self, uri: &str) -> bool {
        uri.contains(self.marker())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
