//! Static metadata for each kind of water right.

use headgate_series::DataUnits;

/// Kind of structure a right is decreed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightKind {
    /// Direct-flow diversion right.
    Diversion,
    /// Instream-flow right.
    Instream,
    /// Reservoir storage right.
    Reservoir,
    /// Groundwater well right.
    Well,
    /// Operational right.
    Operational,
}

/// Behaviour switches for one [`RightKind`].
#[derive(Debug)]
pub struct RightKindInfo {
    /// The kind described.
    pub kind: RightKind,
    /// Display name.
    pub name: &'static str,
    /// Conventional right-file extension.
    pub extension: &'static str,
    /// Units a decree is given in when none are stated.
    pub default_units: DataUnits,
    /// Whether records may carry a parcel id and year.
    pub has_parcels: bool,
}

/// One entry per kind, indexed by `RightKind as usize`.
static RIGHT_KINDS: [RightKindInfo; 5] = [
    RightKindInfo {
        kind: RightKind::Diversion,
        name: "Diversion",
        extension: "ddr",
        default_units: DataUnits::Cfs,
        has_parcels: false,
    },
    RightKindInfo {
        kind: RightKind::Instream,
        name: "Instream Flow",
        extension: "ifr",
        default_units: DataUnits::Cfs,
        has_parcels: false,
    },
    RightKindInfo {
        kind: RightKind::Reservoir,
        name: "Reservoir",
        extension: "rer",
        default_units: DataUnits::Acft,
        has_parcels: false,
    },
    RightKindInfo {
        kind: RightKind::Well,
        name: "Well",
        extension: "wer",
        default_units: DataUnits::Cfs,
        has_parcels: true,
    },
    RightKindInfo {
        kind: RightKind::Operational,
        name: "Operational",
        extension: "opr",
        default_units: DataUnits::Cfs,
        has_parcels: false,
    },
];

impl RightKind {
    /// Static metadata for this kind.
    pub fn info(self) -> &'static RightKindInfo {
        &RIGHT_KINDS[self as usize]
    }

    /// All kinds in table order.
    pub fn all() -> impl Iterator<Item = RightKind> {
        RIGHT_KINDS.iter().map(|info| info.kind)
    }

    /// Looks a kind up by right-file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<RightKind> {
        RIGHT_KINDS
            .iter()
            .find(|info| info.extension.eq_ignore_ascii_case(ext.trim_start_matches('.')))
            .map(|info| info.kind)
    }
}
