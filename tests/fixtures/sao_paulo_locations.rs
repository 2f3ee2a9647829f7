//! Named São Paulo locations for end-to-end fixtures.
//!
//! Coordinates are rounded to four decimals and formatted the way the
//! loaders receive them.

/// A named `"lat,lon"` location.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub coords: &'static str,
}

impl Place {
    pub const fn new(name: &'static str, coords: &'static str) -> Self {
        Self { name, coords }
    }
}

// ============================================================================
// Garages (driver base locations)
// ============================================================================

pub const GARAGES: &[Place] = &[
    Place::new("Garagem Barra Funda", "-23.5256,-46.6672"),
    Place::new("Garagem Santo Amaro", "-23.6528,-46.7102"),
    Place::new("Garagem Itaquera", "-23.5404,-46.4560"),
];

// ============================================================================
// Terminals (route origins and destinations)
// ============================================================================

pub const TERMINALS: &[Place] = &[
    Place::new("Terminal Barra Funda", "-23.5257,-46.6670"),
    Place::new("Terminal Santo Amaro", "-23.6530,-46.7100"),
    Place::new("Terminal Itaquera", "-23.5405,-46.4562"),
    Place::new("Terminal Parque Dom Pedro II", "-23.5466,-46.6290"),
    Place::new("Terminal Pinheiros", "-23.5671,-46.7016"),
];

pub fn terminal(name: &str) -> &'static str {
    TERMINALS
        .iter()
        .find(|place| place.name == name)
        .map(|place| place.coords)
        .unwrap_or_else(|| panic!("unknown terminal {name}"))
}

pub fn garage(name: &str) -> &'static str {
    GARAGES
        .iter()
        .find(|place| place.name == name)
        .map(|place| place.coords)
        .unwrap_or_else(|| panic!("unknown garage {name}"))
}
