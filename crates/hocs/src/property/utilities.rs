use serde::Serialize;

use super::geography::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilityKind {
    Electric,
    Gas,
    Water,
}

/// Published contact details for a utility provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityProvider {
    pub code: &'static str,
    pub name: &'static str,
    pub kind: UtilityKind,
    pub website: &'static str,
    pub programs_url: &'static str,
    pub phone: &'static str,
}

/// Approximate service territory as (min_lat, max_lat, min_lon, max_lon).
#[derive(Debug, Clone, Copy)]
struct ServiceArea(f64, f64, f64, f64);

impl ServiceArea {
    fn contains(&self, location: &Location) -> bool {
        let ServiceArea(min_lat, max_lat, min_lon, max_lon) = *self;
        (min_lat..=max_lat).contains(&location.latitude)
            && (min_lon..=max_lon).contains(&location.longitude)
    }
}

const LA_CITY: ServiceArea = ServiceArea(33.7, 34.35, -118.67, -118.15);
const SOUTHERN_CA: ServiceArea = ServiceArea(33.0, 35.5, -119.5, -117.0);
const SAN_DIEGO: ServiceArea = ServiceArea(32.5, 33.5, -117.5, -116.5);
const NORTHERN_CA: ServiceArea = ServiceArea(36.0, 42.0, -124.0, -119.0);
const SACRAMENTO: ServiceArea = ServiceArea(38.3, 38.8, -121.6, -121.0);
const IRVINE: ServiceArea = ServiceArea(33.6, 33.8, -117.9, -117.7);
const EAST_BAY: ServiceArea = ServiceArea(37.7, 38.0, -122.4, -121.8);
const METROPOLITAN: ServiceArea = ServiceArea(33.0, 34.5, -119.0, -117.0);

/// Latitude splitting the default southern and northern territories.
const NORTH_SOUTH_SPLIT: f64 = 36.0;

pub const SCE: UtilityProvider = UtilityProvider {
    code: "SCE",
    name: "Southern California Edison",
    kind: UtilityKind::Electric,
    website: "https://www.sce.com",
    programs_url: "https://www.sce.com/residential/rebates-savings",
    phone: "1-800-655-4555",
};

pub const PGE: UtilityProvider = UtilityProvider {
    code: "PGE",
    name: "Pacific Gas and Electric",
    kind: UtilityKind::Electric,
    website: "https://www.pge.com",
    programs_url: "https://www.pge.com/en_US/residential/save-energy-money/savings-solutions-and-rebates/savings-solutions-and-rebates.page",
    phone: "1-800-743-5000",
};

pub const SDGE: UtilityProvider = UtilityProvider {
    code: "SDGE",
    name: "San Diego Gas & Electric",
    kind: UtilityKind::Electric,
    website: "https://www.sdge.com",
    programs_url: "https://www.sdge.com/residential/savings-center",
    phone: "1-800-411-7343",
};

pub const LADWP: UtilityProvider = UtilityProvider {
    code: "LADWP",
    name: "LADWP",
    kind: UtilityKind::Electric,
    website: "https://www.ladwp.com",
    programs_url: "https://www.ladwp.com/ladwp/faces/ladwp/residential/r-savemoney",
    phone: "1-800-342-5397",
};

pub const SMUD: UtilityProvider = UtilityProvider {
    code: "SMUD",
    name: "Sacramento Municipal Utility District",
    kind: UtilityKind::Electric,
    website: "https://www.smud.org",
    programs_url: "https://www.smud.org/en/Rate-Information/Residential-rates/Rebates-and-programs",
    phone: "1-888-742-7683",
};

pub const PASADENA_WATER_AND_POWER: UtilityProvider = UtilityProvider {
    code: "PWP",
    name: "Pasadena Water & Power",
    kind: UtilityKind::Electric,
    website: "https://www.cityofpasadena.net/water-and-power",
    programs_url: "https://www.cityofpasadena.net/water-and-power/energy-efficiency/",
    phone: "(626) 744-4005",
};

pub const GLENDALE_WATER_AND_POWER: UtilityProvider = UtilityProvider {
    code: "GWP",
    name: "Glendale Water & Power",
    kind: UtilityKind::Electric,
    website: "https://www.glendaleca.gov/government/departments/glendale-water-and-power",
    programs_url: "https://www.glendaleca.gov/government/departments/glendale-water-and-power/rebates",
    phone: "(818) 548-3300",
};

pub const BURBANK_WATER_AND_POWER: UtilityProvider = UtilityProvider {
    code: "BWP",
    name: "Burbank Water & Power",
    kind: UtilityKind::Electric,
    website: "https://www.burbankwaterandpower.com",
    programs_url: "https://www.burbankwaterandpower.com/conservation",
    phone: "(818) 238-3700",
};

pub const SOCALGAS: UtilityProvider = UtilityProvider {
    code: "SOCALGAS",
    name: "Southern California Gas Company",
    kind: UtilityKind::Gas,
    website: "https://www.socalgas.com",
    programs_url: "https://www.socalgas.com/save-money-and-energy",
    phone: "1-877-238-0092",
};

pub const PGE_GAS: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Gas,
    code: "PGE_GAS",
    ..PGE
};

pub const SDGE_GAS: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Gas,
    code: "SDGE_GAS",
    ..SDGE
};

pub const IRWD: UtilityProvider = UtilityProvider {
    code: "IRWD",
    name: "Irvine Ranch Water District",
    kind: UtilityKind::Water,
    website: "https://www.irwd.com",
    programs_url: "https://www.irwd.com/save-water-money",
    phone: "1-949-453-5300",
};

pub const LADWP_WATER: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Water,
    code: "LADWP_WATER",
    programs_url: "https://www.ladwp.com/ladwp/faces/ladwp/residential/r-savemoney/r-sm-watersavingprograms",
    ..LADWP
};

pub const EBMUD: UtilityProvider = UtilityProvider {
    code: "EBMUD",
    name: "East Bay Municipal Utility District",
    kind: UtilityKind::Water,
    website: "https://www.ebmud.com",
    programs_url: "https://www.ebmud.com/water/conservation-and-rebates/",
    phone: "1-866-403-2683",
};

pub const SDCWA: UtilityProvider = UtilityProvider {
    code: "SDCWA",
    name: "San Diego County Water Authority",
    kind: UtilityKind::Water,
    website: "https://www.sdcwa.org",
    programs_url: "https://www.sdcwa.org/conservation",
    phone: "1-858-522-6700",
};

pub const MWD: UtilityProvider = UtilityProvider {
    code: "MWD",
    name: "Metropolitan Water District of Southern California",
    kind: UtilityKind::Water,
    website: "https://www.mwdh2o.com",
    programs_url: "https://www.bewaterwise.com",
    phone: "1-800-225-5693",
};

pub const SANTA_MONICA_UTILITIES: UtilityProvider = UtilityProvider {
    code: "SMMU",
    name: "Santa Monica Municipal Utilities",
    kind: UtilityKind::Water,
    website: "https://www.santamonica.gov/water",
    programs_url: "https://www.santamonica.gov/topic-explainers/water-conservation",
    phone: "(310) 458-8224",
};

const PASADENA_WATER: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Water,
    ..PASADENA_WATER_AND_POWER
};

const GLENDALE_WATER: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Water,
    ..GLENDALE_WATER_AND_POWER
};

const BURBANK_WATER: UtilityProvider = UtilityProvider {
    kind: UtilityKind::Water,
    ..BURBANK_WATER_AND_POWER
};

/// Municipal utilities in Los Angeles County that run their own efficiency programs.
pub const LA_COUNTY_MUNICIPAL_PROVIDERS: [&str; 5] = [
    PASADENA_WATER_AND_POWER.name,
    LADWP.name,
    GLENDALE_WATER_AND_POWER.name,
    BURBANK_WATER_AND_POWER.name,
    SANTA_MONICA_UTILITIES.name,
];

/// Providers serving one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityAssignment {
    pub electric: &'static UtilityProvider,
    pub gas: &'static UtilityProvider,
    pub water: Option<&'static UtilityProvider>,
}

pub fn assign_utilities(location: &Location) -> UtilityAssignment {
    UtilityAssignment {
        electric: electric_provider(location),
        gas: gas_provider(location),
        water: water_provider(location),
    }
}

fn electric_provider(location: &Location) -> &'static UtilityProvider {
    match location.city {
        "Pasadena" => return &PASADENA_WATER_AND_POWER,
        "Glendale" => return &GLENDALE_WATER_AND_POWER,
        "Burbank" => return &BURBANK_WATER_AND_POWER,
        _ => {}
    }

    if location.city == "Los Angeles" && LA_CITY.contains(location) {
        return &LADWP;
    }
    if (location.city == "Sacramento" || location.county == "Sacramento")
        && SACRAMENTO.contains(location)
    {
        return &SMUD;
    }
    if (location.city == "San Diego" || location.county == "San Diego")
        && SAN_DIEGO.contains(location)
    {
        return &SDGE;
    }
    if NORTHERN_CA.contains(location) {
        return &PGE;
    }
    if SOUTHERN_CA.contains(location) {
        return &SCE;
    }

    if location.latitude < NORTH_SOUTH_SPLIT {
        &SCE
    } else {
        &PGE
    }
}

fn gas_provider(location: &Location) -> &'static UtilityProvider {
    if (location.city == "San Diego" || location.county == "San Diego")
        && SAN_DIEGO.contains(location)
    {
        return &SDGE_GAS;
    }
    if NORTHERN_CA.contains(location) {
        return &PGE_GAS;
    }
    if SOUTHERN_CA.contains(location) {
        return &SOCALGAS;
    }

    if location.latitude < NORTH_SOUTH_SPLIT {
        &SOCALGAS
    } else {
        &PGE_GAS
    }
}

fn water_provider(location: &Location) -> Option<&'static UtilityProvider> {
    match location.city {
        "Pasadena" => return Some(&PASADENA_WATER),
        "Glendale" => return Some(&GLENDALE_WATER),
        "Burbank" => return Some(&BURBANK_WATER),
        "Santa Monica" => return Some(&SANTA_MONICA_UTILITIES),
        _ => {}
    }

    if location.city == "Irvine" && IRVINE.contains(location) {
        return Some(&IRWD);
    }
    if location.city == "Los Angeles" && LA_CITY.contains(location) {
        return Some(&LADWP_WATER);
    }
    if matches!(location.city, "Oakland" | "Berkeley") && EAST_BAY.contains(location) {
        return Some(&EBMUD);
    }
    if location.county == "San Diego" && SAN_DIEGO.contains(location) {
        return Some(&SDCWA);
    }
    if METROPOLITAN.contains(location) {
        return Some(&MWD);
    }

    None
}

/// True when any of the given provider names is an LA County municipal utility.
pub fn is_la_county_municipal<'a>(mut providers: impl Iterator<Item = &'a str>) -> bool {
    providers.any(|name| LA_COUNTY_MUNICIPAL_PROVIDERS.contains(&name))
}
