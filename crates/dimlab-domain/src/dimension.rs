//! Dimension module - the fixed vocabulary of ideological axes

use std::fmt;

/// One of the 20 fixed ideological dimensions a hypothesis or topic can be
/// tagged with.
///
/// The vocabulary is closed: scoring builds 20-length indicator vectors over
/// exactly these axes, so an unknown dimension name is a data defect, never a
/// new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Dimension {
    Lrgen,
    Lrecon,
    Galtan,
    SpendVTax,
    Deregulation,
    Redistribution,
    EconInterven,
    CivlibLaworder,
    SocialLifestyle,
    ReligiousPrinciples,
    ImmigratePolicy,
    Multiculturalism,
    UrbanRural,
    Environment,
    Cosmo,
    Protectionism,
    Regions,
    InternationalSecurity,
    EthnicMinorities,
    EuIntegration,
}

impl Dimension {
    /// Number of dimensions in the vocabulary.
    pub const COUNT: usize = 20;

    /// All dimensions in canonical order.
    pub const ALL: [Dimension; Self::COUNT] = [
        Dimension::Lrgen,
        Dimension::Lrecon,
        Dimension::Galtan,
        Dimension::SpendVTax,
        Dimension::Deregulation,
        Dimension::Redistribution,
        Dimension::EconInterven,
        Dimension::CivlibLaworder,
        Dimension::SocialLifestyle,
        Dimension::ReligiousPrinciples,
        Dimension::ImmigratePolicy,
        Dimension::Multiculturalism,
        Dimension::UrbanRural,
        Dimension::Environment,
        Dimension::Cosmo,
        Dimension::Protectionism,
        Dimension::Regions,
        Dimension::InternationalSecurity,
        Dimension::EthnicMinorities,
        Dimension::EuIntegration,
    ];

    /// Get the dimension name as it appears in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Lrgen => "LRGEN",
            Dimension::Lrecon => "LRECON",
            Dimension::Galtan => "GALTAN",
            Dimension::SpendVTax => "SPENDVTAX",
            Dimension::Deregulation => "DEREGULATION",
            Dimension::Redistribution => "REDISTRIBUTION",
            Dimension::EconInterven => "ECON_INTERVEN",
            Dimension::CivlibLaworder => "CIVLIB_LAWORDER",
            Dimension::SocialLifestyle => "SOCIALLIFESTYLE",
            Dimension::ReligiousPrinciples => "RELIGIOUS_PRINCIPLES",
            Dimension::ImmigratePolicy => "IMMIGRATE_POLICY",
            Dimension::Multiculturalism => "MULTICULTURALISM",
            Dimension::UrbanRural => "URBAN_RURAL",
            Dimension::Environment => "ENVIRONMENT",
            Dimension::Cosmo => "COSMO",
            Dimension::Protectionism => "PROTECTIONISM",
            Dimension::Regions => "REGIONS",
            Dimension::InternationalSecurity => "INTERNATIONAL_SECURITY",
            Dimension::EthnicMinorities => "ETHNIC_MINORITIES",
            Dimension::EuIntegration => "EU_INTEGRATION",
        }
    }

    /// Parse a dimension from its data-file name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.iter().copied().find(|d| d.as_str() == upper)
    }

    /// One-line description shown in the dimension reference.
    pub fn describe(&self) -> &'static str {
        match self {
            Dimension::Lrgen => "supports left/right ideology overall",
            Dimension::Lrecon => {
                "supports left/right economic ideology, role of government in economy"
            }
            Dimension::Galtan => "libertarian vs traditional/authoritarian view",
            Dimension::SpendVTax => "favors improving public services vs reducing taxes",
            Dimension::Deregulation => "opposes/supports deregulation of markets",
            Dimension::Redistribution => "favors/opposes redistribution of wealth",
            Dimension::EconInterven => "favors/opposes state intervention in economy",
            Dimension::CivlibLaworder => {
                "promotes civil liberties vs tough measures against crime"
            }
            Dimension::SocialLifestyle => {
                "supports/opposes liberal policies (e.g. homosexual rights)"
            }
            Dimension::ReligiousPrinciples => {
                "opposes/supports religious principles in politics"
            }
            Dimension::ImmigratePolicy => "favors liberal vs restrictive immigration policy",
            Dimension::Multiculturalism => "favors multiculturalism vs assimilation",
            Dimension::UrbanRural => "supports urban vs rural interests",
            Dimension::Environment => "supports environmental protection vs economic growth",
            Dimension::Cosmo => "advocates cosmopolitanism vs nationalism",
            Dimension::Protectionism => {
                "favors trade liberalization vs protection of domestic producers"
            }
            Dimension::Regions => "favors/opposes political decentralization",
            Dimension::InternationalSecurity => "favors/opposes troop deployment",
            Dimension::EthnicMinorities => "supports/opposes more rights for ethnic minorities",
            Dimension::EuIntegration => "opposes/supports EU integration",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown dimension: {}", s))
    }
}
