//! Debian architecture selector.

/// Architecture of a Debian Contents index.
///
/// The set is closed: a `Contents-<arch>.gz` file exists on the mirror for
/// exactly these names, so anything else is rejected at parse time and the
/// rest of the pipeline never sees an invalid selector.
///
/// # Example
///
/// ```
/// use debtop_core::Arch;
///
/// let arch: Arch = "amd64".parse().unwrap();
/// assert_eq!(arch.to_string(), "amd64");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// Architecture-independent packages
    All,
    /// `x86_64`
    #[default]
    Amd64,
    /// 64-bit ARM
    Arm64,
    /// ARM EABI (softfloat)
    Armel,
    /// ARM hard-float
    Armhf,
    /// 32-bit x86
    I386,
    /// 64-bit MIPS (little-endian)
    Mips64el,
    /// 32-bit MIPS (little-endian)
    Mipsel,
    /// 64-bit PowerPC (little-endian)
    Ppc64el,
    /// IBM System z
    S390x,
    /// Source packages
    Source,
}

impl Arch {
    /// Every valid selector, in mirror order.
    pub const ALL: [Self; 11] = [
        Self::All,
        Self::Amd64,
        Self::Arm64,
        Self::Armel,
        Self::Armhf,
        Self::I386,
        Self::Mips64el,
        Self::Mipsel,
        Self::Ppc64el,
        Self::S390x,
        Self::Source,
    ];

    /// The name as it appears in the index filename on the mirror.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Armel => "armel",
            Self::Armhf => "armhf",
            Self::I386 => "i386",
            Self::Mips64el => "mips64el",
            Self::Mipsel => "mipsel",
            Self::Ppc64el => "ppc64el",
            Self::S390x => "s390x",
            Self::Source => "source",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| format!("unknown architecture: {s}"))
    }
}

impl clap::ValueEnum for Arch {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
