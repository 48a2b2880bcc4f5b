use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// https://docs.aws.amazon.com/general/latest/gr/rande.html#regional-endpoints
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    // Africa (Cape Town)           af-south-1
    AfSouth1,

    // Asia Pacific (Hong Kong)     ap-east-1
    ApEast1,

    // Asia Pacific (Tokyo)         ap-northeast-1
    ApNortheast1,

    // Asia Pacific (Seoul)         ap-northeast-2
    ApNortheast2,

    // Asia Pacific (Osaka)         ap-northeast-3
    ApNortheast3,

    // Asia Pacific (Mumbai)        ap-south-1
    ApSouth1,

    // Asia Pacific (Hyderabad)     ap-south-2
    ApSouth2,

    // Asia Pacific (Singapore)     ap-southeast-1
    ApSoutheast1,

    // Asia Pacific (Sydney)        ap-southeast-2
    ApSoutheast2,

    // Asia Pacific (Jakarta)       ap-southeast-3
    ApSoutheast3,

    // Asia Pacific (Melbourne)     ap-southeast-4
    ApSoutheast4,

    // Canada (Central)             ca-central-1
    CaCentral1,

    // China (Beijing)              cn-north-1
    CnNorth1,

    // China (Ningxia)              cn-northwest-1
    CnNorthwest1,

    // Europe (Frankfurt)           eu-central-1
    EuCentral1,

    // Europe (Zurich)              eu-central-2
    EuCentral2,

    // Europe (Stockholm)           eu-north-1
    EuNorth1,

    // Europe (Milan)               eu-south-1
    EuSouth1,

    // Europe (Spain)               eu-south-2
    EuSouth2,

    // Europe (Ireland)             eu-west-1
    EuWest1,

    // Europe (London)              eu-west-2
    EuWest2,

    // Europe (Paris)               eu-west-3
    EuWest3,

    // Israel (Tel Aviv)            il-central-1
    IlCentral1,

    // Middle East (UAE)            me-central-1
    MeCentral1,

    // Middle East (Bahrain)        me-south-1
    MeSouth1,

    // South America (São Paulo)    sa-east-1
    SaEast1,

    // US East (N. Virginia)        us-east-1
    UsEast1,

    // US East (Ohio)               us-east-2
    UsEast2,

    // AWS GovCloud (US-East)       us-gov-east-1
    UsGovEast1,

    // AWS GovCloud (US-West)       us-gov-west-1
    UsGovWest1,

    // US West (N. California)      us-west-1
    UsWest1,

    // US West (Oregon)             us-west-2
    UsWest2,

    // Custom region, endpoint
    Custom { name: String, endpoint: String },
}

/// Every AWS region, in the order of the enum.
static AWS_REGIONS: [Region; 32] = [
    Region::AfSouth1,
    Region::ApEast1,
    Region::ApNortheast1,
    Region::ApNortheast2,
    Region::ApNortheast3,
    Region::ApSouth1,
    Region::ApSouth2,
    Region::ApSoutheast1,
    Region::ApSoutheast2,
    Region::ApSoutheast3,
    Region::ApSoutheast4,
    Region::CaCentral1,
    Region::CnNorth1,
    Region::CnNorthwest1,
    Region::EuCentral1,
    Region::EuCentral2,
    Region::EuNorth1,
    Region::EuSouth1,
    Region::EuSouth2,
    Region::EuWest1,
    Region::EuWest2,
    Region::EuWest3,
    Region::IlCentral1,
    Region::MeCentral1,
    Region::MeSouth1,
    Region::SaEast1,
    Region::UsEast1,
    Region::UsEast2,
    Region::UsGovEast1,
    Region::UsGovWest1,
    Region::UsWest1,
    Region::UsWest2,
];

impl Region {
    #[must_use]
    pub fn name(&self) -> &str {
        match *self {
            Self::AfSouth1 => "af-south-1",
            Self::ApEast1 => "ap-east-1",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::ApNortheast2 => "ap-northeast-2",
            Self::ApNortheast3 => "ap-northeast-3",
            Self::ApSouth1 => "ap-south-1",
            Self::ApSouth2 => "ap-south-2",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::ApSoutheast3 => "ap-southeast-3",
            Self::ApSoutheast4 => "ap-southeast-4",
            Self::CaCentral1 => "ca-central-1",
            Self::CnNorth1 => "cn-north-1",
            Self::CnNorthwest1 => "cn-northwest-1",
            Self::EuCentral1 => "eu-central-1",
            Self::EuCentral2 => "eu-central-2",
            Self::EuNorth1 => "eu-north-1",
            Self::EuSouth1 => "eu-south-1",
            Self::EuSouth2 => "eu-south-2",
            Self::EuWest1 => "eu-west-1",
            Self::EuWest2 => "eu-west-2",
            Self::EuWest3 => "eu-west-3",
            Self::IlCentral1 => "il-central-1",
            Self::MeCentral1 => "me-central-1",
            Self::MeSouth1 => "me-south-1",
            Self::SaEast1 => "sa-east-1",
            Self::UsEast1 => "us-east-1",
            Self::UsEast2 => "us-east-2",
            Self::UsGovEast1 => "us-gov-east-1",
            Self::UsGovWest1 => "us-gov-west-1",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::Custom { ref name, .. } => name,
        }
    }

    /// Host (optionally with scheme and port) requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match *self {
            Self::CnNorth1 | Self::CnNorthwest1 => {
                format!("s3.{}.amazonaws.com.cn", self.name())
            }
            Self::Custom { ref endpoint, .. } => endpoint.to_string(),
            _ => format!("s3.{}.amazonaws.com", self.name()),
        }
    }

    /// Names of all AWS regions, sorted.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = AWS_REGIONS.iter().map(Self::name).collect();
        names.sort_unstable();
        names
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.to_lowercase();
        AWS_REGIONS
            .iter()
            .find(|region| region.name() == v)
            .cloned()
            .ok_or_else(|| ParseRegionError::new(s))
    }
}

/// An error produced when attempting to convert a `str` into a `Region` fails.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseRegionError {
    message: String,
}

impl ParseRegionError {
    /// Parses a region given as a string literal into a type `Region'
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            message: format!("Not a valid AWS region: {input}"),
        }
    }
}

impl Error for ParseRegionError {}

impl Display for ParseRegionError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn from_str() {
        assert_eq!(
            "foo"
                .parse::<Region>()
                .err()
                .expect("Parsing foo as a Region was not an error")
                .to_string(),
            "Not a valid AWS region: foo".to_owned()
        );
        assert_eq!("af-south-1".parse(), Ok(Region::AfSouth1));
        assert_eq!("ap-northeast-3".parse(), Ok(Region::ApNortheast3));
        assert_eq!("ca-central-1".parse(), Ok(Region::CaCentral1));
        assert_eq!("eu-central-1".parse(), Ok(Region::EuCentral1));
        assert_eq!("EU-WEST-1".parse(), Ok(Region::EuWest1));
        assert_eq!("us-gov-west-1".parse(), Ok(Region::UsGovWest1));
        assert_eq!("cn-northwest-1".parse(), Ok(Region::CnNorthwest1));
    }

    #[test]
    fn names_round_trip() {
        for name in Region::names() {
            assert_eq!(name.parse::<Region>().map(|r| r.name().to_string()), Ok(name.to_string()));
        }
    }

    #[test]
    fn names_sorted() {
        let names = Region::names();
        assert_eq!(names.len(), 32);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(names.first(), Some(&"af-south-1"));
        assert_eq!(names.last(), Some(&"us-west-2"));
    }

    #[test]
    fn endpoints() {
        assert_eq!(Region::UsWest1.endpoint(), "s3.us-west-1.amazonaws.com");
        assert_eq!(Region::CnNorth1.endpoint(), "s3.cn-north-1.amazonaws.com.cn");
        let custom = Region::Custom {
            name: "us-east-1".to_string(),
            endpoint: "http://127.0.0.1:9000".to_string(),
        };
        assert_eq!(custom.name(), "us-east-1");
        assert_eq!(custom.endpoint(), "http://127.0.0.1:9000");
    }
}
