use crate::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Protocol version named in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    V1,
}
impl ProtocolVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}
impl FromStr for ProtocolVersion {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Self::V1),
            other => exn::bail!(ErrorKind::UnsupportedVersion(other.to_string())),
        }
    }
}
impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_v1_is_supported() {
        assert_eq!("v1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1);
        assert_eq!(ProtocolVersion::V1.to_string(), "v1");
    }

    #[rstest]
    #[case("v2")]
    #[case("V1")]
    #[case(" v1")]
    #[case("1")]
    #[case("")]
    fn test_anything_else_is_unsupported(#[case] raw: &str) {
        let err = raw.parse::<ProtocolVersion>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedVersion(v) if v == raw));
    }
}
