use std::sync::OnceLock;

use regex_lite::Regex;
use semver::Version;

/// Parse a semantic version, accepting the shorthand forms used for Kubernetes versions
///
/// A leading `v` is allowed and missing minor/patch components default to 0, so `1.18`, `v1.18.3`
/// and `1.18.3-rc.1+build.5` are all valid. Anything else is handed to `semver` as-is so the caller
/// receives its parse error
pub fn get_semver(ver: &str) -> Result<Version, semver::Error> {
  static RE: OnceLock<Regex> = OnceLock::new();
  let re = RE.get_or_init(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$").expect("valid semver pattern")
  });

  match re.captures(ver) {
    Some(cap) => {
      let component = |idx: usize| cap.get(idx).map_or("0", |m| m.as_str());
      let normalized = format!(
        "{}.{}.{}{}{}",
        component(1),
        component(2),
        component(3),
        cap.get(4).map_or("", |m| m.as_str()),
        cap.get(5).map_or("", |m| m.as_str()),
      );
      Version::parse(&normalized)
    }
    None => Version::parse(ver),
  }
}

#[cfg(test)]
mod tests {
  use rstest::*;

  use super::*;

  #[test]
  fn it_gets_semver_bare() {
    let expected = Version::parse("1.20.4").unwrap();
    let result = get_semver("1.20.4").unwrap();
    assert_eq!(result, expected);
  }

  #[test]
  fn it_gets_semver_leading() {
    let expected = Version::parse("1.20.4").unwrap();
    let result = get_semver("v1.20.4").unwrap();
    assert_eq!(result, expected);
  }

  #[test]
  fn it_gets_semver_prerelease() {
    let expected = Version::parse("1.20.4-rc.1+build.5").unwrap();
    let result = get_semver("v1.20.4-rc.1+build.5").unwrap();
    assert_eq!(result, expected);
  }

  #[rstest]
  #[case("1.18", "1.18.0")]
  #[case("v1", "1.0.0")]
  #[case("1.18.3", "1.18.3")]
  fn it_fills_missing_components(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(get_semver(input).unwrap(), Version::parse(expected).unwrap());
  }

  #[rstest]
  #[case("not-a-version")]
  #[case("")]
  #[case("1.18.x")]
  #[case("Kubernetes v1.24.13")]
  #[case("1.2.3.4")]
  fn it_rejects_invalid_versions(#[case] input: &str) {
    assert!(get_semver(input).is_err());
  }
}
