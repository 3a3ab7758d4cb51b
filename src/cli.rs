use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "ip-tracker", version)]
#[command(
  about = "Look up the geolocation of an IP address or domain.",
  long_about = "An interactive terminal utility that resolves an IP address or domain name to country, region, city, ISP, time zone, coordinates and proxy/VPN status using the ip2location.io API. Set IP2LOCATION_API_KEY to use your own API key."
)]
pub struct Cli {
  /// IP address or domain to look up once before the menu is shown.
  pub target: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_args(args: &[&str]) -> Vec<String> {
    std::iter::once("ip-tracker".to_string())
      .chain(args.iter().map(std::string::ToString::to_string))
      .collect()
  }

  #[test]
  fn test_no_target() {
    let cli = Cli::try_parse_from(make_args(&[]))
      .expect("Should parse without a target");
    assert!(cli.target.is_none());
  }

  #[test]
  fn test_ip_as_target() {
    let cli = Cli::try_parse_from(make_args(&["1.1.1.1"]))
      .expect("Should parse IP address as target");
    assert_eq!(cli.target.as_deref(), Some("1.1.1.1"));
  }

  #[test]
  fn test_domain_as_target() {
    let cli = Cli::try_parse_from(make_args(&["rust-lang.org"]))
      .expect("Should parse domain as target");
    assert_eq!(cli.target.as_deref(), Some("rust-lang.org"));
  }

  #[test]
  fn test_extra_positional_fails() {
    let result = Cli::try_parse_from(make_args(&["8.8.8.8", "1.1.1.1"]));
    assert!(
      result.is_err(),
      "Parsing should fail when more than one target is given"
    );
  }

  #[test]
  fn test_unknown_flag_fails() {
    let result = Cli::try_parse_from(make_args(&["--json", "8.8.8.8"]));
    assert!(
      matches!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::UnknownArgument
      ),
      "Error kind should be UnknownArgument"
    );
  }
}
