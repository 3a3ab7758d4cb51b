use crate::providers::geo::Record;
use console::Style;
use std::fmt::Write as _;

/// Width the report labels are padded to.
const LABEL_WIDTH: usize = 15;

const PROXY_DETECTED: &str = "Yes (Proxy/VPN detected)";
const PROXY_CLEAR: &str = "No";

/// Colour palette shared by the report and the menu.
#[derive(Debug, Clone)]
pub struct Theme {
  /// Menu text and report labels.
  pub menu: Style,
  /// Selected option and report values.
  pub highlight: Style,
  /// Prompts and status lines.
  pub prompt: Style,
  /// ASCII art banner.
  pub banner: Style,
}

impl Default for Theme {
  fn default() -> Self {
    Self {
      menu: Style::new().color256(10),
      highlight: Style::new().bold().blue(),
      prompt: Style::new().bold().cyan(),
      banner: Style::new().bold().yellow(),
    }
  }
}

impl Theme {
  /// A theme that never emits escape sequences.
  #[must_use]
  pub fn plain() -> Self {
    Self {
      menu: Style::new(),
      highlight: Style::new(),
      prompt: Style::new(),
      banner: Style::new(),
    }
  }
}

/// Text shown in the report for the record's proxy flag.
///
/// See [`Record::is_proxy`] for which values count; everything else,
/// including a missing field, is reported as `No`.
#[must_use]
pub const fn proxy_status(flagged: bool) -> &'static str {
  if flagged {
    PROXY_DETECTED
  } else {
    PROXY_CLEAR
  }
}

/// Builds the maps link from the raw coordinate strings.
///
/// Coordinates are not validated, so a missing value shows up as `N/A`
/// inside the URL.
#[must_use]
pub fn map_link(base: &str, latitude: &str, longitude: &str) -> String {
  format!("{}/{latitude},{longitude}", base.trim_end_matches('/'))
}

/// Formats a successful lookup as the labelled geolocation report.
#[must_use]
pub fn render(record: &Record, theme: &Theme, maps_base: &str) -> String {
  let latitude = record.field("latitude");
  let longitude = record.field("longitude");
  let proxy = proxy_status(record.is_proxy());

  let rows = [
    ("IP Address:", record.field("ip")),
    ("Country:", record.field("country_name")),
    ("Region/State:", record.field("region_name")),
    ("City:", record.field("city_name")),
    ("ISP/Org:", record.field("isp")),
    ("Time Zone:", record.field("time_zone")),
    ("Proxy Status:", proxy.to_string()),
    ("Coordinates:", format!("{latitude}, {longitude}")),
  ];

  let mut out = String::new();
  let _ = writeln!(
    out,
    "\n{}",
    theme.highlight.apply_to("--- IP Geolocation Report ---")
  );
  for (label, value) in &rows {
    let _ = writeln!(
      out,
      "{}{}",
      theme.menu.apply_to(format!("{label:<LABEL_WIDTH$}")),
      theme.highlight.apply_to(value)
    );
  }
  let _ = writeln!(
    out,
    "{}",
    theme.highlight.apply_to("-----------------------------")
  );
  let _ = writeln!(
    out,
    "{}{}",
    theme.prompt.apply_to("🗺️ Google Maps: "),
    theme
      .highlight
      .apply_to(map_link(maps_base, &latitude, &longitude))
  );
  out
}
