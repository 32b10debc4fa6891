//! Special event logo lookup
//!
//! Special events run under the generic "special events" series and carry no
//! useful series logo, so their logo is picked from the event or season label.
//! The table is injected through [`LogoLookup`] so the mapper never depends on
//! its contents.

use std::collections::HashMap;

/// Maps an event or season label to a logo asset file name.
pub trait LogoLookup: Send + Sync {
    /// Logo for `name`, or `None` when no special mapping exists.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Apply a lookup to `label`, keeping `current` when nothing matches.
///
/// Trailing whitespace on the label is ignored.
pub fn resolve_logo(logos: &dyn LogoLookup, label: &str, current: &str) -> String {
    logos.lookup(label.trim_end()).unwrap_or_else(|| current.to_string())
}

/// Lookup that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecialLogos;

impl LogoLookup for NoSpecialLogos {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl LogoLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Adapts a plain function or closure into a [`LogoLookup`].
pub struct LogoFn<F>(pub F);

impl<F> LogoLookup for LogoFn<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

/// Built-in table of iRacing special events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialEventLogos;

const SPECIAL_EVENTS: &[(&str, &str)] = &[
    ("2022 10 Hours of Suzuka Powered by VCO", "iRSE_SUZUKA_10HR_2022_LOGO.png"),
    ("2023 12 Hours of Sebring Presented by VCO", "iRSE_SEBRING_12_2023_VCO.png"),
    ("2022 12 Hours of Sebring Powered by Heusinkveld", "iRSE_SEBRING_12_2022_LOGO.png"),
    ("2022 24 Hours of Nurburgring Powered by VCO", "iRSE_NÜRBURGRING_24_2022_LOGO.png"),
    ("2022 6 Hours of the Glen", "iRSE_WATKINS_GLEN_6HR_2022_LOGO.png"),
    ("2022 Bathurst 1000 AU", "iRSE_BATHURST_1000_AU_2022_LOGO.png"),
    ("2022 Bathurst 1000 US", "iRSE_BATHURST_1000_2022_LOGO.png"),
    ("2023 Bathurst 12 Hour", "iRSE_BATHURST_12.png"),
    ("2022 Bathurst 12 Hour", "iRSE_BATHURST_12_2022_LOGO.png"),
    ("2022 Crandon Championship", "iRSE_CRANDON_PRO4_CHAMPIONSHIP_2022_LOGO.png"),
    ("2023 24 Hours of Daytona Powered by VCO", "iRSE_DAYTONA_24_2023_VCO.png"),
    ("2022 24 Hours of Daytona", "iRSE_DAYTONA_24_2022_LOGO.png"),
    ("2022 iRacing Chili Bowl Nationals", "iRSE_CHILI_BOWL_2022_LOGO.png"),
    ("2022 iRacing Knoxville Nationals", "iRSE_KNOXVILLE_NATIONALS_2022_LOGO.png"),
    ("2022 iRacing.com Indy 500", "iRSE_INDY_500_2022_LOGO.png"),
    ("2022 iRacing.com Indy 500 - Fixed", "iRSE_INDY_500_FIXED_2022_LOGO.png"),
    ("2022 Petit Le Mans Powered by VCO", "iRSE_PETIT_LE_MANS_2022_LOGO.png"),
    ("2023 Road America 500", "iRSE_ROAD_AMERICA_500.png"),
    ("iRacing 24 hours of Spa Powered by Heusinkveld- 2022", "iRSE_SPA_24_2022_LOGO.png"),
    ("Falken Tyre 24 hours of Spa - 2023", "iRSE_FALKEN_TIRE_SPA_24HR.png"),
    ("Roar Before the 24 - 2023", "iRSE_ROAR_2023_LOGO.png"),
    ("Roar Before the 24 - 2022", "iRSE_ROAR_2022_LOGO.png"),
    ("Winter Derby Presented by iRacing - 2022", "iRSE_WINTER_DERBY_2022_LOGO.png"),
    ("Winter Derby Fixed Presented by iRacing - 2022", "iRSE_WINTER_DERBY_2022_LOGO.png"),
    (
        "2022 Peachtree Three benefiting the National MS Society",
        "iRSE_NMS_PEACHTREE_THREE_2022.png",
    ),
    ("2023 24 Hours of Nurburgring Presented by iRacing", "iRSE_NÜRBURGRING_24H.png"),
];

impl LogoLookup for SpecialEventLogos {
    fn lookup(&self, name: &str) -> Option<String> {
        let name = name.trim_end();
        SPECIAL_EVENTS.iter().find(|(event, _)| *event == name).map(|(_, logo)| logo.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_event_resolves() {
        assert_eq!(
            SpecialEventLogos.lookup("2023 Road America 500").as_deref(),
            Some("iRSE_ROAD_AMERICA_500.png")
        );
    }

    #[test]
    fn trailing_whitespace_is_ignored() {
        assert_eq!(
            resolve_logo(&SpecialEventLogos, "Roar Before the 24 - 2023 \t", "series.png"),
            "iRSE_ROAR_2023_LOGO.png"
        );
    }

    #[test]
    fn leading_whitespace_is_significant() {
        assert_eq!(
            resolve_logo(&SpecialEventLogos, " Roar Before the 24 - 2023", "series.png"),
            "series.png"
        );
    }

    #[test]
    fn unknown_event_keeps_current_logo() {
        assert_eq!(resolve_logo(&SpecialEventLogos, "Weekly GT Sprint", "gt.png"), "gt.png");
        assert_eq!(resolve_logo(&SpecialEventLogos, "Weekly GT Sprint", ""), "");
    }

    #[test]
    fn custom_lookups_can_be_injected() {
        let table: HashMap<String, String> =
            [("Club Finale".to_string(), "club.png".to_string())].into_iter().collect();
        assert_eq!(resolve_logo(&table, "Club Finale", ""), "club.png");

        let closure = LogoFn(|name: &str| (name == "Any").then(|| "any.png".to_string()));
        assert_eq!(resolve_logo(&closure, "Any", "x.png"), "any.png");
        assert_eq!(resolve_logo(&NoSpecialLogos, "Any", "x.png"), "x.png");
    }
}
