use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::models::VehicleRecord;

fn fixed_placeholders() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{(?:tier|country|class|category|id)\}").expect("invalid fixed placeholder regex")
    })
}

fn property_placeholders() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("invalid placeholder regex"))
}

/// Expand `{placeholder}` tokens in a user-authored filename pattern.
///
/// `{tier}`, `{country}`, `{class}`, `{category}` and `{id}` are replaced first with the
/// vehicle's own attributes (nation, class and category lower-cased). The text between them
/// is then scanned for any other `{key}`, looked up in the vehicle's properties, with unknown
/// keys becoming an empty string. Substituted values are never scanned again.
pub fn expand_pattern(pattern: &str, vehicle: &VehicleRecord) -> String {
    let mut expanded = String::with_capacity(pattern.len());
    let mut literal_start = 0;

    for placeholder in fixed_placeholders().find_iter(pattern) {
        expanded.push_str(&expand_properties(&pattern[literal_start..placeholder.start()], vehicle));
        let key = &placeholder.as_str()[1..placeholder.len() - 1];
        expanded.push_str(&fixed_value(key, vehicle));
        literal_start = placeholder.end();
    }
    expanded.push_str(&expand_properties(&pattern[literal_start..], vehicle));

    expanded
}

fn fixed_value(key: &str, vehicle: &VehicleRecord) -> String {
    match key {
        "tier" => vehicle.tier.to_string(),
        "country" => vehicle.country.as_str().to_string(),
        "class" => vehicle.class.as_str().to_string(),
        "category" => vehicle.category.as_str().to_string(),
        _ => vehicle.id.clone(),
    }
}

fn expand_properties<'t>(literal: &'t str, vehicle: &VehicleRecord) -> Cow<'t, str> {
    property_placeholders().replace_all(literal, |caps: &Captures<'_>| {
        vehicle.property(&caps[1]).unwrap_or_default().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Country, VehicleClass};

    fn vehicle() -> VehicleRecord {
        let mut vehicle = VehicleRecord::new("ussr-T-34");
        vehicle.country = Country::Ussr;
        vehicle.class = VehicleClass::Light;
        vehicle.category = Category::Premium;
        vehicle.tier = 5;
        vehicle.properties.insert("NameShort".into(), "T-34".into());
        vehicle
    }

    #[test]
    fn substitutes_unknown_keys_with_empty_strings() {
        assert_eq!(expand_pattern("{country}-{class}-{unknownkey}", &vehicle()), "ussr-light-");
    }

    #[test]
    fn expands_fixed_and_property_placeholders() {
        assert_eq!(
            expand_pattern("Images/tank-{country}-{class}-{category}-{NameShort}.png", &vehicle()),
            "Images/tank-ussr-light-premium-T-34.png"
        );
        assert_eq!(expand_pattern("{tier}/{id}", &vehicle()), "5/ussr-T-34");
    }

    #[test]
    fn does_not_rescan_substituted_values() {
        let mut vehicle = vehicle();
        vehicle.properties.insert("nested".into(), "{country}".into());
        assert_eq!(expand_pattern("{nested}-{tier}", &vehicle), "{country}-5");
    }

    #[test]
    fn fixed_placeholders_survive_a_preceding_open_brace() {
        assert_eq!(expand_pattern("{x{id}.png", &VehicleRecord::new("ussr-T-34")), "{xussr-T-34.png");
        assert_eq!(expand_pattern("{{NameShort}}", &vehicle()), "{T-34}");
    }

    #[test]
    fn leaves_text_without_complete_placeholders_untouched() {
        assert_eq!(expand_pattern("plain.png", &vehicle()), "plain.png");
        assert_eq!(expand_pattern("{}{country", &vehicle()), "{}{country");
    }
}
