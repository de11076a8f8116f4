//! Speech-markup rendering.
//!
//! Station names come from the feed as strings like "W 52 St & 11 Ave";
//! spoken literally they are gibberish. Numbers are wrapped in ordinal
//! say-as tags and the whole name in an address say-as tag so the voice
//! platform pronounces them properly.

use crate::select::Selection;

/// Wrap rendered fragments in a `<speak>` envelope.
pub fn speak(inner: &str) -> String {
    format!("<speak>{inner}</speak>")
}

/// Wrap a geocoded formatted address for pronunciation.
pub fn say_address(formatted: &str) -> String {
    format!("<say-as interpret-as=\"address\">{formatted}</say-as>")
}

/// Format a station name for pronunciation: '&' becomes "and" and
/// digit runs get ordinal tags, inside an address say-as wrapper.
pub fn say_station(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 64);
    let mut digits = String::new();

    let mut flush_digits = |out: &mut String, digits: &mut String| {
        if !digits.is_empty() {
            out.push_str("<say-as interpret-as=\"ordinal\">");
            out.push_str(digits);
            out.push_str("</say-as>");
            digits.clear();
        }
    };

    for c in name.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush_digits(&mut out, &mut digits);
            if c == '&' {
                out.push_str("and");
            } else {
                out.push(c);
            }
        }
    }
    flush_digits(&mut out, &mut digits);

    format!("<say-as interpret-as=\"address\">{out}</say-as>")
}

/// "bike" or "bikes".
pub fn bike_word(count: u32) -> &'static str {
    if count == 1 { "bike" } else { "bikes" }
}

/// Render an availability selection into one SSML utterance.
pub fn render_selection(selection: &Selection) -> String {
    if !selection.any_available {
        return speak("No bikes were available near you.");
    }

    let mut parts = Vec::with_capacity(selection.announced.len());

    for station in &selection.announced {
        let spoken_name = say_station(&station.name);
        let word = bike_word(station.available_bikes);

        let sentence = if station.follow_up {
            format!(
                "The next closest station with bikes available is {spoken_name}. \
                 It has {} {word} available.",
                station.available_bikes
            )
        } else if station.low_stock {
            format!(
                "{spoken_name} has only {} {word} available.",
                station.available_bikes
            )
        } else {
            format!(
                "{spoken_name} has {} {word} available.",
                station.available_bikes
            )
        };

        parts.push(sentence);
    }

    speak(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::select::AnnouncedStation;

    #[test]
    fn station_name_formatting() {
        let ssml = say_station("W 52 St & 11 Ave");

        assert_eq!(
            ssml,
            "<say-as interpret-as=\"address\">W \
             <say-as interpret-as=\"ordinal\">52</say-as> St and \
             <say-as interpret-as=\"ordinal\">11</say-as> Ave</say-as>"
        );
    }

    #[test]
    fn station_name_without_numbers_passes_through() {
        let ssml = say_station("Franklin St & W Broadway");
        assert!(ssml.contains("Franklin St and W Broadway"));
        assert!(!ssml.contains("ordinal"));
    }

    #[test]
    fn pluralization() {
        assert_eq!(bike_word(1), "bike");
        assert_eq!(bike_word(0), "bikes");
        assert_eq!(bike_word(12), "bikes");
    }

    #[test]
    fn render_ample_station() {
        let selection = Selection {
            announced: vec![AnnouncedStation {
                id: StationId(72),
                name: "W 52 St & 11 Ave".to_string(),
                available_bikes: 12,
                follow_up: false,
                low_stock: false,
            }],
            any_available: true,
            extra_emitted: 0,
        };

        let ssml = render_selection(&selection);
        assert!(ssml.starts_with("<speak>"));
        assert!(ssml.ends_with("</speak>"));
        assert!(ssml.contains("has 12 bikes available."));
        assert!(!ssml.contains("next closest"));
    }

    #[test]
    fn render_low_stock_cascade() {
        let selection = Selection {
            announced: vec![
                AnnouncedStation {
                    id: StationId(1),
                    name: "E 40 St & 5 Ave".to_string(),
                    available_bikes: 2,
                    follow_up: false,
                    low_stock: true,
                },
                AnnouncedStation {
                    id: StationId(3),
                    name: "E 47 St & Park Ave".to_string(),
                    available_bikes: 5,
                    follow_up: true,
                    low_stock: false,
                },
            ],
            any_available: true,
            extra_emitted: 1,
        };

        let ssml = render_selection(&selection);
        assert!(ssml.contains("has only 2 bikes available."));
        assert!(ssml.contains("The next closest station with bikes available is"));
    }

    #[test]
    fn render_nothing_available() {
        let selection = Selection {
            announced: vec![],
            any_available: false,
            extra_emitted: 0,
        };

        assert_eq!(
            render_selection(&selection),
            "<speak>No bikes were available near you.</speak>"
        );
    }

    #[test]
    fn single_bike_uses_singular() {
        let selection = Selection {
            announced: vec![AnnouncedStation {
                id: StationId(1),
                name: "Somewhere".to_string(),
                available_bikes: 1,
                follow_up: false,
                low_stock: true,
            }],
            any_available: true,
            extra_emitted: 1,
        };

        assert!(render_selection(&selection).contains("only 1 bike available."));
    }
}
