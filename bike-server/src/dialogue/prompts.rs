//! User-facing prompt texts for the acquisition dialogue.
//!
//! Each prompt comes with a reprompt spoken if the user stays silent.

use super::machine::PromptKind;

/// The prompt and reprompt for a given prompt kind.
pub fn texts(kind: PromptKind) -> (&'static str, &'static str) {
    match kind {
        PromptKind::ConfirmOverwrite => (
            "Looks like you already have an address saved. Do you want to overwrite it?",
            "You already have an address on file. Say yes to overwrite it, or no to keep it.",
        ),
        PromptKind::AskHouseNumber => (
            "Okay. What is your house number?",
            "Please tell me the house number of your home address.",
        ),
        PromptKind::AskStreetName => (
            "Got it. What is your street name?",
            "Please tell me the street name of your home address.",
        ),
        PromptKind::AskZipcode => (
            "And what is your zipcode?",
            "Please tell me the zipcode of your home address.",
        ),
        PromptKind::MissingHouseNumber => (
            "I need your house number first. What is your house number?",
            "Please tell me the house number of your home address.",
        ),
        PromptKind::MissingStreetName => (
            "I still need your street name. What is your street name?",
            "Please tell me the street name of your home address.",
        ),
        PromptKind::NotAcquiring => (
            "We're not adding an address right now. You can say, add address, to start.",
            "To set your home address, say, add address.",
        ),
        PromptKind::NoConfirmationPending => (
            "I'm sorry, but I don't know which question you are answering.",
            "If you want to change your address, say, add address.",
        ),
        PromptKind::AskFullAddress => (
            "Looks like I couldn't understand your address. \
             Please say your full street address and zipcode.",
            "Please say your full street address followed by your zipcode.",
        ),
    }
}

/// Retry prompt after a geocoding failure. Spoken before the
/// house-number prompt the machine restarts with.
pub const GEOCODE_RETRY: &str =
    "Sorry, I couldn't look up that address. Let's try again from the top.";

/// Terminal message when the address is outside every supported region.
pub const UNSUPPORTED_REGION: &str =
    "Sorry, this service is only available for addresses in New York City.";

/// Terminal message when the stored address is kept.
pub const KEPT_EXISTING: &str = "Ok. I'll keep your current address.";

/// Terminal message when station information cannot be fetched.
pub const FEED_UNAVAILABLE: &str =
    "Sorry, station information is unavailable right now. Please try again later.";

/// Terminal message when the address could not be persisted.
pub const SAVE_FAILED: &str =
    "Sorry, I wasn't able to save your address. Please try again in a moment.";

/// Prompt when a query arrives but no address is on file.
pub const NO_ADDRESS_SET: &str = "There is currently no address set for your home. \
     You can add one by asking me to add an address.";

/// Terminal message when no nearby station has bikes.
pub const NO_BIKES_NEARBY: &str = "No bikes were available near you.";
